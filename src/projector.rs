use crate::caster::RayHit;
use crate::geometry::Point;
use crate::player::PlayerState;

/// One vertical slice of the pseudo-3D view, in viewport pixels.
///
/// The wall is split at `horizon_y` (eye level): the upper part spans
/// `top_y..horizon_y`, the lower part `horizon_y..bottom_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewColumn {
    pub x_start: f32,
    pub width: f32,
    pub top_y: f32,
    pub horizon_y: f32,
    pub bottom_y: f32,
    pub shade: u8,
}

impl ViewColumn {
    /// Upper and lower rectangles as `(top_left, bottom_right)` pairs.
    pub fn rects(&self) -> [(Point, Point); 2] {
        let x_end = self.x_start + self.width;
        [
            (
                Point::new(self.x_start, self.top_y),
                Point::new(x_end, self.horizon_y),
            ),
            (
                Point::new(self.x_start, self.horizon_y),
                Point::new(x_end, self.bottom_y),
            ),
        ]
    }
}

/// Grayscale fog value: 255 at distance 0, 0 at `max_distance` and beyond.
#[inline]
pub fn shade(distance: f32, max_distance: f32) -> u8 {
    (255.0 * (1.0 - distance / max_distance)).clamp(0.0, 255.0).round() as u8
}

/// Map the ray fan to screen columns, left to right in ray order.
///
/// Rays that hit nothing produce no column. The projection plane half-width
/// uses the whole FOV at the hit distance instead of the per-ray angle, which
/// bends straight walls near the view edges. The plane uses `|tan(fov/2)|`,
/// so a FOV past 180 degrees mirrors its supplement (200 projects like 160)
/// and a full 360 degree fan, where the plane collapses, fills every column.
/// Extents are clamped to the viewport, so a hit at distance 0 fills the column.
pub fn project(
    hits: &[RayHit],
    player: &PlayerState,
    viewport_width: f32,
    viewport_height: f32,
) -> Vec<ViewColumn> {
    let width = viewport_width / player.ray_count as f32;
    let horizon_y = viewport_height / 2.0;
    // Magnitude only: past 180 degrees tan turns negative
    let tan_half_fov = (player.fov_deg.to_radians() / 2.0).tan().abs();

    let upper_m = player.wall_height_m - player.eye_height_m;
    let lower_m = player.eye_height_m;

    hits.iter()
        .enumerate()
        .filter(|(_, hit)| hit.hit_wall)
        .map(|(i, hit)| {
            let distance_m = hit.distance / player.pixels_per_meter;
            let half_fov_extent = tan_half_fov * distance_m;

            let to_pixels = |meters: f32| -> f32 {
                let px = viewport_width * (meters / half_fov_extent);
                // 0/0 when both the wall part and the distance are zero
                if px.is_nan() { 0.0 } else { px.clamp(0.0, horizon_y) }
            };

            ViewColumn {
                x_start: i as f32 * width,
                width,
                top_y: horizon_y - to_pixels(upper_m),
                horizon_y,
                bottom_y: horizon_y + to_pixels(lower_m),
                shade: shade(hit.distance, player.max_distance),
            }
        })
        .collect()
}
