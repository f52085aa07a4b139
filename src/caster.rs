use crate::geometry::{Point, Segment, intersect, length};
use crate::player::PlayerState;
use crate::world::Wall;

/// Nearest hit along one sampled ray. When `hit_wall` is false, `point` is the
/// unobstructed ray end and `distance` equals the player's max distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Point,
    pub distance: f32,
    pub hit_wall: bool,
}

/// Sampled angle of ray `i`, in degrees.
#[inline]
pub fn ray_angle(player: &PlayerState, i: usize) -> f32 {
    let start = player.facing_deg - player.fov_deg / 2.0;
    let step = player.fov_deg / player.ray_count as f32;
    start + i as f32 * step
}

/// Cast the whole ray fan, one hit per ray in angle-ascending order.
///
/// Walls are scanned in insertion order and the nearest intersection wins.
/// A hit at distance zero stops the scan for that ray, so the player must never
/// stand exactly on a wall; other walls at the same spot would be ignored.
pub fn cast(player: &PlayerState, walls: &[Wall]) -> Vec<RayHit> {
    let origin = player.position;

    (0..player.ray_count)
        .map(|i| {
            let end = origin.offset_polar(ray_angle(player, i), player.max_distance);
            let ray = Segment::new(origin, end);

            let mut nearest = RayHit {
                point: end,
                distance: player.max_distance,
                hit_wall: false,
            };

            for wall in walls {
                let Some(point) = intersect(&ray, wall) else {
                    continue;
                };
                let distance = length(&Segment::new(origin, point));
                if !nearest.hit_wall || distance < nearest.distance {
                    nearest = RayHit {
                        point,
                        distance,
                        hit_wall: true,
                    };
                }
                if distance == 0.0 {
                    break;
                }
            }

            nearest
        })
        .collect()
}
