use rayon::{iter::ParallelIterator, slice::ParallelSliceMut};

use crate::caster::RayHit;
use crate::geometry::Point;
use crate::projector::ViewColumn;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);
    pub const WHITE: Colour = Colour::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(shade: u8) -> Self {
        Self::rgb(shade, shade, shade)
    }

    /// softbuffer pixel layout: 0RGB, alpha byte left at 0
    #[inline]
    pub fn pack(self) -> u32 {
        (self.b as u32) | ((self.g as u32) << 8) | ((self.r as u32) << 16)
    }
}

/// Drawing primitives the frame is composed from.
pub trait Renderer {
    fn fill_background(&mut self, colour: Colour);
    fn draw_rect(&mut self, top_left: Point, bottom_right: Point, filled: bool, colour: Colour);
    fn draw_circle(&mut self, center: Point, radius: f32, filled: bool, colour: Colour);
    fn draw_line(&mut self, a: Point, b: Point, colour: Colour);
}

/// CPU pixel buffer, copied into the window surface once per frame.
pub struct FrameBuffer {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width * height];
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    fn put_pixel(&mut self, x: i32, y: i32, colour: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = colour;
        }
    }

    /// Fill `x0..x1` on rows `y0..y1`, already clamped to the buffer.
    fn fill_span(&mut self, x0: usize, x1: usize, y0: usize, y1: usize, colour: u32) {
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        // Rows are independent, fill them in parallel
        self.pixels[y0 * self.width..y1 * self.width]
            .par_chunks_mut(self.width)
            .for_each(|row| row[x0..x1].fill(colour));
    }

    /// Clip `a -> b` to the pixel grid by narrowing its parameter range
    /// against each edge. `None` when nothing of the segment is visible.
    fn clip_line(&self, a: Point, b: Point) -> Option<(Point, Point)> {
        if self.width == 0 || self.height == 0 || !(a.x.is_finite() && a.y.is_finite()) {
            return None;
        }
        if !(b.x.is_finite() && b.y.is_finite()) {
            return None;
        }

        let (max_x, max_y) = ((self.width - 1) as f32, (self.height - 1) as f32);
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let (mut t0, mut t1) = (0.0f32, 1.0f32);

        // Each edge as (p, q): inside while p * t <= q
        for (p, q) in [(-dx, a.x), (dx, max_x - a.x), (-dy, a.y), (dy, max_y - a.y)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None; // parallel to and outside this edge
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        let at = |t: f32| Point::new(a.x + t * dx, a.y + t * dy);
        Some((at(t0), at(t1)))
    }

    fn clamp_x(&self, x: f32) -> usize {
        (x.round().max(0.0) as usize).min(self.width)
    }

    fn clamp_y(&self, y: f32) -> usize {
        (y.round().max(0.0) as usize).min(self.height)
    }
}

impl Renderer for FrameBuffer {
    fn fill_background(&mut self, colour: Colour) {
        let c = colour.pack();
        self.pixels
            .par_chunks_mut(self.width.max(1))
            .for_each(|row| row.fill(c));
    }

    fn draw_rect(&mut self, top_left: Point, bottom_right: Point, filled: bool, colour: Colour) {
        if filled {
            let (x0, x1) = (self.clamp_x(top_left.x), self.clamp_x(bottom_right.x));
            let (y0, y1) = (self.clamp_y(top_left.y), self.clamp_y(bottom_right.y));
            self.fill_span(x0, x1, y0, y1, colour.pack());
        } else {
            let top_right = Point::new(bottom_right.x, top_left.y);
            let bottom_left = Point::new(top_left.x, bottom_right.y);
            self.draw_line(top_left, top_right, colour);
            self.draw_line(top_right, bottom_right, colour);
            self.draw_line(bottom_right, bottom_left, colour);
            self.draw_line(bottom_left, top_left, colour);
        }
    }

    fn draw_circle(&mut self, center: Point, radius: f32, filled: bool, colour: Colour) {
        let c = colour.pack();
        let r = radius.max(0.0);
        let (cx, cy) = (center.x.round() as i32, center.y.round() as i32);
        let ri = r.ceil() as i32;
        let outer = r * r;
        let inner = (r - 1.0).max(0.0).powi(2);

        for dy in -ri..=ri {
            for dx in -ri..=ri {
                let d2 = (dx * dx + dy * dy) as f32;
                let inside = d2 <= outer;
                let on_ring = inside && (filled || d2 > inner || r < 1.0);
                if on_ring {
                    self.put_pixel(cx + dx, cy + dy, c);
                }
            }
        }
    }

    fn draw_line(&mut self, a: Point, b: Point, colour: Colour) {
        let c = colour.pack();
        let Some((a, b)) = self.clip_line(a, b) else {
            return; // fully off-screen
        };
        let (x0, y0) = (a.x.round() as i64, a.y.round() as i64);
        let (x1, y1) = (b.x.round() as i64, b.y.round() as i64);

        // Bresenham, stepping both axes
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.put_pixel(x as i32, y as i32, c);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

const MAP_BACKGROUND: Colour = Colour::BLACK;
const MAP_WALL: Colour = Colour::rgb(200, 200, 250);
const MAP_RAY: Colour = Colour::rgb(90, 90, 60);
const MAP_PENDING: Colour = Colour::rgb(250, 180, 180);
const VIEW_CEILING: Colour = Colour::rgb(30, 30, 70);
const VIEW_FLOOR: Colour = Colour::rgb(40, 40, 40);
const PANE_DIVIDER: Colour = Colour::rgb(120, 120, 120);

/// Top-down map in `0..map_width`, pseudo-3D view to its right.
pub fn draw_scene(
    renderer: &mut impl Renderer,
    world: &World,
    hits: &[RayHit],
    columns: &[ViewColumn],
    map_width: f32,
    view_width: f32,
    height: f32,
) {
    renderer.fill_background(MAP_BACKGROUND);

    // Map pane
    let player = world.player.position;
    for hit in hits {
        renderer.draw_line(player, hit.point, MAP_RAY);
    }
    for wall in world.walls.walls() {
        renderer.draw_line(wall.start, wall.end, MAP_WALL);
    }
    if let Some(pending) = world.walls.pending() {
        renderer.draw_circle(pending, 3.0, false, MAP_PENDING);
    }
    renderer.draw_circle(player, 2.0, true, Colour::WHITE);

    // View pane, background split at the horizon
    let horizon = height / 2.0;
    let right = map_width + view_width;
    renderer.draw_rect(Point::new(map_width, 0.0), Point::new(right, horizon), true, VIEW_CEILING);
    renderer.draw_rect(Point::new(map_width, horizon), Point::new(right, height), true, VIEW_FLOOR);

    for column in columns {
        let colour = Colour::grey(column.shade);
        for (top_left, bottom_right) in column.rects() {
            renderer.draw_rect(
                Point::new(top_left.x + map_width, top_left.y),
                Point::new(bottom_right.x + map_width, bottom_right.y),
                true,
                colour,
            );
        }
    }

    renderer.draw_line(
        Point::new(map_width, 0.0),
        Point::new(map_width, height),
        PANE_DIVIDER,
    );
}
