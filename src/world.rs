use thiserror::Error;

use crate::geometry::{Point, Segment};
use crate::player::{Bounds, PlayerState};

/// A wall is a non-degenerate segment in world space.
pub type Wall = Segment;

#[derive(Debug, Error, PartialEq)]
pub enum WallError {
    #[error("wall from {at} to {at} has zero length")]
    Degenerate { at: Point },
}

/// Owns every wall and the pending start point of the wall being authored.
#[derive(Default)]
pub struct WallStore {
    walls: Vec<Wall>,
    pending: Option<Point>,
}

/// Outcome of feeding one point to [`WallStore::add_point`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointCapture {
    /// Point stored as the start of the next wall.
    Pending(Point),
    /// Point closed a wall, stored at this index.
    Created(usize),
}

impl WallStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn pending(&self) -> Option<Point> {
        self.pending
    }

    /// Two-phase wall capture. The first point becomes the pending start; the
    /// second closes the wall. A zero-length wall is rejected and the pending
    /// start is cleared either way, so the next point starts a fresh wall.
    pub fn add_point(&mut self, p: Point) -> Result<PointCapture, WallError> {
        match self.pending.take() {
            None => {
                self.pending = Some(p);
                Ok(PointCapture::Pending(p))
            }
            Some(start) => self.add_wall(Segment::new(start, p)).map(PointCapture::Created),
        }
    }

    /// Append a complete wall, returning its index.
    pub fn add_wall(&mut self, wall: Wall) -> Result<usize, WallError> {
        if wall.start == wall.end {
            return Err(WallError::Degenerate { at: wall.start });
        }
        self.walls.push(wall);
        Ok(self.walls.len() - 1)
    }
}

/// Everything the host loop mutates: the player pose and the wall set.
pub struct World {
    pub player: PlayerState,
    pub walls: WallStore,
    pub bounds: Bounds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_distinct_points_make_one_wall() {
        let mut store = WallStore::new();
        let a = Point::new(10.0, 20.0);
        let b = Point::new(30.0, 40.0);

        assert_eq!(store.add_point(a), Ok(PointCapture::Pending(a)));
        assert_eq!(store.pending(), Some(a));
        assert!(store.walls().is_empty());

        assert_eq!(store.add_point(b), Ok(PointCapture::Created(0)));
        assert_eq!(store.walls(), &[Segment::new(a, b)]);
        assert_eq!(store.pending(), None);
    }

    #[test]
    fn identical_points_are_rejected_and_clear_the_pending_start() {
        let mut store = WallStore::new();
        let a = Point::new(5.0, 5.0);

        store.add_point(a).unwrap();
        assert_eq!(store.add_point(a), Err(WallError::Degenerate { at: a }));
        assert!(store.walls().is_empty());
        assert_eq!(store.pending(), None);

        // The next point starts a new wall rather than closing one.
        assert!(matches!(store.add_point(a), Ok(PointCapture::Pending(_))));
    }

    #[test]
    fn walls_keep_insertion_order() {
        let mut store = WallStore::new();
        let first = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let second = Segment::new(Point::new(0.0, 1.0), Point::new(1.0, 1.0));
        assert_eq!(store.add_wall(first), Ok(0));
        assert_eq!(store.add_wall(second), Ok(1));
        assert_eq!(store.walls(), &[first, second]);
    }

    #[test]
    fn add_wall_rejects_degenerate_segments() {
        let mut store = WallStore::new();
        let p = Point::new(3.0, 3.0);
        assert!(store.add_wall(Segment::new(p, p)).is_err());
        assert!(store.walls().is_empty());
    }
}
