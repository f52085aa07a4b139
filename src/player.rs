use crate::geometry::Point;

/// Axis-aligned movement on the map, in screen orientation (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

/// Map canvas extent the player is clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

pub struct PlayerState {
    pub position: Point,   // world space, map-pane pixels
    pub facing_deg: f32,   // always in [0, 360)
    pub fov_deg: f32,      // total spread of the ray fan
    pub ray_count: usize,  // rays == screen columns
    pub max_distance: f32, // cast cutoff in world pixels
    pub eye_height_m: f32,
    pub wall_height_m: f32,
    pub pixels_per_meter: f32,
    pub step_size: f32, // world pixels per move
    pub turn_rate: f32, // degrees per turn
}

impl PlayerState {
    /// Translate one step along an axis and clamp each axis to the canvas.
    pub fn move_step(&mut self, direction: Direction, bounds: Bounds) {
        let (dx, dy) = match direction {
            Direction::Up => (0.0, -self.step_size),
            Direction::Down => (0.0, self.step_size),
            Direction::Left => (-self.step_size, 0.0),
            Direction::Right => (self.step_size, 0.0),
        };

        self.position.x = (self.position.x + dx).clamp(0.0, bounds.width);
        self.position.y = (self.position.y + dy).clamp(0.0, bounds.height);
    }

    /// Rotate by `turn_rate`. With y pointing down, decreasing angles sweep
    /// towards the left edge of the view, so turning left subtracts.
    pub fn turn(&mut self, direction: TurnDirection) {
        let delta = match direction {
            TurnDirection::Left => -self.turn_rate,
            TurnDirection::Right => self.turn_rate,
        };
        self.facing_deg = normalize_degrees(self.facing_deg + delta);
    }
}

/// Wrap an angle into `[0, 360)`, negative inputs included.
#[inline]
pub fn normalize_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
pub(crate) fn test_player() -> PlayerState {
    PlayerState {
        position: Point::new(50.0, 50.0),
        facing_deg: 0.0,
        fov_deg: 90.0,
        ray_count: 3,
        max_distance: 200.0,
        eye_height_m: 1.8,
        wall_height_m: 5.0,
        pixels_per_meter: 10.0,
        step_size: 2.0,
        turn_rate: 5.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        width: 100.0,
        height: 80.0,
    };

    #[test]
    fn moves_along_screen_axes() {
        let mut player = test_player();
        player.move_step(Direction::Up, BOUNDS);
        assert_eq!(player.position, Point::new(50.0, 48.0));
        player.move_step(Direction::Right, BOUNDS);
        assert_eq!(player.position, Point::new(52.0, 48.0));
        player.move_step(Direction::Down, BOUNDS);
        player.move_step(Direction::Left, BOUNDS);
        assert_eq!(player.position, Point::new(50.0, 50.0));
    }

    #[test]
    fn repeated_moves_stay_inside_the_canvas() {
        let mut player = test_player();
        for _ in 0..100 {
            player.move_step(Direction::Left, BOUNDS);
            assert!(player.position.x >= 0.0);
        }
        assert_eq!(player.position.x, 0.0);

        for _ in 0..100 {
            player.move_step(Direction::Right, BOUNDS);
            assert!(player.position.x <= BOUNDS.width);
        }
        assert_eq!(player.position.x, BOUNDS.width);

        for _ in 0..100 {
            player.move_step(Direction::Down, BOUNDS);
        }
        assert_eq!(player.position.y, BOUNDS.height);
        for _ in 0..100 {
            player.move_step(Direction::Up, BOUNDS);
        }
        assert_eq!(player.position.y, 0.0);
    }

    #[test]
    fn full_circle_of_turns_returns_to_start() {
        for direction in [TurnDirection::Left, TurnDirection::Right] {
            let mut player = test_player();
            player.facing_deg = 30.0;
            let turns = (360.0 / player.turn_rate) as usize;
            for _ in 0..turns {
                player.turn(direction);
                assert!((0.0..360.0).contains(&player.facing_deg));
            }
            assert_eq!(player.facing_deg, 30.0);
        }
    }

    #[test]
    fn turning_left_from_zero_wraps_to_the_top_of_the_range() {
        let mut player = test_player();
        player.turn(TurnDirection::Left);
        assert_eq!(player.facing_deg, 355.0);
        player.turn(TurnDirection::Right);
        assert_eq!(player.facing_deg, 0.0);
    }

    #[test]
    fn normalize_handles_negative_and_large_angles() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(365.0), 5.0);
        assert!(normalize_degrees(-1e-9) < 360.0);
    }
}
