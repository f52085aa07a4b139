use thiserror::Error;

use crate::geometry::Point;
use crate::player::{Direction, TurnDirection};
use crate::world::{PointCapture, WallError, World};

/// Discrete input, already decoded from device events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Move(Direction),
    Turn(TurnDirection),
    AddWallPoint(Point),
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error(transparent)]
    Wall(#[from] WallError),
}

/// What a successful command changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Applied {
    Moved(Point),
    Turned(f32),
    WallPoint(PointCapture),
}

/// The only place world state is mutated. Each call runs to completion before
/// the host loop casts and renders.
pub fn apply(command: Command, world: &mut World) -> Result<Applied, CommandError> {
    let applied = match command {
        Command::Move(direction) => {
            world.player.move_step(direction, world.bounds);
            Applied::Moved(world.player.position)
        }
        Command::Turn(direction) => {
            world.player.turn(direction);
            Applied::Turned(world.player.facing_deg)
        }
        Command::AddWallPoint(p) => Applied::WallPoint(world.walls.add_point(p)?),
    };

    tracing::debug!(?command, ?applied, "command applied");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Segment;
    use crate::player::{Bounds, test_player};
    use crate::world::WallStore;

    fn world() -> World {
        World {
            player: test_player(),
            walls: WallStore::new(),
            bounds: Bounds {
                width: 100.0,
                height: 100.0,
            },
        }
    }

    #[test]
    fn move_and_turn_update_the_player() {
        let mut world = world();
        assert_eq!(
            apply(Command::Move(Direction::Down), &mut world),
            Ok(Applied::Moved(Point::new(50.0, 52.0)))
        );
        assert_eq!(
            apply(Command::Turn(TurnDirection::Right), &mut world),
            Ok(Applied::Turned(5.0))
        );
        assert_eq!(world.player.facing_deg, 5.0);
    }

    #[test]
    fn wall_points_build_walls() {
        let mut world = world();
        let a = Point::new(10.0, 10.0);
        let b = Point::new(10.0, 90.0);

        apply(Command::AddWallPoint(a), &mut world).unwrap();
        assert_eq!(
            apply(Command::AddWallPoint(b), &mut world),
            Ok(Applied::WallPoint(PointCapture::Created(0)))
        );
        assert_eq!(world.walls.walls(), &[Segment::new(a, b)]);
    }

    #[test]
    fn degenerate_wall_is_a_recoverable_error() {
        let mut world = world();
        let a = Point::new(10.0, 10.0);

        apply(Command::AddWallPoint(a), &mut world).unwrap();
        let err = apply(Command::AddWallPoint(a), &mut world).unwrap_err();
        assert_eq!(err, CommandError::Wall(WallError::Degenerate { at: a }));
        assert!(world.walls.walls().is_empty());

        // Later commands still work.
        assert!(apply(Command::Move(Direction::Up), &mut world).is_ok());
    }
}
