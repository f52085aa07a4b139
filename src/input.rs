use winit::keyboard::KeyCode;

use crate::command::Command;
use crate::geometry::Point;
use crate::player::{Bounds, Direction, TurnDirection};

/// Command bound to a pressed key, if any.
pub fn key_command(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::ArrowUp | KeyCode::KeyW => Command::Move(Direction::Up),
        KeyCode::ArrowDown | KeyCode::KeyS => Command::Move(Direction::Down),
        KeyCode::ArrowLeft | KeyCode::KeyA => Command::Move(Direction::Left),
        KeyCode::ArrowRight | KeyCode::KeyD => Command::Move(Direction::Right),
        KeyCode::KeyQ | KeyCode::Comma => Command::Turn(TurnDirection::Left),
        KeyCode::KeyE | KeyCode::Period => Command::Turn(TurnDirection::Right),
        _ => return None,
    };
    Some(command)
}

/// Left click on the map pane places a wall point at the cursor. Map pane
/// pixels are world coordinates, so no transform is needed.
pub fn click_command(cursor: Point, map: Bounds) -> Option<Command> {
    let inside = (0.0..map.width).contains(&cursor.x) && (0.0..map.height).contains(&cursor.y);
    inside.then_some(Command::AddWallPoint(cursor))
}
