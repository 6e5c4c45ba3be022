use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position as ScreenPosition, Rect};

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Right => KeyAction::Steer(Direction::Right),
            KeyCode::Down => KeyAction::Steer(Direction::Down),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns a mouse press/release pair into a swipe direction.
///
/// A gesture starts with a left-button press on the board and ends with the
/// next left-button release, wherever it lands.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Feed one mouse event; returns a direction when a gesture completes
    pub fn handle_mouse_event(&mut self, event: MouseEvent, board: Rect) -> Option<Direction> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = board
                    .contains(ScreenPosition::new(event.column, event.row))
                    .then_some((event.column, event.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (x0, y0) = self.start.take()?;
                let dx = i32::from(event.column) - i32::from(x0);
                let dy = i32::from(event.row) - i32::from(y0);
                Direction::from_swipe(dx, dy)
            }
            _ => None,
        }
    }
}
