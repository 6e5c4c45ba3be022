use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check whether the position lies on a `tile_count` x `tile_count` grid
    pub fn is_within(&self, tile_count: usize) -> bool {
        let n = tile_count as i32;
        self.x >= 0 && self.x < n && self.y >= 0 && self.y < n
    }
}

/// The snake's body, head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
}

impl Snake {
    /// A one-segment snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Build a snake from explicit cells, head first.
    ///
    /// Returns `None` for an empty list.
    pub fn from_cells(cells: Vec<Position>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Self { body: cells })
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn cells(&self) -> &[Position] {
        &self.body
    }

    /// Check if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend `new_head`, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Whether the game is still being played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// Everything the tick engine and renderer need, owned in one place
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub tile_count: usize,
    /// Direction of the most recent move
    direction: Direction,
    /// Direction the next tick will move in
    pending: Direction,
    phase: Phase,
}

impl GameState {
    pub fn new(snake: Snake, food: Position, direction: Direction, tile_count: usize) -> Self {
        Self {
            snake,
            food,
            tile_count,
            direction,
            pending: direction,
            phase: Phase::Running,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Request a turn for the next tick.
    ///
    /// The request is compared against the direction of the last move, not
    /// the previous request, so two quick turns inside one tick cannot fold
    /// the head back into the neck. Returns whether the request was taken.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.is_game_over() || direction.is_opposite(self.direction) {
            return false;
        }
        self.pending = direction;
        true
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_within(self.tile_count)
    }

    pub(crate) fn commit_direction(&mut self) -> Direction {
        self.direction = self.pending;
        self.direction
    }

    pub(crate) fn end(&mut self) {
        self.phase = Phase::GameOver;
    }
}
