//! Core game logic for the Snake board
//!
//! Pure simulation with no I/O or rendering dependencies: the session
//! drives it with a timer and feeds it input, tests drive it directly.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

pub use config::{FoodPlacement, GameConfig};
pub use direction::Direction;
pub use engine::{CollisionType, GameEngine, StepOutcome};
pub use state::{GameState, Phase, Position, Snake};
