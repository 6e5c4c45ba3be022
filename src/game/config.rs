use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::state::Position;

/// Where eaten food is allowed to reappear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoodPlacement {
    /// Any cell of the grid, including cells under the snake
    #[default]
    Anywhere,
    /// Only cells not occupied by the snake
    AvoidSnake,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells along each side of the square grid
    pub tile_count: usize,
    /// Logical size of one cell on the drawing surface
    pub grid_size: u32,
    /// Terminal columns used per cell (one filled, the rest gap)
    pub cell_width: u16,
    /// Delay between simulation steps, in milliseconds
    pub tick_interval_ms: u64,
    /// Starting cell of the one-segment snake
    pub initial_head: Position,
    /// Starting food cell
    pub initial_food: Position,
    /// Starting direction of travel
    pub initial_direction: Direction,
    pub food_placement: FoodPlacement,
    /// Fixed RNG seed; entropy is used when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_count: 20,
            grid_size: 20,
            cell_width: 2,
            tick_interval_ms: 150,
            initial_head: Position::new(10, 10),
            initial_food: Position::new(15, 15),
            initial_direction: Direction::Right,
            food_placement: FoodPlacement::Anywhere,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(tile_count: usize) -> Self {
        Self {
            tile_count,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Width and height of the logical drawing surface
    pub fn surface_size(&self) -> (u32, u32) {
        let side = self.grid_size * self.tile_count as u32;
        (side, side)
    }

    /// Check whether a position lies on the grid
    pub fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.tile_count)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tile_count >= 2,
            "tile_count must be at least 2, got {}",
            self.tile_count
        );
        ensure!(self.grid_size > 0, "grid_size must be positive");
        ensure!(self.cell_width > 0, "cell_width must be positive");
        // Board plus its two border cells must fit in terminal coordinates
        ensure!(
            self.tile_count <= (u16::MAX as usize - 2) / self.cell_width as usize,
            "tile_count {} with cell_width {} is too large for the terminal",
            self.tile_count,
            self.cell_width
        );
        ensure!(
            (self.grid_size as u64) * (self.tile_count as u64) <= u32::MAX as u64,
            "surface of {} cells of size {} is too large",
            self.tile_count,
            self.grid_size
        );
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        ensure!(
            self.contains(self.initial_head),
            "initial_head {:?} is outside the {}x{} grid",
            self.initial_head,
            self.tile_count,
            self.tile_count
        );
        ensure!(
            self.contains(self.initial_food),
            "initial_food {:?} is outside the {}x{} grid",
            self.initial_food,
            self.tile_count,
            self.tile_count
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.tile_count, 20);
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(150));
        assert_eq!(config.surface_size(), (400, 400));
        assert_eq!(config.initial_head, Position::new(10, 10));
        assert_eq!(config.initial_food, Position::new(15, 15));
        assert_eq!(config.initial_direction, Direction::Right);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.tile_count, 15);
        assert_eq!(config.surface_size(), (300, 300));
    }

    #[test]
    fn test_contains() {
        let config = GameConfig::default();
        assert!(config.contains(Position::new(0, 0)));
        assert!(config.contains(Position::new(19, 19)));
        assert!(!config.contains(Position::new(-1, 0)));
        assert!(!config.contains(Position::new(20, 0)));
        assert!(!config.contains(Position::new(0, 20)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let tiny = GameConfig::new(1);
        assert!(tiny.validate().is_err());

        let zero_tick = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(zero_tick.validate().is_err());

        // Default head (10, 10) does not fit a 10x10 grid
        let head_outside = GameConfig::new(10);
        assert!(head_outside.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_board_to_terminal() {
        let widest = GameConfig {
            tile_count: 32766,
            cell_width: 2,
            ..Default::default()
        };
        assert!(widest.validate().is_ok());

        let overflowing = GameConfig {
            tile_count: 32767,
            cell_width: 2,
            ..Default::default()
        };
        assert!(overflowing.validate().is_err());

        let narrow = GameConfig {
            tile_count: 65534,
            cell_width: 1,
            grid_size: 1,
            ..Default::default()
        };
        assert!(narrow.validate().is_err());
    }

    #[test]
    fn test_partial_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"tick_interval_ms": 90, "food_placement": "avoid-snake", "seed": 7}}"#
        )
        .unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.tick_interval_ms, 90);
        assert_eq!(config.food_placement, FoodPlacement::AvoidSnake);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tile_count, 20);
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(GameConfig::from_file(&path).is_err());

        let missing = dir.path().join("missing.json");
        assert!(GameConfig::from_file(&missing).is_err());
    }
}
