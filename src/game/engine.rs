use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    config::{FoodPlacement, GameConfig},
    state::{GameState, Position, Snake},
};

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into one of its own cells
    SelfCollision,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Head advanced, tail followed
    Moved,
    /// Head landed on the food; snake grew and food moved to `new_food`
    Ate { new_food: Position },
    /// Next head was blocked; the game is now over
    Collided(CollisionType),
    /// The game was already over; nothing changed
    Halted,
}

/// The tick engine: owns the config and the food RNG
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh state at the configured starting cells
    pub fn reset(&self) -> GameState {
        GameState::new(
            Snake::new(self.config.initial_head),
            self.config.initial_food,
            self.config.initial_direction,
            self.config.tile_count,
        )
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> StepOutcome {
        if state.is_game_over() {
            return StepOutcome::Halted;
        }

        let direction = state.commit_direction();
        let new_head = state.snake.head().moved_in_direction(direction);

        if let Some(collision) = Self::check_collision(state, new_head) {
            state.end();
            return StepOutcome::Collided(collision);
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);

        if ate_food {
            state.food = self.spawn_food(&state.snake);
            StepOutcome::Ate {
                new_food: state.food,
            }
        } else {
            StepOutcome::Moved
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn spawn_food(&mut self, snake: &Snake) -> Position {
        match self.config.food_placement {
            FoodPlacement::Anywhere => self.random_cell(),
            FoodPlacement::AvoidSnake => self.random_free_cell(snake),
        }
    }

    fn random_cell(&mut self) -> Position {
        let n = self.config.tile_count as i32;
        Position::new(self.rng.gen_range(0..n), self.rng.gen_range(0..n))
    }

    /// Uniform over cells the snake does not cover; any cell once the grid is full
    fn random_free_cell(&mut self, snake: &Snake) -> Position {
        let n = self.config.tile_count as i32;
        let free: Vec<Position> = (0..n)
            .flat_map(|y| (0..n).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        if free.is_empty() {
            return self.random_cell();
        }
        free[self.rng.gen_range(0..free.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Phase};

    fn seeded() -> GameEngine {
        GameEngine::new(GameConfig {
            seed: Some(42),
            ..Default::default()
        })
    }

    fn state_with(cells: &[(i32, i32)], food: (i32, i32), direction: Direction) -> GameState {
        let snake =
            Snake::from_cells(cells.iter().map(|&(x, y)| Position::new(x, y)).collect()).unwrap();
        GameState::new(snake, Position::new(food.0, food.1), direction, 20)
    }

    #[test]
    fn test_reset() {
        let engine = seeded();
        let state = engine.reset();

        assert!(state.is_running());
        assert_eq!(state.snake.cells(), &[Position::new(10, 10)]);
        assert_eq!(state.food, Position::new(15, 15));
        assert_eq!(state.direction(), Direction::Right);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = seeded();
        let mut state = engine.reset();

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(state.snake.head(), Position::new(11, 10));
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn test_steer_applies_on_next_tick() {
        let mut engine = seeded();
        let mut state = engine.reset();

        assert!(state.steer(Direction::Down));
        assert_eq!(state.snake.head(), Position::new(10, 10));

        engine.step(&mut state);
        assert_eq!(state.snake.head(), Position::new(10, 11));
        assert_eq!(state.direction(), Direction::Down);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = seeded();
        let mut state = state_with(&[(14, 15)], (15, 15), Direction::Right);

        let outcome = engine.step(&mut state);

        assert_eq!(state.snake.head(), Position::new(15, 15));
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.snake.tail(), Position::new(14, 15));
        assert_eq!(outcome, StepOutcome::Ate { new_food: state.food });
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = seeded();
        let mut state = state_with(&[(19, 19)], (5, 5), Direction::Right);
        let before = state.snake.clone();

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::Collided(CollisionType::Wall));
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.snake, before);
        assert_eq!(state.food, Position::new(5, 5));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = seeded();
        // Head (5,7) moving Up lands on the tail at (5,6); the tail still counts
        let mut state = state_with(
            &[(5, 7), (5, 8), (4, 8), (4, 7), (4, 6), (5, 6)],
            (0, 0),
            Direction::Up,
        );

        let outcome = engine.step(&mut state);

        assert_eq!(outcome, StepOutcome::Collided(CollisionType::SelfCollision));
        assert!(state.is_game_over());
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = seeded();
        let mut state = state_with(&[(19, 19)], (5, 5), Direction::Right);
        engine.step(&mut state);
        let frozen = state.clone();

        for _ in 0..5 {
            assert_eq!(engine.step(&mut state), StepOutcome::Halted);
        }
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_avoid_snake_placement_on_crowded_grid() {
        let mut engine = GameEngine::new(GameConfig {
            tile_count: 2,
            initial_head: Position::new(0, 0),
            initial_food: Position::new(1, 0),
            food_placement: FoodPlacement::AvoidSnake,
            seed: Some(3),
            ..Default::default()
        });
        let snake = Snake::from_cells(vec![
            Position::new(1, 0),
            Position::new(0, 0),
            Position::new(0, 1),
        ])
        .unwrap();

        for _ in 0..20 {
            assert_eq!(engine.spawn_food(&snake), Position::new(1, 1));
        }
    }

    #[test]
    fn test_avoid_snake_placement_full_grid_falls_back() {
        let mut engine = GameEngine::new(GameConfig {
            tile_count: 2,
            initial_head: Position::new(0, 0),
            initial_food: Position::new(1, 0),
            food_placement: FoodPlacement::AvoidSnake,
            seed: Some(3),
            ..Default::default()
        });
        let snake = Snake::from_cells(vec![
            Position::new(1, 0),
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ])
        .unwrap();

        let food = engine.spawn_food(&snake);
        assert!((0..2).contains(&food.x) && (0..2).contains(&food.y));
    }

    #[test]
    fn test_seeded_engines_agree() {
        let mut a = seeded();
        let mut b = seeded();
        let snake = Snake::new(Position::new(0, 0));
        for _ in 0..10 {
            assert_eq!(a.spawn_food(&snake), b.spawn_food(&snake));
        }
    }
}
