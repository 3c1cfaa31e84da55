use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, trace};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{free_cells, GameState, Position, RoundEnd, Snake},
};

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set when the round is over, including ticks on an already finished round
    pub round_end: Option<RoundEnd>,
}

impl StepResult {
    pub fn terminated(&self) -> bool {
        self.round_end.is_some()
    }
}

/// Applies the rules of the game to a [`GameState`]
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
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

    /// Fresh round: snake centered and heading right, food on a free cell
    pub fn reset(&mut self) -> GameState {
        let center = Position::new(
            (self.config.grid_width / 2) as i32,
            (self.config.grid_height / 2) as i32,
        );
        let snake = Snake::new(center, Direction::Right, self.config.initial_snake_length);
        let food = self.spawn_food(&snake);

        debug!(?center, ?food, "round reset");

        GameState {
            snake,
            food,
            grid_width: self.config.grid_width,
            grid_height: self.config.grid_height,
            score: 0,
            steps: 0,
            round_over: None,
        }
    }

    /// Advance the round by one tick
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if let Some(end) = state.round_over {
            return StepResult {
                ate_food: false,
                round_end: Some(end),
            };
        }

        if let Action::Steer(new_direction) = action {
            if !state.snake.direction.is_opposite(new_direction) {
                state.snake.direction = new_direction;
            }
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        let ate_food = state.food == Some(new_head);
        state.steps += 1;

        if let Some(end) = Self::check_collision(state, new_head, ate_food) {
            debug!(?end, score = state.score, steps = state.steps, "round over");
            state.round_over = Some(end);
            return StepResult {
                ate_food: false,
                round_end: Some(end),
            };
        }

        state.snake.advance(ate_food);
        trace!(head = ?new_head, "snake advanced");

        let mut round_end = None;
        if ate_food {
            state.score += 1;
            state.food = self.spawn_food(&state.snake);
            debug!(score = state.score, food = ?state.food, "food eaten");

            if state.food.is_none() {
                state.round_over = Some(RoundEnd::BoardCleared);
                round_end = state.round_over;
            }
        }

        StepResult {
            ate_food,
            round_end,
        }
    }

    fn check_collision(state: &GameState, pos: Position, growing: bool) -> Option<RoundEnd> {
        if !state.is_in_bounds(pos) {
            return Some(RoundEnd::Wall);
        }

        if state.snake.blocks(pos, growing) {
            return Some(RoundEnd::SelfCollision);
        }

        None
    }

    /// Pick a random cell the snake does not cover; `None` if the grid is full
    fn spawn_food(&mut self, snake: &Snake) -> Option<Position> {
        let free = free_cells(snake, self.config.grid_width, self.config.grid_height);
        free.choose(&mut self.rng).copied()
    }
}
