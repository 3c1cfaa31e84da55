//! A run of consecutive rounds, independent of any terminal
//!
//! The session buffers player input between ticks, keeps metrics across
//! rounds and decides what happens once the snake crashes.

use tracing::info;

use crate::game::{Action, Direction, GameConfig, GameEngine, GameState, RoundPolicy, StepResult};
use crate::metrics::GameMetrics;

pub struct Session {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    pending_direction: Option<Direction>,
    paused: bool,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            pending_direction: None,
            paused: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut GameMetrics {
        &mut self.metrics
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Remember the latest requested heading; it is applied on the next tick
    pub fn steer(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    /// Step the round once, closing it out if the snake crashed
    pub fn tick(&mut self) -> Option<StepResult> {
        if self.paused || !self.state.is_alive() {
            return None;
        }

        let action = Action::from(self.pending_direction.take());
        let result = self.engine.step(&mut self.state, action);

        if result.ate_food {
            self.metrics.on_food();
        }

        if let Some(end) = result.round_end {
            info!(
                score = self.state.score,
                length = self.state.snake.len(),
                steps = self.state.steps,
                reason = %end,
                "round finished"
            );
            self.metrics.on_round_over(self.state.score, end);

            if self.config().round_policy == RoundPolicy::AutoReset {
                self.start_round();
            }
        }

        Some(result)
    }

    /// Throw away the current round and start a new one
    pub fn restart(&mut self) {
        self.start_round();
        self.paused = false;
    }

    fn start_round(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_round_start();
        self.pending_direction = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, RoundEnd};

    fn wall_bound_session(policy: RoundPolicy) -> Session {
        let config = GameConfig {
            round_policy: policy,
            ..GameConfig::small()
        };
        let mut session = Session::new(config);
        // Head at (5,5) heading right: four free ticks, the fifth leaves the grid
        session.state.food = Some(Position::new(0, 0));
        session
    }

    #[test]
    fn test_session_initialization() {
        let session = Session::new(GameConfig::default());
        assert!(session.state().is_alive());
        assert_eq!(session.state().score, 0);
        assert!(!session.is_paused());
    }

    #[test]
    fn test_auto_reset_after_crash() {
        let mut session = wall_bound_session(RoundPolicy::AutoReset);

        for _ in 0..4 {
            session.tick();
        }
        let result = session.tick().unwrap();

        assert_eq!(result.round_end, Some(RoundEnd::Wall));
        assert!(session.state().is_alive());
        assert_eq!(session.state().steps, 0);
        assert_eq!(session.state().snake.head(), Position::new(5, 5));
        assert_eq!(session.metrics().rounds_played, 1);
    }

    #[test]
    fn test_wait_for_restart_keeps_finished_round() {
        let mut session = wall_bound_session(RoundPolicy::WaitForRestart);

        for _ in 0..5 {
            session.tick();
        }

        assert_eq!(session.state().round_over, Some(RoundEnd::Wall));
        assert!(session.tick().is_none());
        assert_eq!(session.metrics().rounds_played, 1);

        session.restart();
        assert!(session.state().is_alive());
    }

    #[test]
    fn test_pause_freezes_ticks() {
        let mut session = wall_bound_session(RoundPolicy::AutoReset);
        session.toggle_pause();

        assert!(session.tick().is_none());
        assert_eq!(session.state().steps, 0);

        session.toggle_pause();
        assert!(session.tick().is_some());
        assert_eq!(session.state().steps, 1);
    }

    #[test]
    fn test_only_latest_steer_applies() {
        let mut session = wall_bound_session(RoundPolicy::AutoReset);

        // Up then Left within one tick: Left would reverse the snake, so it is dropped
        session.steer(Direction::Up);
        session.steer(Direction::Left);
        session.tick();

        assert_eq!(session.state().snake.direction, Direction::Right);
        assert_eq!(session.state().snake.head(), Position::new(6, 5));
    }

    #[test]
    fn test_restart_clears_pending_input() {
        let mut session = wall_bound_session(RoundPolicy::AutoReset);
        session.steer(Direction::Down);
        session.restart();
        session.state.food = Some(Position::new(0, 0));
        session.tick();

        assert_eq!(session.state().snake.direction, Direction::Right);
    }
}
