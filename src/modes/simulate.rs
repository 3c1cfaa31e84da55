//! Headless autopilot runs
//!
//! Plays a batch of rounds as fast as possible and reports how they went.
//! Useful for checking the autopilot and the rules without a terminal.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info};

use crate::autopilot::Autopilot;
use crate::game::{GameConfig, GameEngine, RoundEnd};
use crate::metrics::GameMetrics;

#[derive(Debug, Clone)]
pub struct SimulateConfig {
    /// Rounds to play
    pub rounds: usize,
    /// A round still running after this many ticks is cut off
    pub max_steps: u32,
    pub game_config: GameConfig,
}

impl SimulateConfig {
    pub fn new(rounds: usize, game_config: GameConfig) -> Self {
        Self {
            rounds,
            max_steps: 10_000,
            game_config,
        }
    }
}

/// Results of a batch of simulated rounds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationSummary {
    pub rounds: usize,
    pub best_score: u32,
    pub mean_score: f64,
    pub total_steps: u64,
    pub round_ends: HashMap<RoundEnd, usize>,
    /// Rounds stopped by the step cap
    pub cut_off: usize,
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(40))?;
        writeln!(f, "Simulation Summary")?;
        writeln!(f, "{}", "=".repeat(40))?;
        writeln!(f, "Rounds:       {}", self.rounds)?;
        writeln!(f, "Best score:   {}", self.best_score)?;
        writeln!(f, "Mean score:   {:.2}", self.mean_score)?;
        writeln!(f, "Total steps:  {}", self.total_steps)?;
        for end in [RoundEnd::Wall, RoundEnd::SelfCollision, RoundEnd::BoardCleared] {
            let count = self.round_ends.get(&end).copied().unwrap_or(0);
            writeln!(f, "  {:<20}{}", format!("{end}:"), count)?;
        }
        write!(f, "  {:<20}{}", "cut off:", self.cut_off)
    }
}

pub struct SimulateMode {
    config: SimulateConfig,
    engine: GameEngine,
    pilot: Autopilot,
    metrics: GameMetrics,
}

impl SimulateMode {
    pub fn new(config: SimulateConfig) -> Self {
        let engine = GameEngine::new(config.game_config.clone());
        Self {
            config,
            engine,
            pilot: Autopilot::new(),
            metrics: GameMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn run(&mut self) -> SimulationSummary {
        info!(
            rounds = self.config.rounds,
            max_steps = self.config.max_steps,
            width = self.config.game_config.grid_width,
            height = self.config.game_config.grid_height,
            "simulation started"
        );

        let mut summary = SimulationSummary {
            rounds: self.config.rounds,
            ..Default::default()
        };
        let mut score_sum = 0u64;

        for round in 1..=self.config.rounds {
            let mut state = self.engine.reset();
            self.metrics.on_round_start();

            while state.is_alive() && state.steps < self.config.max_steps {
                let action = self.pilot.choose(&state);
                let result = self.engine.step(&mut state, action);
                if result.ate_food {
                    self.metrics.on_food();
                }
            }

            match state.round_over {
                Some(end) => {
                    self.metrics.on_round_over(state.score, end);
                    *summary.round_ends.entry(end).or_default() += 1;
                }
                None => {
                    debug!(round, "round hit the step cap");
                    summary.cut_off += 1;
                }
            }

            info!(
                round,
                score = state.score,
                steps = state.steps,
                end = ?state.round_over,
                "round finished"
            );

            summary.best_score = summary.best_score.max(state.score);
            summary.total_steps += u64::from(state.steps);
            score_sum += u64::from(state.score);
        }

        if summary.rounds > 0 {
            summary.mean_score = score_sum as f64 / summary.rounds as f64;
        }

        info!(
            best = summary.best_score,
            mean = summary.mean_score,
            "simulation finished"
        );
        summary
    }
}
