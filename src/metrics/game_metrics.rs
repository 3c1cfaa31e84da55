use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::game::RoundEnd;

/// Running totals across the rounds of one session
pub struct GameMetrics {
    pub round_started: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub rounds_played: u32,
    pub food_eaten: u64,
    pub last_round_end: Option<RoundEnd>,
    pub round_ends: HashMap<RoundEnd, u32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_started: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            rounds_played: 0,
            food_eaten: 0,
            last_round_end: None,
            round_ends: HashMap::new(),
        }
    }

    /// Refresh the elapsed time of the current round
    pub fn update(&mut self) {
        self.elapsed_time = self.round_started.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.round_started = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_food(&mut self) {
        self.food_eaten += 1;
    }

    pub fn on_round_over(&mut self, final_score: u32, end: RoundEnd) {
        self.rounds_played += 1;
        self.high_score = self.high_score.max(final_score);
        self.last_round_end = Some(end);
        *self.round_ends.entry(end).or_default() += 1;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
