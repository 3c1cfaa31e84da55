//! Watch the autopilot play
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Restart the round
//! - 1-4: Speed (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::info;

use super::play::FRAME_INTERVAL;
use super::terminal::{self, Tui};
use crate::autopilot::Autopilot;
use crate::game::{Action, GameConfig};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::session::Session;

/// Playback speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchSpeed {
    /// The game's own `tick_ms`, used until a preset is picked
    Configured(Duration),
    /// 2 Hz
    Slow,
    /// 10 Hz, the regular game pace
    Normal,
    /// 20 Hz
    Fast,
    /// ~60 Hz
    VeryFast,
}

impl WatchSpeed {
    /// Map a `1`-`4` key to a preset
    pub fn from_preset(preset: u8) -> Option<Self> {
        match preset {
            1 => Some(Self::Slow),
            2 => Some(Self::Normal),
            3 => Some(Self::Fast),
            4 => Some(Self::VeryFast),
            _ => None,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Configured(interval) => *interval,
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(100),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configured(_) => "Configured",
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
        }
    }
}

pub struct WatchMode {
    session: Session,
    pilot: Autopilot,
    renderer: Renderer,
    input_handler: InputHandler,
    speed: WatchSpeed,
    should_quit: bool,
}

impl WatchMode {
    pub fn new(config: GameConfig) -> Self {
        let speed = WatchSpeed::Configured(config.tick_interval());
        Self {
            session: Session::new(config),
            pilot: Autopilot::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            speed,
            should_quit: false,
        }
    }

    pub fn metrics(&self) -> &GameMetrics {
        self.session.metrics()
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = terminal::setup()?;
        info!(config = ?self.session.config(), "watch mode started");

        let result = self.run_loop(&mut terminal).await;

        terminal::restore(&mut terminal)?;
        info!(
            rounds = self.session.metrics().rounds_played,
            best = self.session.metrics().high_score,
            "watch mode finished"
        );

        result
    }

    async fn run_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = self.tick_timer();

        let mut render_timer = interval(FRAME_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_event(event) {
                                tick_timer = self.tick_timer();
                            }
                        }
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    self.step();
                }

                _ = render_timer.tick() => {
                    self.session.metrics_mut().update();
                    let label = format!("Speed: {}", self.speed.as_str());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, Some(&label));
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn tick_timer(&self) -> Interval {
        let mut timer = interval(self.speed.tick_interval());
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        timer
    }

    /// Let the autopilot pick a move and advance the session
    fn step(&mut self) {
        if let Action::Steer(direction) = self.pilot.choose(self.session.state()) {
            self.session.steer(direction);
        }
        self.session.tick();
    }

    /// Returns true when the playback speed changed
    fn handle_event(&mut self, event: Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Speed(preset) => match WatchSpeed::from_preset(preset) {
                Some(speed) if speed != self.speed => {
                    info!(speed = speed.as_str(), "playback speed changed");
                    self.speed = speed;
                    true
                }
                _ => false,
            },
            KeyAction::Pause => {
                self.session.toggle_pause();
                false
            }
            KeyAction::Restart => {
                self.session.restart();
                false
            }
            KeyAction::Quit => {
                self.should_quit = true;
                false
            }
            // The autopilot does the steering here
            KeyAction::Steer(_) | KeyAction::None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_speed_presets() {
        assert_eq!(WatchSpeed::from_preset(1), Some(WatchSpeed::Slow));
        assert_eq!(WatchSpeed::from_preset(4), Some(WatchSpeed::VeryFast));
        assert_eq!(WatchSpeed::from_preset(9), None);
        assert!(WatchSpeed::Slow.tick_interval() > WatchSpeed::Fast.tick_interval());
    }

    #[test]
    fn test_starts_at_configured_tick() {
        let config = GameConfig {
            tick_ms: 80,
            ..GameConfig::small()
        };
        let mut mode = WatchMode::new(config);

        assert_eq!(mode.speed, WatchSpeed::Configured(Duration::from_millis(80)));
        assert_eq!(mode.speed.tick_interval(), Duration::from_millis(80));

        assert!(mode.handle_event(key(KeyCode::Char('1'))));
        assert_eq!(mode.speed.tick_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_speed_key_changes_speed_once() {
        let mut mode = WatchMode::new(GameConfig::small());

        assert!(mode.handle_event(key(KeyCode::Char('3'))));
        assert_eq!(mode.speed, WatchSpeed::Fast);
        assert!(!mode.handle_event(key(KeyCode::Char('3'))));
    }

    #[test]
    fn test_arrow_keys_do_not_steer() {
        let mut mode = WatchMode::new(GameConfig::small());
        assert!(!mode.handle_event(key(KeyCode::Up)));
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut mode = WatchMode::new(GameConfig::small());
        for _ in 0..100 {
            mode.step();
        }
        assert!(mode.metrics().food_eaten > 0);
    }
}
