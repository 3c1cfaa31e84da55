use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use super::terminal::{self, Tui};
use crate::game::GameConfig;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::session::Session;

/// Roughly 30 frames per second
pub(crate) const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Keyboard-controlled play
pub struct PlayMode {
    session: Session,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            session: Session::new(config),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub fn metrics(&self) -> &GameMetrics {
        self.session.metrics()
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = terminal::setup()?;
        info!(config = ?self.session.config(), "play mode started");

        let result = self.run_game_loop(&mut terminal).await;

        terminal::restore(&mut terminal)?;
        info!(
            rounds = self.session.metrics().rounds_played,
            best = self.session.metrics().high_score,
            "play mode finished"
        );

        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.session.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut render_timer = interval(FRAME_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    self.session.tick();
                }

                _ = render_timer.tick() => {
                    self.session.metrics_mut().update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, None);
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

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => self.session.steer(direction),
            KeyAction::Pause => self.session.toggle_pause(),
            KeyAction::Restart => {
                debug!("restart requested");
                self.session.restart();
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Speed(_) | KeyAction::None => {}
        }
    }
}
