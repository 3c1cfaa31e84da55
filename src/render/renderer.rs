use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{GameState, Position};
use crate::session::Session;

const HEAD: &str = "■ ";
const BODY: &str = "■ ";
const FOOD: &str = "● ";
const EMPTY: &str = "· ";

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the whole screen; `label` is an optional extra header entry such as the playback speed
    pub fn render(&self, frame: &mut Frame, session: &Session, label: Option<&str>) {
        let state = session.state();
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(frame.area());

        frame.render_widget(self.render_stats(session, label), header);

        // Two columns per cell plus the border
        let grid_width = (state.grid_width * 2 + 2) as u16;
        let grid_height = (state.grid_height + 2) as u16;
        let game_area = centered(body, grid_width, grid_height);

        if state.is_alive() {
            frame.render_widget(self.render_grid(state), game_area);
        } else {
            frame.render_widget(self.render_game_over(state), game_area);
        }

        if session.is_paused() {
            let overlay = centered(game_area, 20, 3);
            frame.render_widget(Clear, overlay);
            frame.render_widget(self.render_paused(), overlay);
        }

        frame.render_widget(self.render_controls(), footer);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        let head = state.snake.head();
        let lines: Vec<Line> = (0..state.grid_height as i32)
            .map(|y| {
                let spans: Vec<Span> = (0..state.grid_width as i32)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        if pos == head {
                            Span::styled(
                                HEAD,
                                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                            )
                        } else if state.is_occupied_by_snake(pos) {
                            Span::styled(BODY, Style::default().fg(Color::Green))
                        } else if state.food == Some(pos) {
                            Span::styled(
                                FOOD,
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled(EMPTY, Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).style(Style::default().bg(Color::Black)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, session: &Session, label: Option<&str>) -> Paragraph<'static> {
        let state = session.state();
        let metrics = session.metrics();
        let key = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Score: ", key),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", key),
            Span::styled(state.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", key),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Rounds: ", key),
            Span::styled(metrics.rounds_played.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", key),
            Span::styled(metrics.format_time(), value),
        ];
        if let Some(end) = metrics.last_round_end {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("Last: ", key));
            spans.push(Span::styled(end.to_string(), Style::default().fg(Color::Gray)));
        }
        if let Some(label) = label {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(label.to_string(), Style::default().fg(Color::Cyan)));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'static> {
        let reason = state
            .round_over
            .map(|end| format!("The snake {end}"))
            .unwrap_or_default();

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_paused(&self) -> Paragraph<'static> {
        Paragraph::new(Span::styled(
            "PAUSED",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rect centered in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
