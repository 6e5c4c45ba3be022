use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameConfig, GameState, Position};

const TITLE: &str = "Siedler coming soon";
const TITLE_HEIGHT: u16 = 3;

const BACKGROUND: Color = Color::Black;
const SNAKE_COLOR: Color = Color::LightGreen;
const FOOD_COLOR: Color = Color::Red;

/// Draws the landing page: heading, board, and status lines
pub struct Renderer {
    tile_count: u16,
    cell_width: u16,
}

impl Renderer {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            tile_count: u16::try_from(config.tile_count).unwrap_or(u16::MAX),
            cell_width: config.cell_width,
        }
    }

    /// The bordered board rectangle within `area`.
    ///
    /// Shared with input handling so gestures are only accepted when they
    /// start on the board.
    pub fn board_area(&self, area: Rect) -> Rect {
        let width = self
            .tile_count
            .saturating_mul(self.cell_width)
            .saturating_add(2);
        let height = self.tile_count.saturating_add(2);

        let [_, row, _] = Layout::vertical([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .areas(area);

        let [_, board, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .areas(row);

        board
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState) {
        let area = frame.area();
        let board = self.board_area(area);

        let title_area = Rect {
            height: TITLE_HEIGHT.min(area.height),
            ..area
        };
        frame.render_widget(self.render_title(), title_area);

        frame.render_widget(self.render_grid(state), board);

        let below = board.y.saturating_add(board.height);
        if below < area.bottom() {
            let status_area = Rect::new(area.x, below, area.width, 1);
            frame.render_widget(self.render_status(state), status_area);
        }
        if below.saturating_add(1) < area.bottom() {
            let controls_area = Rect::new(area.x, below + 1, area.width, 1);
            frame.render_widget(self.render_controls(), controls_area);
        }
    }

    fn render_title(&self) -> Paragraph<'static> {
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        let gap = " ".repeat(self.cell_width.saturating_sub(1) as usize);
        let empty = " ".repeat(self.cell_width as usize);
        let mut lines = Vec::with_capacity(self.tile_count as usize);

        for y in 0..self.tile_count {
            let mut spans = Vec::with_capacity(self.tile_count as usize * 2);

            for x in 0..self.tile_count {
                let pos = Position::new(x as i32, y as i32);

                // Food is painted last, so it wins over a snake cell
                let fill = if pos == state.food {
                    Some(FOOD_COLOR)
                } else if state.snake.occupies(pos) {
                    Some(SNAKE_COLOR)
                } else {
                    None
                };

                match fill {
                    Some(color) => {
                        spans.push(Span::styled("█", Style::default().fg(color).bg(BACKGROUND)));
                        spans.push(Span::styled(gap.clone(), Style::default().bg(BACKGROUND)));
                    }
                    None => spans.push(Span::styled(empty.clone(), Style::default().bg(BACKGROUND))),
                }
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::White))
                .style(Style::default().bg(BACKGROUND)),
        )
    }

    fn render_status(&self, state: &GameState) -> Paragraph<'static> {
        let line = if state.is_game_over() {
            Line::from(Span::styled(
                "Game Over",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from("")
        };

        Paragraph::new(line).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        Paragraph::new(Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("swipe", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]))
        .alignment(Alignment::Center)
    }
}
