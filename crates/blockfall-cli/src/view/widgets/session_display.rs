use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, format_score, style};

/// Full game view: stats, playfield, next-piece preview and state overlays.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    fn border_color(&self) -> Color {
        match self.session.session_state() {
            SessionState::Idle => color::GRAY,
            SessionState::Running => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        }
    }

    fn board(&self) -> BoardDisplay<'a> {
        BoardDisplay::new(self.session.grid())
            .falling_piece(self.session.falling_piece().copied())
            .block(
                Block::bordered()
                    .border_style(self.border_color())
                    .style(style::DEFAULT),
            )
    }

    fn panel(&self, title: &'a str) -> Block<'a> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::symmetric(
                self.horizontal_padding,
                self.vertical_padding,
            ))
            .border_style(self.border_color())
            .style(style::DEFAULT)
    }

    /// Rows needed to show the whole view.
    pub fn height(&self) -> u16 {
        let stats = SessionStatsDisplay::new(self.session).block(self.panel("STATS"));
        let next = PieceDisplay::new().block(self.panel("NEXT"));
        [self.board().height(), stats.height(), next.height()]
            .into_iter()
            .max()
            .unwrap_or_default()
    }

    /// Returns the overlay title, message and style for the current state.
    fn popup(&self) -> Option<(&'static str, Option<String>, Style)> {
        match self.session.session_state() {
            SessionState::Running => None,
            SessionState::Idle => Some((
                "PRESS ENTER",
                Some("to start".to_owned()),
                Style::new().fg(color::WHITE).bg(color::DARK_GRAY),
            )),
            SessionState::Paused => Some((
                "PAUSED",
                None,
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            )),
            SessionState::GameOver => Some((
                "GAME OVER",
                Some(format!("SCORE {}", format_score(self.session.stats().score()))),
                Style::new().fg(color::WHITE).bg(color::RED),
            )),
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let game_board = self.board();
        let next_panel = PieceDisplay::new()
            .piece(self.session.next_piece())
            .block(self.panel("NEXT"));
        let session_stats = SessionStatsDisplay::new(self.session).block(self.panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some((title, message, style)) = self.popup() {
            let mut lines = vec![Line::from(title)];
            lines.extend(message.map(Line::from));
            let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

            let block = Block::new().style(style);
            let text = Text::from(lines).style(style).centered();
            let area = board_area.centered(
                Constraint::Length(game_board_width),
                Constraint::Length(height + 2),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(height)), buf);
        }
    }
}
