use std::time::Duration;

use blockfall_engine::{GameSession, SessionState};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay};

const IDLE_BINDINGS: &[KeyBinding] = &[(&["Enter", "Space"], "Start"), (&["Q", "Esc"], "Quit")];
const RUNNING_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["Q", "Esc"], "Quit"),
];
const PAUSED_BINDINGS: &[KeyBinding] = &[(&["P"], "Resume"), (&["Q", "Esc"], "Quit")];
const GAME_OVER_BINDINGS: &[KeyBinding] =
    &[(&["Enter", "Space"], "Play Again"), (&["Q", "Esc"], "Quit")];

/// Interactive play: maps keys to session intents and renders the session.
#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let bindings = match self.session.session_state() {
            SessionState::Idle => IDLE_BINDINGS,
            SessionState::Running => RUNNING_BINDINGS,
            SessionState::Paused => PAUSED_BINDINGS,
            SessionState::GameOver => GAME_OVER_BINDINGS,
        };
        let session_display = SessionDisplay::new(&self.session);
        let help = KeyBindingDisplay::new(bindings);

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help, help_area);
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        if event.kind == KeyEventKind::Release {
            return;
        }

        let is_running = self.session.session_state().is_running();
        match event.code {
            KeyCode::Left => _ = self.session.move_left(),
            KeyCode::Right => _ = self.session.move_right(),
            KeyCode::Down => _ = self.session.soft_drop(),
            KeyCode::Up => _ = self.session.rotate(),
            KeyCode::Char(' ') if is_running => _ = self.session.hard_drop(),
            KeyCode::Char(' ') | KeyCode::Enter => self.session.start(),
            KeyCode::Char('p' | 'P') => self.session.toggle_pause(),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    pub fn update(&mut self, elapsed: Duration) {
        self.session.tick(elapsed);
    }
}
