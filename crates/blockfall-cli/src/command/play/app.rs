use std::time::Duration;

use blockfall_engine::GameSession;
use blockfall_runtime::{App, RenderMode, Runtime};
use crossterm::event::Event;
use ratatui::Frame;

use super::screen::PlayScreen;

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
    fps: u16,
}

impl PlayApp {
    pub fn new(session: GameSession, fps: u16) -> Self {
        Self {
            screen: PlayScreen::new(session),
            fps,
        }
    }

    pub fn session(&self) -> &GameSession {
        self.screen.session()
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        let rate = f64::from(self.fps);
        runtime.set_tick_rate(Some(rate));
        runtime.set_render_mode(RenderMode::throttled_from_rate(rate));
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        self.screen.update(elapsed);
    }
}
