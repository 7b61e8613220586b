//! Minimal host runtime for terminal games.
//!
//! [`Runtime`] owns the event loop and drives an [`App`]: it calls
//! [`App::update`] once per tick with the wall-clock time elapsed since the
//! previous tick, [`App::draw`] according to the [`RenderMode`], and
//! [`App::handle_event`] for terminal input.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
