use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum RenderMode {
    /// Render after state changes (tick or crossterm event).
    #[default]
    OnDirty,
    /// Render after state changes, but with minimum interval between renders.
    ///
    /// If events occur faster than the interval, they are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Event loop state management.
///
/// Manages tick/render intervals and returns the next event via `next()`.
/// If the tick interval is not set, no tick events are generated.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Option<Instant>,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop`.
    ///
    /// Tick interval is unset, and render mode defaults to `OnDirty`.
    pub fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: None,
            last_render: past_time,
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the tick interval.
    ///
    /// Pass `None` to disable tick events. Re-enabling ticks restarts the
    /// elapsed-time measurement, so the next tick reports zero.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if interval.is_none() {
            self.last_tick = None;
        }
        self.tick_interval = interval;
    }

    /// Sets the render mode.
    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Returns the next event.
    ///
    /// Blocks until a tick/render time is reached or a crossterm event occurs.
    /// If both tick and render are unset, only waits for crossterm events.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.poll_timers(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns the tick or render event due at `now`, if any.
    fn poll_timers(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(tick_interval) = self.tick_interval
            && self
                .last_tick
                .is_none_or(|last_tick| now.duration_since(last_tick) >= tick_interval)
        {
            let elapsed = self
                .last_tick
                .map_or(Duration::ZERO, |last_tick| now.duration_since(last_tick));
            self.last_tick = Some(now);
            self.dirty = true;
            return Some(TuiEvent::Tick(elapsed));
        }

        let do_render = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if do_render {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self
            .tick_interval
            .map(|interval| self.last_tick.map_or(now, |last_tick| last_tick + interval));
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn tick_elapsed(event: Option<TuiEvent>) -> Option<Duration> {
        match event? {
            TuiEvent::Tick(elapsed) => Some(elapsed),
            _ => None,
        }
    }

    #[test]
    fn test_no_ticks_without_interval() {
        let mut events = EventLoop::new();
        let now = Instant::now();
        assert!(events.poll_timers(now).unwrap().is_render());
        assert!(events.poll_timers(now).is_none());
        assert_eq!(events.compute_timeout(now), None);
    }

    #[test]
    fn test_first_tick_reports_zero_elapsed() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(16 * MS));
        let start = Instant::now();

        assert_eq!(tick_elapsed(events.poll_timers(start)), Some(Duration::ZERO));
    }

    #[test]
    fn test_tick_reports_time_since_previous_tick() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(16 * MS));
        let start = Instant::now();
        events.poll_timers(start);
        // Consume the pending render.
        assert!(events.poll_timers(start).unwrap().is_render());

        assert!(events.poll_timers(start + 10 * MS).is_none());
        assert_eq!(events.compute_timeout(start + 10 * MS), Some(6 * MS));
        assert_eq!(
            tick_elapsed(events.poll_timers(start + 21 * MS)),
            Some(21 * MS)
        );
        assert_eq!(
            tick_elapsed(events.poll_timers(start + 40 * MS)),
            Some(19 * MS)
        );
    }

    #[test]
    fn test_disabling_ticks_resets_measurement() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(16 * MS));
        let start = Instant::now();
        events.poll_timers(start);

        events.set_tick_interval(None);
        events.set_tick_interval(Some(16 * MS));
        assert_eq!(
            tick_elapsed(events.poll_timers(start + 500 * MS)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_on_dirty_renders_once_per_change() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(100 * MS));
        let start = Instant::now();

        assert!(events.poll_timers(start).unwrap().is_tick());
        assert!(events.poll_timers(start).unwrap().is_render());
        assert!(events.poll_timers(start + MS).is_none());
        assert_eq!(events.compute_timeout(start + MS), Some(99 * MS));
    }

    #[test]
    fn test_throttled_render_waits_for_interval() {
        let mut events = EventLoop::new();
        events.set_render_mode(RenderMode::Throttled(50 * MS));
        let start = Instant::now();

        assert!(events.poll_timers(start).unwrap().is_render());
        events.dirty = true;
        assert!(events.poll_timers(start + 10 * MS).is_none());
        assert_eq!(events.compute_timeout(start + 10 * MS), Some(40 * MS));
        assert!(events.poll_timers(start + 50 * MS).unwrap().is_render());
    }
}
