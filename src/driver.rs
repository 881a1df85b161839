use crate::render::operation::RenderOperation;
use crate::render::terminal::Backend;
use crate::session::{Flow, Session};
use crossterm::event::{self, Event};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Where the driver gets terminal events from.
pub trait EventSource {
    /// Wait up to `timeout` for the next event.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Reads events from the terminal.
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? { event::read().map(Some) } else { Ok(None) }
    }
}

/// The render loop: dispatches events to the session and draws a frame at a fixed rate.
pub struct Driver {
    session: Session,
    frame_duration: Duration,
    frames: u64,
}

impl Driver {
    pub fn new(session: Session, fps: u32) -> Self {
        let frame_duration = Duration::from_secs(1) / fps.max(1);
        Self { session, frame_duration, frames: 0 }
    }

    /// Run a single frame.
    pub fn advance(&mut self, now: Instant) -> Vec<RenderOperation> {
        self.frames += 1;
        self.session.tick(now)
    }

    /// Run until the session asks to quit.
    pub fn run<B, E>(&mut self, backend: &mut B, events: &mut E) -> io::Result<()>
    where
        B: Backend,
        E: EventSource,
    {
        let mut next_frame = Instant::now();
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if let Some(event) = events.next_event(timeout)? {
                if self.session.handle_event(&event) == Flow::Quit {
                    debug!(frames = self.frames, "render loop finished");
                    return Ok(());
                }
                if let Event::Resize(..) = event {
                    backend.resize()?;
                }
                continue;
            }
            let now = Instant::now();
            let operations = self.advance(now);
            backend.render(&operations)?;
            next_frame += self.frame_duration;
            if next_frame < now {
                // too far behind, don't try to catch up on missed frames
                next_frame = now + self.frame_duration;
            }
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::RevealPacing;
    use crate::audio::Silence;
    use crate::config::Config;
    use crate::render::properties::WindowSize;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    const WINDOW: WindowSize = WindowSize { rows: 24, columns: 80 };

    fn driver() -> Driver {
        let config = Config { seed: Some(11), ..Default::default() };
        Driver::new(Session::new(config, WINDOW, Box::new(Silence::default())), 60)
    }

    #[derive(Default)]
    struct RecordingBackend {
        frames: Vec<Vec<RenderOperation>>,
        resizes: usize,
    }

    impl Backend for RecordingBackend {
        fn render(&mut self, operations: &[RenderOperation]) -> io::Result<()> {
            self.frames.push(operations.to_vec());
            Ok(())
        }

        fn resize(&mut self) -> io::Result<()> {
            self.resizes += 1;
            Ok(())
        }
    }

    /// Replays events, then quits after a fixed number of empty polls.
    struct ScriptedEvents {
        events: VecDeque<Event>,
        idle_polls: usize,
    }

    impl EventSource for ScriptedEvents {
        fn next_event(&mut self, _timeout: Duration) -> io::Result<Option<Event>> {
            if let Some(event) = self.events.pop_front() {
                return Ok(Some(event));
            }
            if self.idle_polls == 0 {
                return Ok(Some(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))));
            }
            self.idle_polls -= 1;
            Ok(None)
        }
    }

    #[test]
    fn advance_draws_visible_points() {
        let mut driver = driver();
        let operations = driver.advance(Instant::now());
        assert_eq!(operations.first(), Some(&RenderOperation::ClearScreen));
        let rects = operations.iter().filter(|op| matches!(op, RenderOperation::FillRect { .. })).count();
        let visible = driver.session().field().points().iter().filter(|p| p.visible).count();
        assert_eq!(rects, visible);
        assert_eq!(driver.frames(), 1);
    }

    #[test]
    fn run_until_quit() {
        let mut driver = Driver::new(
            Session::new(
                Config { seed: Some(2), fps: 240, reveal: RevealPacing::PerFrame, ..Default::default() },
                WINDOW,
                Box::new(Silence::default()),
            ),
            240,
        );
        let mut backend = RecordingBackend::default();
        let mut events = ScriptedEvents {
            events: VecDeque::from([
                Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
                Event::Key(KeyEvent::new(KeyCode::Char('J'), KeyModifiers::NONE)),
                Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
                Event::Resize(100, 30),
            ]),
            idle_polls: 5,
        };
        driver.run(&mut backend, &mut events).expect("run failed");
        assert_eq!(backend.frames.len(), 5);
        assert_eq!(backend.resizes, 1);
        assert_eq!(driver.session().heart_lines(), crate::animation::build_heart_lines("J"));
        let last = backend.frames.last().expect("no frames");
        assert!(last.iter().any(|op| matches!(op, RenderOperation::RenderText { style, .. } if style.size > 0.0)));
    }
}
