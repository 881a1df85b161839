use crate::render::operation::PollableState;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How fast the typewriter reveals characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RevealPacing {
    /// One step every frame, so the speed follows the frame rate.
    PerFrame,

    /// One step every `millis` milliseconds, regardless of the frame rate.
    Interval { millis: u64 },
}

impl Default for RevealPacing {
    fn default() -> Self {
        Self::Interval { millis: 75 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Idle,
    Revealing,
    Complete,
}

/// The position of the typewriter within the heart lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealCursor {
    pub row: usize,
    pub column: usize,
}

/// Typewriter reveal: gradually copies the heart lines into the revealed text.
#[derive(Debug)]
pub struct Typewriter {
    pacing: RevealPacing,
    state: RevealState,
    source: Vec<Vec<char>>,
    cursor: RevealCursor,
    revealed: String,
    last_step: Option<Instant>,
}

impl Typewriter {
    pub fn new(pacing: RevealPacing) -> Self {
        Self {
            pacing,
            state: RevealState::Idle,
            source: Vec::new(),
            cursor: RevealCursor::default(),
            revealed: String::new(),
            last_step: None,
        }
    }

    /// Start revealing a new set of lines, discarding anything revealed so far.
    pub fn start(&mut self, lines: Vec<String>) {
        self.source = lines.into_iter().map(|line| line.chars().collect()).collect();
        self.cursor = RevealCursor::default();
        self.revealed.clear();
        self.last_step = None;
        self.state = if self.source.is_empty() { RevealState::Complete } else { RevealState::Revealing };
    }

    /// Stop revealing and forget everything.
    pub fn reset(&mut self) {
        self.state = RevealState::Idle;
        self.source.clear();
        self.cursor = RevealCursor::default();
        self.revealed.clear();
        self.last_step = None;
    }

    /// Advance the reveal for a frame rendered at `now`.
    ///
    /// With per frame pacing this performs a single step. With interval pacing it performs one
    /// step per whole interval elapsed since the last step, so slow frames catch up.
    pub fn advance(&mut self, now: Instant) -> PollableState {
        if self.state != RevealState::Revealing {
            return PollableState::Unmodified;
        }
        let steps = match self.pacing {
            RevealPacing::PerFrame => 1,
            RevealPacing::Interval { millis } => {
                let interval = Duration::from_millis(millis.max(1));
                let Some(last_step) = self.last_step else {
                    // the first frame only starts the clock
                    self.last_step = Some(now);
                    return PollableState::Unmodified;
                };
                let elapsed = now.saturating_duration_since(last_step);
                let steps = (elapsed.as_nanos() / interval.as_nanos()) as u32;
                self.last_step = Some(last_step + interval * steps);
                steps
            }
        };
        if steps == 0 {
            return PollableState::Unmodified;
        }
        for _ in 0..steps {
            if self.step() == PollableState::Done {
                return PollableState::Done;
            }
        }
        PollableState::Modified
    }

    /// Perform a single reveal step.
    pub fn step(&mut self) -> PollableState {
        if self.state != RevealState::Revealing {
            return PollableState::Unmodified;
        }
        let Some(row) = self.source.get(self.cursor.row) else {
            self.state = RevealState::Complete;
            return PollableState::Done;
        };
        if self.cursor.column == 0 {
            self.revealed.push('\n');
        }
        if let Some(c) = row.get(self.cursor.column) {
            self.revealed.push(*c);
            self.cursor.column += 1;
        } else {
            self.cursor.row += 1;
            self.cursor.column = 0;
        }
        if self.cursor.row >= self.source.len() {
            self.state = RevealState::Complete;
            return PollableState::Done;
        }
        PollableState::Modified
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn cursor(&self) -> RevealCursor {
        self.cursor
    }

    /// The text revealed so far. Every row starts with a line break.
    pub fn revealed(&self) -> &str {
        &self.revealed
    }

    pub fn pacing(&self) -> RevealPacing {
        self.pacing
    }
}
