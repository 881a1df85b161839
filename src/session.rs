use crate::animation::heart;
use crate::animation::{build_heart_lines, PointField, Pulse, RevealState, Typewriter};
use crate::audio::Soundtrack;
use crate::config::Config;
use crate::render::operation::{PollableState, RenderOperation};
use crate::render::properties::{CanvasSize, WindowSize};
use crate::style::TextStyle;
use crate::ui;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fastrand::Rng;
use std::time::Instant;
use tracing::{debug, info};

/// The height of a line of heart text, in canvas pixels.
const LINE_HEIGHT: f32 = 2.0;

/// How much the pulse speed changes per key press.
const SPEED_STEP: f32 = 0.02;

/// Longest name accepted from the input.
const MAX_NAME_LENGTH: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Heart,
}

/// What the loop should do after an event was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// All the mutable state of the greeting.
///
/// The frame tick and the UI event handlers are the only things that touch it.
pub struct Session {
    config: Config,
    screen: Screen,
    input_visible: bool,
    name_input: String,
    canvas: CanvasSize,
    rng: Rng,
    field: PointField,
    heart_lines: Vec<String>,
    typewriter: Typewriter,
    pulse: Pulse,
    soundtrack: Box<dyn Soundtrack>,
}

impl Session {
    pub fn new(config: Config, window: WindowSize, soundtrack: Box<dyn Soundtrack>) -> Self {
        let canvas = config.resize.canvas_size(window);
        let mut rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        let field = PointField::initialize(&config.field, canvas, &mut rng);
        let typewriter = Typewriter::new(config.reveal);
        let pulse = Pulse::new(config.pulse.speed, config.pulse.sizing, config.pulse.small, config.pulse.large);
        Self {
            config,
            screen: Screen::Welcome,
            input_visible: true,
            name_input: String::new(),
            canvas,
            rng,
            field,
            heart_lines: Vec::new(),
            typewriter,
            pulse,
            soundtrack,
        }
    }

    /// Leave the welcome screen and show the heart screen.
    pub fn enter(&mut self) {
        if self.screen == Screen::Heart {
            return;
        }
        self.screen = Screen::Heart;
        info!("entered heart screen");
        // best effort: the greeting works the same without audio
        if let Err(e) = self.soundtrack.play() {
            debug!("not playing audio: {e}");
        }
    }

    /// Build the heart for `name` and start typing it.
    ///
    /// Returns whether the reveal started: names that are empty once trimmed are ignored.
    pub fn start(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.screen = Screen::Heart;
        self.input_visible = false;
        self.heart_lines = build_heart_lines(name);
        self.typewriter.start(self.heart_lines.clone());
        info!(name_length = name.chars().count(), "started heart reveal");
        true
    }

    /// Start the reveal with whatever is in the name input.
    pub fn submit(&mut self) -> bool {
        let name = std::mem::take(&mut self.name_input);
        let started = self.start(&name);
        if !started {
            self.name_input = name;
        }
        started
    }

    /// Go back to a blank heart screen with a fresh background.
    pub fn reset(&mut self) {
        self.field = PointField::initialize(&self.config.field, self.canvas, &mut self.rng);
        self.typewriter.reset();
        self.heart_lines.clear();
        self.pulse.reset();
        self.input_visible = true;
        // best effort, same as playing
        if let Err(e) = self.soundtrack.rewind() {
            debug!("not rewinding audio: {e}");
        }
        info!("session reset");
    }

    /// Recompute the canvas after the window changed size.
    ///
    /// Points already on the field are left where they are.
    pub fn resize(&mut self, window: WindowSize) {
        self.canvas = self.config.resize.canvas_size(window);
        debug!(width = self.canvas.width, height = self.canvas.height, "canvas resized");
    }

    /// Speed the heartbeat up or down.
    pub fn change_speed(&mut self, delta: f32) {
        self.pulse.set_speed(self.pulse.speed() + delta);
        debug!(speed = self.pulse.speed(), "pulse speed changed");
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: &Event) -> Flow {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Resize(columns, rows) => {
                self.resize(WindowSize { rows: *rows, columns: *columns });
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Flow {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match (key.code, control) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), true) => return Flow::Quit,
            (KeyCode::Char('r'), true) | (KeyCode::F(5), _) if self.screen == Screen::Heart => self.reset(),
            (KeyCode::Enter, _) if self.screen == Screen::Welcome => self.enter(),
            (KeyCode::Enter, _) if self.input_visible => {
                self.submit();
            }
            (KeyCode::Backspace, _) if self.input_visible => {
                self.name_input.pop();
            }
            (KeyCode::Char(c), false) if self.screen == Screen::Heart && self.input_visible => {
                if self.name_input.chars().count() < MAX_NAME_LENGTH && !c.is_control() {
                    self.name_input.push(c);
                }
            }
            (KeyCode::Char('+'), false) => self.change_speed(SPEED_STEP),
            (KeyCode::Char('-'), false) => self.change_speed(-SPEED_STEP),
            _ => (),
        }
        Flow::Continue
    }

    /// Advance every animation by one frame and produce the operations that draw it.
    pub fn tick(&mut self, now: Instant) -> Vec<RenderOperation> {
        let mut operations = vec![RenderOperation::ClearScreen];
        operations.extend(self.field.advance_and_draw());

        if self.typewriter.advance(now) == PollableState::Done {
            info!("heart reveal complete");
        }
        self.pulse.advance();

        match self.screen {
            Screen::Welcome => operations.extend(ui::welcome_panel(&self.config.ui.title, self.canvas)),
            Screen::Heart => {
                operations.extend(self.heart_operations());
                if self.input_visible {
                    operations.extend(ui::input_panel(&self.config.ui.prompt, &self.name_input, self.canvas));
                } else {
                    operations.extend(ui::controls_panel(self.canvas));
                }
            }
        }
        operations
    }

    fn heart_operations(&self) -> Vec<RenderOperation> {
        let revealed = self.typewriter.revealed();
        if revealed.is_empty() {
            return Vec::new();
        }
        let frame = self.pulse.frame(self.canvas);
        let mut style = TextStyle::new(frame.color).size(frame.font_size);
        if frame.is_expanded() {
            style = style.bold();
        }

        let (center_x, center_y) = self.canvas.center();
        let lines: Vec<&str> = revealed.split('\n').collect();
        let total_height = lines.len() as f32 * LINE_HEIGHT;
        let start_y = center_y - total_height / 2.0 + LINE_HEIGHT / 2.0;
        let width = heart::width();
        lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                // pad the row being typed so it doesn't drift while it grows
                let padding = width.saturating_sub(line.chars().count());
                RenderOperation::RenderText {
                    text: format!("{line}{}", " ".repeat(padding)),
                    center_x,
                    y: start_y + index as f32 * LINE_HEIGHT,
                    style,
                }
            })
            .collect()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    pub fn heart_lines(&self) -> &[String] {
        &self.heart_lines
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn reveal_state(&self) -> RevealState {
        self.typewriter.state()
    }

    pub fn pulse(&self) -> &Pulse {
        &self.pulse
    }

    pub fn input_visible(&self) -> bool {
        self.input_visible
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }
}
