use crate::render::properties::CanvasSize;
use crate::style::Color;
use serde::{Deserialize, Serialize};

/// How the pulsing font size is computed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PulseSizing {
    /// A fixed base size plus a fixed amplitude.
    Fixed { base: f32, amplitude: f32 },

    /// A base size proportional to the smallest canvas dimension, with an amplitude of a third
    /// of that base.
    Viewport { divisor: f32 },
}

impl PulseSizing {
    /// Whether every size is finite and positive.
    pub fn is_valid(&self) -> bool {
        let positive = |value: f32| value.is_finite() && value > 0.0;
        match *self {
            Self::Fixed { base, amplitude } => positive(base) && positive(amplitude),
            Self::Viewport { divisor } => positive(divisor),
        }
    }

    fn base_and_amplitude(&self, canvas: CanvasSize) -> (f32, f32) {
        match *self {
            Self::Fixed { base, amplitude } => (base, amplitude),
            Self::Viewport { divisor } => {
                let base = canvas.width.min(canvas.height) as f32 / divisor.max(f32::EPSILON);
                (base, base / 3.0)
            }
        }
    }
}

impl Default for PulseSizing {
    fn default() -> Self {
        Self::Fixed { base: 18.0, amplitude: 7.0 }
    }
}

/// The scale applied to the pulse size when drawing the heart text.
pub const TEXT_SCALE: f32 = 2.2;

/// The heartbeat blend factor for a phase, in `[0, 1]`.
pub fn blend_factor(phase: f32) -> f32 {
    (0.5 + 0.5 * phase.sin()).clamp(0.0, 1.0)
}

/// What the pulse looks like on a given frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseFrame {
    /// The blend factor, in `[0, 1]`.
    pub t: f32,
    pub font_size: f32,
    pub color: Color,
    /// The font size halfway through the beat.
    pub midpoint_size: f32,
}

impl PulseFrame {
    /// Whether the beat is in its expanded half.
    pub fn is_expanded(&self) -> bool {
        self.font_size >= self.midpoint_size
    }
}

/// Pulse colorizer: a sinusoidal heartbeat that drives both the text size and color.
#[derive(Clone, Debug)]
pub struct Pulse {
    phase: f32,
    speed: f32,
    sizing: PulseSizing,
    small: Color,
    large: Color,
}

impl Pulse {
    pub const MIN_SPEED: f32 = 0.01;
    pub const MAX_SPEED: f32 = 0.5;

    pub fn new(speed: f32, sizing: PulseSizing, small: Color, large: Color) -> Self {
        Self { phase: 0.0, speed: speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED), sizing, small, large }
    }

    /// Move the phase forward by one frame.
    pub fn advance(&mut self) {
        self.phase += self.speed;
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Change the phase increment, keeping it within sane bounds.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(Self::MIN_SPEED, Self::MAX_SPEED);
    }

    /// Compute the size and color for the current phase.
    pub fn frame(&self, canvas: CanvasSize) -> PulseFrame {
        let t = blend_factor(self.phase);
        let (base, amplitude) = self.sizing.base_and_amplitude(canvas);
        PulseFrame {
            t,
            font_size: (base + amplitude * t) * TEXT_SCALE,
            color: Color::mix(self.small, self.large, t),
            midpoint_size: (base + amplitude * 0.5) * TEXT_SCALE,
        }
    }
}
