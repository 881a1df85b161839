use crate::render::operation::RenderOperation;
use crate::render::properties::CanvasSize;
use crate::style::Color;
use fastrand::Rng;
use serde::{Deserialize, Serialize};

/// The range a point's blink period is picked from, in frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodRange {
    pub min: i32,
    pub max: i32,
}

impl PeriodRange {
    pub fn is_valid(&self) -> bool {
        self.min >= 1 && self.min <= self.max
    }
}

/// The settings used to populate the background field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldSettings {
    /// How many points the field has.
    pub count: usize,

    /// The range each point's blink period is picked from.
    pub period: PeriodRange,

    /// The color of the points that aren't white.
    pub primary: Color,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self { count: 120, period: PeriodRange { min: 6, max: 30 }, primary: Color::new(255, 68, 68) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointTone {
    Primary,
    White,
}

/// A single blinking point.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub tone: PointTone,
    pub visible: bool,
    pub timer: i32,
    pub period: i32,
}

impl Point {
    fn random(settings: &FieldSettings, canvas: CanvasSize, rng: &mut Rng) -> Self {
        Self {
            x: rng.f32() * canvas.width as f32,
            y: rng.f32() * canvas.height as f32,
            size: rng.f32() * 2.0 + 1.0,
            tone: if rng.f32() < 0.6 { PointTone::Primary } else { PointTone::White },
            visible: rng.f32() < 0.7,
            timer: rng.i32(0..=20),
            period: rng.i32(settings.period.min..=settings.period.max.max(settings.period.min)),
        }
    }

    /// Count down the blink timer, toggling visibility when it expires.
    fn tick(&mut self) {
        self.timer -= 1;
        if self.timer <= 0 {
            self.visible = !self.visible;
            self.timer = self.period;
        }
    }
}

/// The background field: a fixed number of points that blink independently.
#[derive(Clone, Debug)]
pub struct PointField {
    points: Vec<Point>,
    primary: Color,
}

impl PointField {
    /// Create `settings.count` random points spread across the canvas.
    pub fn initialize(settings: &FieldSettings, canvas: CanvasSize, rng: &mut Rng) -> Self {
        let points = (0..settings.count).map(|_| Point::random(settings, canvas, rng)).collect();
        Self { points, primary: settings.primary }
    }

    /// Advance every point by one frame and draw the visible ones.
    pub fn advance_and_draw(&mut self) -> Vec<RenderOperation> {
        let mut operations = Vec::with_capacity(self.points.len());
        for point in &mut self.points {
            point.tick();
            if point.visible {
                let color = match point.tone {
                    PointTone::Primary => self.primary,
                    PointTone::White => Color::WHITE,
                };
                operations.push(RenderOperation::FillRect { x: point.x, y: point.y, size: point.size, color });
            }
        }
        operations
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
