use crate::style::{Color, TextStyle};

/// A drawing command produced by the session for a single frame.
///
/// Coordinates are expressed in canvas pixels. Backends decide how a pixel maps onto their
/// output surface.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOperation {
    /// Clear the whole canvas.
    ClearScreen,

    /// Paint a filled square whose top left corner is at `(x, y)`.
    FillRect { x: f32, y: f32, size: f32, color: Color },

    /// Render a single line of text horizontally centered on `center_x`, with its vertical
    /// middle at `y`.
    RenderText { text: String, center_x: f32, y: f32, style: TextStyle },
}

/// The state of a pollable after being polled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollableState {
    Unmodified,
    Modified,
    Done,
}
