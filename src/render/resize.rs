use super::properties::{CanvasSize, WindowSize};
use serde::{Deserialize, Serialize};

/// How the canvas is sized from the terminal window.
///
/// The canvas takes the whole window minus a margin, and never grows past a maximum size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizePolicy {
    /// The maximum canvas width, in pixels.
    pub max_width: u16,

    /// The maximum canvas height, in pixels.
    pub max_height: u16,

    /// Columns left out of the canvas.
    pub margin_columns: u16,

    /// Rows left out of the canvas, used by the input panel at the bottom of the screen.
    pub margin_rows: u16,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self { max_width: 900, max_height: 700, margin_columns: 0, margin_rows: 2 }
    }
}

impl ResizePolicy {
    /// Compute the canvas size for a window.
    pub fn canvas_size(&self, window: WindowSize) -> CanvasSize {
        let width = window.columns.saturating_sub(self.margin_columns).clamp(1, self.max_width.max(1));
        let height = window.rows.saturating_sub(self.margin_rows).saturating_mul(2).clamp(1, self.max_height.max(1));
        CanvasSize::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::fits(WindowSize { columns: 80, rows: 24 }, CanvasSize::new(80, 44))]
    #[case::clamped(WindowSize { columns: 2000, rows: 1000 }, CanvasSize::new(900, 700))]
    #[case::tiny(WindowSize { columns: 0, rows: 1 }, CanvasSize::new(1, 1))]
    fn canvas_size(#[case] window: WindowSize, #[case] expected: CanvasSize) {
        assert_eq!(ResizePolicy::default().canvas_size(window), expected);
    }

    #[test]
    fn margins_are_removed() {
        let policy = ResizePolicy { margin_columns: 10, margin_rows: 4, ..Default::default() };
        let canvas = policy.canvas_size(WindowSize { columns: 100, rows: 30 });
        assert_eq!(canvas, CanvasSize::new(90, 52));
        assert_eq!(canvas.center(), (45.0, 26.0));
    }
}
