/// The size of the terminal window, in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowSize {
    pub rows: u16,
    pub columns: u16,
}

impl WindowSize {
    /// Get the current terminal size.
    pub fn current() -> std::io::Result<Self> {
        let (columns, rows) = crossterm::terminal::size()?;
        Ok(Self { rows, columns })
    }
}

impl From<(u16, u16)> for WindowSize {
    fn from((columns, rows): (u16, u16)) -> Self {
        Self { rows, columns }
    }
}

/// The size of the drawing surface, in canvas pixels.
///
/// A canvas pixel is one terminal column wide and half a terminal row tall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u16,
    pub height: u16,
}

impl CanvasSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// The point every centered element is laid out around.
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    /// How many terminal rows are needed to show this canvas.
    pub fn rows(&self) -> u16 {
        self.height.div_ceil(2)
    }
}
