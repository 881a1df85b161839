use super::operation::RenderOperation;
use super::properties::WindowSize;
use crate::style::Color;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

/// The color of canvas pixels nothing was drawn on.
const BACKGROUND: Color = Color::BLACK;

/// Something render operations can be drawn on.
pub trait Backend {
    fn render(&mut self, operations: &[RenderOperation]) -> io::Result<()>;

    /// Adapt the drawing surface after the window changed size.
    fn resize(&mut self) -> io::Result<()>;
}

/// A text cell placed on top of the pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
struct TextCell {
    ch: char,
    color: Color,
    bold: bool,
}

/// The rasterized contents of the terminal for a single frame.
///
/// Every terminal cell holds two pixels stacked vertically, and optionally a character that
/// hides them.
#[derive(Clone, Debug)]
pub(crate) struct CellGrid {
    columns: usize,
    rows: usize,
    pixels: Vec<Color>,
    text: Vec<Option<TextCell>>,
}

impl CellGrid {
    pub(crate) fn new(window: WindowSize) -> Self {
        let columns = window.columns as usize;
        let rows = window.rows as usize;
        Self { columns, rows, pixels: vec![BACKGROUND; columns * rows * 2], text: vec![None; columns * rows] }
    }

    fn clear(&mut self) {
        self.pixels.fill(BACKGROUND);
        self.text.fill(None);
    }

    fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.columns || y as usize >= self.rows * 2 {
            return;
        }
        self.pixels[y as usize * self.columns + x as usize] = color;
    }

    pub(crate) fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.columns + x]
    }

    fn fill_rect(&mut self, x: f32, y: f32, size: f32, color: Color) {
        let left = x.floor() as i64;
        let top = y.floor() as i64;
        let extent = size.round().max(1.0) as i64;
        for dy in 0..extent {
            for dx in 0..extent {
                self.set_pixel(left + dx, top + dy, color);
            }
        }
    }

    fn put_text(&mut self, text: &str, center_x: f32, y: f32, color: Color, bold: bool) {
        let row = (y / 2.0).floor() as i64;
        if row < 0 || row as usize >= self.rows {
            return;
        }
        let width: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
        let mut column = (center_x - width as f32 / 2.0).round() as i64;
        for ch in text.chars() {
            let ch_width = ch.width().unwrap_or(0) as i64;
            if ch_width == 0 {
                continue;
            }
            // blanks are transparent so the points behind the heart stay visible
            if ch != ' ' && column >= 0 && ((column + ch_width) as usize) <= self.columns {
                let index = row as usize * self.columns + column as usize;
                self.text[index] = Some(TextCell { ch, color, bold });
            }
            column += ch_width;
        }
    }

    #[cfg(test)]
    pub(crate) fn text_at(&self, column: usize, row: usize) -> Option<char> {
        self.text[row * self.columns + column].map(|cell| cell.ch)
    }

    pub(crate) fn apply(&mut self, operations: &[RenderOperation]) {
        for operation in operations {
            match operation {
                RenderOperation::ClearScreen => self.clear(),
                RenderOperation::FillRect { x, y, size, color } => self.fill_rect(*x, *y, *size, *color),
                RenderOperation::RenderText { text, center_x, y, style } => {
                    self.put_text(text, *center_x, *y, style.color, style.bold)
                }
            }
        }
    }

    fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let mut foreground = None;
        let mut background = None;
        let mut bold = false;
        for row in 0..self.rows {
            let mut skip = 0;
            for column in 0..self.columns {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                let top = self.pixel(column, row * 2);
                let bottom = self.pixel(column, row * 2 + 1);
                let (ch, fg, bg, cell_bold) = match self.text[row * self.columns + column] {
                    Some(cell) => {
                        skip = cell.ch.width().unwrap_or(1).saturating_sub(1);
                        (cell.ch, cell.color, BACKGROUND, cell.bold)
                    }
                    None if top == bottom => (' ', top, top, false),
                    None => ('▀', top, bottom, false),
                };
                if cell_bold != bold {
                    let attribute = if cell_bold { Attribute::Bold } else { Attribute::NormalIntensity };
                    queue!(out, SetAttribute(attribute))?;
                    bold = cell_bold;
                }
                if foreground != Some(fg) && ch != ' ' {
                    queue!(out, SetForegroundColor(fg.into()))?;
                    foreground = Some(fg);
                }
                if background != Some(bg) {
                    queue!(out, SetBackgroundColor(bg.into()))?;
                    background = Some(bg);
                }
                queue!(out, Print(ch))?;
            }
            if row + 1 < self.rows {
                queue!(out, ResetColor, Print("\r\n"))?;
                foreground = None;
                background = None;
            }
        }
        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        out.flush()
    }
}

/// Draws frames on a terminal using half block characters.
pub struct TerminalDrawer<W: Write> {
    out: W,
    grid: CellGrid,
}

impl<W: Write> TerminalDrawer<W> {
    pub fn new(out: W, window: WindowSize) -> Self {
        Self { out, grid: CellGrid::new(window) }
    }
}

impl<W: Write> Backend for TerminalDrawer<W> {
    fn render(&mut self, operations: &[RenderOperation]) -> io::Result<()> {
        self.grid.apply(operations);
        self.grid.write_to(&mut self.out)
    }

    fn resize(&mut self) -> io::Result<()> {
        self.grid = CellGrid::new(WindowSize::current()?);
        queue!(self.out, terminal::Clear(terminal::ClearType::All))
    }
}

/// Puts the terminal in raw mode on the alternate screen, and restores it when dropped.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide, terminal::DisableLineWrap) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // best effort: there's nowhere left to report a failure to
        let mut stdout = io::stdout();
        let _ = execute!(stdout, terminal::EnableLineWrap, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TextStyle;

    const WINDOW: WindowSize = WindowSize { rows: 4, columns: 10 };

    #[test]
    fn fill_rect_rounds_size() {
        let mut grid = CellGrid::new(WINDOW);
        grid.apply(&[RenderOperation::FillRect { x: 2.7, y: 3.2, size: 1.6, color: Color::WHITE }]);
        assert_eq!(grid.pixel(2, 3), Color::WHITE);
        assert_eq!(grid.pixel(3, 4), Color::WHITE);
        assert_eq!(grid.pixel(4, 3), BACKGROUND);
        assert_eq!(grid.pixel(1, 3), BACKGROUND);
    }

    #[test]
    fn out_of_bounds_is_clipped() {
        let mut grid = CellGrid::new(WINDOW);
        grid.apply(&[
            RenderOperation::FillRect { x: 9.0, y: 7.0, size: 3.0, color: Color::WHITE },
            RenderOperation::FillRect { x: -5.0, y: -5.0, size: 2.0, color: Color::WHITE },
        ]);
        assert_eq!(grid.pixel(9, 7), Color::WHITE);
    }

    #[test]
    fn centered_text() {
        let mut grid = CellGrid::new(WINDOW);
        let style = TextStyle::new(Color::WHITE);
        grid.apply(&[RenderOperation::RenderText { text: "a bc".into(), center_x: 5.0, y: 3.0, style }]);
        assert_eq!(grid.text_at(3, 1), Some('a'));
        assert_eq!(grid.text_at(4, 1), None);
        assert_eq!(grid.text_at(5, 1), Some('b'));
        assert_eq!(grid.text_at(6, 1), Some('c'));
    }

    #[test]
    fn clear_resets_everything() {
        let mut grid = CellGrid::new(WINDOW);
        let style = TextStyle::new(Color::WHITE);
        grid.apply(&[
            RenderOperation::FillRect { x: 0.0, y: 0.0, size: 1.0, color: Color::WHITE },
            RenderOperation::RenderText { text: "x".into(), center_x: 0.5, y: 0.0, style },
            RenderOperation::ClearScreen,
        ]);
        assert_eq!(grid.pixel(0, 0), BACKGROUND);
        assert_eq!(grid.text_at(0, 0), None);
    }

    #[test]
    fn writes_half_blocks() {
        let mut drawer = TerminalDrawer::new(Vec::new(), WindowSize { rows: 1, columns: 2 });
        drawer
            .render(&[RenderOperation::FillRect { x: 0.0, y: 0.0, size: 1.0, color: Color::WHITE }])
            .expect("render failed");
        let output = String::from_utf8(drawer.out).expect("invalid utf8");
        assert!(output.contains('▀'));
    }
}
