pub mod operation;
pub mod properties;
pub mod resize;
pub mod terminal;

pub use operation::{PollableState, RenderOperation};
pub use properties::{CanvasSize, WindowSize};
pub use terminal::{Backend, TerminalDrawer, TerminalGuard};
