//! A terminal greeting: a name typed into a pulsing heart over a field of twinkling points.

pub mod animation;
pub mod audio;
pub mod config;
pub mod driver;
pub mod render;
pub mod session;
pub mod style;

mod ui;

pub use config::{Config, ConfigError, ThemeName};
pub use driver::{Driver, EventSource, TerminalEvents};
pub use session::{Flow, Screen, Session};
