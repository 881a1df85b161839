pub mod field;
pub mod heart;
pub mod pulse;
pub mod typewriter;

pub use field::{FieldSettings, PeriodRange, PointField};
pub use heart::build_heart_lines;
pub use pulse::{Pulse, PulseFrame, PulseSizing};
pub use typewriter::{RevealCursor, RevealPacing, RevealState, Typewriter};
