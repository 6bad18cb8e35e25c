//! Shift attendance engine: time parsing, schedule resolution, punch
//! matching and the punch state machine. Pure computation, no I/O.

pub mod matcher;
pub mod parser;
pub mod resolver;
pub mod state;

pub use matcher::{MatchedPunch, MatchedShift, carried_over, match_days, match_shifts};
pub use parser::{normalize, split_segments};
pub use resolver::{resolve, resolve_with_holidays};
pub use state::{StateInput, evaluate};
