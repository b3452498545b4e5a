//! Intent resolution and action execution
//!
//! `resolver` turns raw user text into a structured `Action`;
//! `executor` realizes an `Action` as an ordered sequence of
//! playback calls.

pub mod executor;
pub mod resolver;

pub use executor::execute;
pub use resolver::{resolve, Action, ActionKind};
