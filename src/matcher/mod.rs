//! Pattern matching for 20-byte addresses.
//!
//! A pattern is a mask/value pair. Bytes are compared in [`PriorityOrder`]
//! so that the most constrained bytes reject non-matches first.

mod pattern;
mod priority;

pub use pattern::Pattern;
pub use priority::PriorityOrder;
