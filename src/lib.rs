//! Weighted random selection.
//!
//! A [`Chooser`] sorts its [`Choice`]s once and keeps a table of running
//! weight totals, so every later pick is a binary search rather than a walk
//! over the whole list. Use it when many picks are made from the same set.
//! For a single pick from a throwaway list, [`linear::weighted_random`] is
//! simpler.
pub mod choice;
pub mod chooser;
pub mod error;
pub mod linear;

pub use choice::Choice;
pub use chooser::Chooser;
pub use error::Error;
