use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A signed weight was negative. `index` is the position of the offending
    /// choice in the input, or 0 for a lone [`crate::Choice`].
    #[error("invalid weight {weight} at choice {index}: weights must be non-negative")]
    InvalidWeight { index: usize, weight: i64 },
    /// The running total no longer fits in a `u64` once choice `index` is added.
    #[error("total weight overflows u64 at choice {index}")]
    WeightOverflow { index: usize },
    /// Nothing can be picked: there are no choices, or every weight is zero.
    #[error("cannot pick when the total weight is zero")]
    EmptyOrZeroTotal,
}
