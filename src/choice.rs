use super::error::Error;
use log::debug;
use serde::{Deserialize, Serialize};

///
/// An item paired with its relative weight.
///
/// A weight of zero is allowed; the item is then never picked.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice<T> {
    pub item: T,
    pub weight: u64,
}

impl<T> Choice<T> {
    pub fn new(item: T, weight: u64) -> Choice<T> {
        Choice { item, weight }
    }

    /// For callers that hold weights as signed integers. Negative weights are rejected.
    pub fn try_new(item: T, weight: i64) -> Result<Choice<T>, Error> {
        match u64::try_from(weight) {
            Ok(weight) => Ok(Choice { item, weight }),
            Err(_) => {
                debug!("Rejecting negative weight {}", weight);
                Err(Error::InvalidWeight { index: 0, weight })
            }
        }
    }
}

impl<T> From<(T, u64)> for Choice<T> {
    fn from((item, weight): (T, u64)) -> Self {
        Choice::new(item, weight)
    }
}
