use super::error::Error;
use rand::Rng;

/// Single weighted pick by walking the running total.
///
/// O(n) per call with no setup, so it suits a list that is picked from once.
/// For repeated picks from the same list build a [`crate::Chooser`] instead.
pub fn weighted_random<T, R: Rng + ?Sized>(items: Vec<(T, u64)>, rng: &mut R) -> Result<T, Error> {
    let total_weight = items
        .iter()
        .enumerate()
        .try_fold(0u64, |total, (index, (_, weight))| {
            total
                .checked_add(*weight)
                .ok_or(Error::WeightOverflow { index })
        })?;
    if total_weight == 0 {
        return Err(Error::EmptyOrZeroTotal);
    }
    let random = rng.gen_range(0..total_weight);
    let mut current_weight = 0;
    for (item, weight) in items {
        current_weight += weight;
        if current_weight > random {
            return Ok(item);
        }
    }
    unreachable!()
}
