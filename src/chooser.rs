use super::choice::Choice;
use super::error::Error;
use log::{debug, trace, warn};
use rand::Rng;

///
/// Caches a set of [`Choice`]s for repeated weighted random picks.
///
/// Choices are sorted by ascending weight and paired with a table of running
/// totals, so `totals[i]` is the sum of the weights at `0..=i`. A pick draws
/// `r` uniformly from `1..=total` and binary searches for the first running
/// total that is at least `r`.
///
/// The chooser is never modified after construction. To reweight, build a new one.
///
#[derive(Debug, Clone)]
pub struct Chooser<T> {
    data: Vec<Choice<T>>,
    totals: Vec<u64>,
    max: u64,
}

impl<T> Chooser<T> {
    /// Builds a chooser. Empty or all-zero input is fine here; it is `pick` that fails.
    pub fn new<I>(choices: I) -> Result<Chooser<T>, Error>
    where
        I: IntoIterator<Item = Choice<T>>,
    {
        let mut data: Vec<Choice<T>> = choices.into_iter().collect();

        // Checked in input order so the index means something to the caller
        let max = data
            .iter()
            .enumerate()
            .try_fold(0u64, |total, (index, choice)| {
                total
                    .checked_add(choice.weight)
                    .ok_or(Error::WeightOverflow { index })
            })
            .inspect_err(|err| debug!("Rejecting choices: {}", err))?;

        data.sort_by_key(|choice| choice.weight);

        // Every prefix is bounded by max, so this cannot overflow
        let totals: Vec<u64> = data
            .iter()
            .scan(0u64, |running_total, choice| {
                *running_total += choice.weight;
                Some(*running_total)
            })
            .collect();

        trace!("Built chooser with {} choices, total {}", data.len(), max);
        if max == 0 {
            warn!("Chooser has zero total weight; every pick will fail");
        }

        Ok(Chooser { data, totals, max })
    }

    ///
    /// Builds a chooser from signed weights, rejecting the first negative one.
    ///
    pub fn from_signed<I>(choices: I) -> Result<Chooser<T>, Error>
    where
        I: IntoIterator<Item = (T, i64)>,
    {
        let choices = choices
            .into_iter()
            .enumerate()
            .map(|(index, (item, weight))| {
                Choice::try_new(item, weight).map_err(|_| Error::InvalidWeight { index, weight })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Chooser::new(choices)
    }

    /// Picks using the thread-local random source.
    pub fn pick(&self) -> Result<&T, Error> {
        self.pick_with(&mut rand::thread_rng())
    }

    ///
    /// Picks using the supplied random source.
    ///
    /// Only the draw uses `rng`; the chooser itself is read-only, so one
    /// chooser can be shared across threads that each bring their own source.
    ///
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T, Error> {
        if self.max == 0 {
            debug!("Pick attempted on a chooser with zero total weight");
            return Err(Error::EmptyOrZeroTotal);
        }
        let r = rng.gen_range(1..=self.max);
        self.search(r).ok_or(Error::EmptyOrZeroTotal)
    }

    ///
    /// Returns the item whose bucket holds `r`, or `None` if `r` is outside `1..=total`.
    ///
    /// This is the deterministic half of a pick: the same `r` always gives the same item.
    ///
    pub fn search(&self, r: u64) -> Option<&T> {
        if r == 0 || r > self.max {
            return None;
        }
        let index = self.totals.partition_point(|&total| total < r);
        self.data.get(index).map(|choice| &choice.item)
    }

    pub fn total(&self) -> u64 {
        self.max
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Running totals, index-aligned with [`Chooser::choices`].
    pub fn totals(&self) -> &[u64] {
        &self.totals
    }

    /// The choices in ascending weight order.
    pub fn choices(&self) -> &[Choice<T>] {
        &self.data
    }

    pub fn into_choices(self) -> Vec<Choice<T>> {
        self.data
    }
}

impl<T> TryFrom<Vec<Choice<T>>> for Chooser<T> {
    type Error = Error;

    fn try_from(choices: Vec<Choice<T>>) -> Result<Self, Self::Error> {
        Chooser::new(choices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn abc() -> Chooser<&'static str> {
        Chooser::new(vec![
            Choice::new("C", 98),
            Choice::new("A", 1),
            Choice::new("B", 1),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_sorts_and_accumulates() {
        let chooser = abc();
        let weights: Vec<u64> = chooser.choices().iter().map(|c| c.weight).collect();
        assert_eq!(weights, vec![1, 1, 98]);
        assert_eq!(chooser.totals(), &[1, 2, 100]);
        assert_eq!(chooser.total(), 100);
        assert_eq!(chooser.len(), 3);
        assert!(!chooser.is_empty());
    }

    #[test]
    fn test_totals_non_decreasing_and_end_at_total() {
        let chooser = Chooser::new(
            [5, 0, 3, 3, 12, 0, 1]
                .iter()
                .enumerate()
                .map(|(i, w)| Choice::new(i, *w)),
        )
        .unwrap();
        assert!(chooser.totals().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*chooser.totals().last().unwrap(), chooser.total());
        assert_eq!(chooser.total(), 24);
    }

    #[test]
    fn test_search_boundaries() {
        let chooser = abc();
        let first = chooser.search(1).unwrap();
        assert!(*first == "A" || *first == "B");
        assert_eq!(chooser.search(3), Some(&"C"));
        assert_eq!(chooser.search(100), Some(&"C"));
        assert_eq!(chooser.search(0), None);
        assert_eq!(chooser.search(101), None);
    }

    #[test]
    fn test_search_is_deterministic() {
        let chooser = abc();
        for r in 1..=chooser.total() {
            assert_eq!(chooser.search(r), chooser.search(r));
        }
    }

    #[test]
    fn test_search_skips_zero_weights() {
        let chooser = Chooser::new(vec![
            Choice::new("zero", 0),
            Choice::new("a", 2),
            Choice::new("also zero", 0),
            Choice::new("b", 3),
        ])
        .unwrap();
        for r in 1..=chooser.total() {
            let item = *chooser.search(r).unwrap();
            assert!(item == "a" || item == "b", "r={} gave {}", r, item);
        }
    }

    #[test]
    fn test_empty_chooser_cannot_pick() {
        let chooser: Chooser<u8> = Chooser::new(vec![]).unwrap();
        assert!(chooser.is_empty());
        assert_eq!(chooser.total(), 0);
        assert_eq!(chooser.pick(), Err(Error::EmptyOrZeroTotal));
    }

    #[test]
    fn test_all_zero_chooser_cannot_pick() {
        let chooser = Chooser::new(vec![Choice::new("A", 0), Choice::new("B", 0)]).unwrap();
        assert_eq!(chooser.totals(), &[0, 0]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(chooser.pick_with(&mut rng), Err(Error::EmptyOrZeroTotal));
    }

    #[test]
    fn test_overflow_is_rejected() {
        let result = Chooser::new(vec![
            Choice::new("a", 1),
            Choice::new("b", u64::MAX - 1),
            Choice::new("c", 1),
        ]);
        assert_eq!(result.unwrap_err(), Error::WeightOverflow { index: 2 });
    }

    #[test]
    fn test_max_total_is_accepted() {
        let chooser = Chooser::new(vec![Choice::new("a", 1), Choice::new("b", u64::MAX - 1)]).unwrap();
        assert_eq!(chooser.total(), u64::MAX);
        assert_eq!(chooser.search(1), Some(&"a"));
        assert_eq!(chooser.search(u64::MAX), Some(&"b"));
    }

    #[test]
    fn test_from_signed_rejects_negative() {
        let result = Chooser::from_signed(vec![("A", 3), ("B", -5), ("C", -1)]);
        assert_eq!(
            result.unwrap_err(),
            Error::InvalidWeight {
                index: 1,
                weight: -5
            }
        );
    }

    #[test]
    fn test_from_signed_accepts_non_negative() {
        let chooser = Chooser::from_signed(vec![("A", 3), ("B", 0)]).unwrap();
        assert_eq!(chooser.total(), 3);
        assert_eq!(chooser.search(3), Some(&"A"));
    }

    #[test]
    fn test_try_from_vec() {
        let chooser = Chooser::try_from(vec![Choice::new(1, 4), Choice::new(2, 6)]).unwrap();
        assert_eq!(chooser.total(), 10);
    }

    #[test]
    fn test_pick_with_single_choice() {
        let chooser = Chooser::new(vec![Choice::new("only", 5)]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(chooser.pick_with(&mut rng), Ok(&"only"));
        }
    }

    #[test]
    fn test_pick_with_same_seed_repeats() {
        let chooser = abc();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| *chooser.pick_with(&mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(7), draw(7));
    }

    #[test]
    fn test_pick_frequencies() {
        let chooser = abc();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for _ in 0..10_000 {
            *counts.entry(*chooser.pick_with(&mut rng).unwrap()).or_default() += 1;
        }
        let c = counts.get("C").copied().unwrap_or(0);
        let a = counts.get("A").copied().unwrap_or(0);
        let b = counts.get("B").copied().unwrap_or(0);
        assert!((9_700..=9_900).contains(&c), "C picked {} times", c);
        assert!((50..=150).contains(&a), "A picked {} times", a);
        assert!((50..=150).contains(&b), "B picked {} times", b);
    }

    #[test]
    fn test_chooser_is_send_and_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<Chooser<String>>();
    }
}
