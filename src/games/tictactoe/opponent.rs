//! Move selection for the computer opponent.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{instrument, trace};

/// Picks an index among `len` candidate cells.
///
/// The state machine hands over the number of empty cells and reduces the
/// answer modulo that number, so implementations only need to be uniform
/// over `0..len` to give a uniform opponent.
pub trait CellSelector {
    /// Returns an index in `0..len`. Never called with `len == 0`.
    fn select_index(&mut self, len: usize) -> usize;
}

impl<S: CellSelector + ?Sized> CellSelector for &mut S {
    fn select_index(&mut self, len: usize) -> usize {
        (**self).select_index(len)
    }
}

impl<S: CellSelector + ?Sized> CellSelector for Box<S> {
    fn select_index(&mut self, len: usize) -> usize {
        (**self).select_index(len)
    }
}

/// Uniformly random selection.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Seeds from operating system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    #[instrument]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl CellSelector for RandomSelector {
    fn select_index(&mut self, len: usize) -> usize {
        let idx = self.rng.random_range(0..len);
        trace!(len, idx, "Random cell selected");
        idx
    }
}

/// Replays a fixed list of indices, cycling when exhausted.
///
/// An empty script always answers 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSelector {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedSelector {
    /// Creates a selector answering `script` in order.
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }
}

impl CellSelector for ScriptedSelector {
    fn select_index(&mut self, _len: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let idx = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_selector_stays_in_range() {
        let mut selector = RandomSelector::new();
        for len in 1..=9 {
            for _ in 0..50 {
                assert!(selector.select_index(len) < len);
            }
        }
    }

    #[test]
    fn test_seeded_selectors_agree() {
        let mut a = RandomSelector::from_seed(7);
        let mut b = RandomSelector::from_seed(7);
        let left: Vec<_> = (0..20).map(|_| a.select_index(9)).collect();
        let right: Vec<_> = (0..20).map(|_| b.select_index(9)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_random_selector_reaches_every_index() {
        let mut selector = RandomSelector::from_seed(42);
        let mut seen = [false; 9];
        for _ in 0..500 {
            seen[selector.select_index(9)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_scripted_selector_cycles() {
        let mut selector = ScriptedSelector::new([2, 0]);
        assert_eq!(selector.select_index(5), 2);
        assert_eq!(selector.select_index(5), 0);
        assert_eq!(selector.select_index(5), 2);
        assert_eq!(ScriptedSelector::default().select_index(3), 0);
    }
}
