//! RNG module - injected randomness and the 7-bag randomizer
//!
//! All unpredictability in a session comes through a [`RandomSource`]: the
//! bag shuffle and the spawn column. [`SimpleRng`] is a small seeded LCG so
//! whole games replay from a seed; tests plug in scripted sources instead.

use crate::types::PieceKind;

/// Source of random numbers for the session.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform-ish value in `[0, bound)`. Uses the high bits of `next_u32`.
    fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0, "next_below needs a positive bound");
        ((self.next_u32() as u64 * bound as u64) >> 32) as u32
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

/// Simple LCG (Numerical Recipes constants).
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Seed 0 is treated as 1
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state, usable as a seed to fork the sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

/// Fisher-Yates shuffle driven by `rng`.
pub fn shuffle<T>(rng: &mut impl RandomSource, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_below((i + 1) as u32) as usize;
        slice.swap(i, j);
    }
}

/// 7-bag piece generator.
///
/// Holds what is left of the current shuffle epoch. Starts empty; the first
/// draw shuffles the first bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SevenBag {
    bag: [PieceKind; 7],
    index: usize,
}

impl SevenBag {
    pub fn new() -> Self {
        Self {
            bag: PieceKind::ALL,
            index: PieceKind::ALL.len(),
        }
    }

    /// Replace the remaining pieces with a fresh shuffled permutation.
    pub fn refill(&mut self, rng: &mut impl RandomSource) {
        self.bag = PieceKind::ALL;
        shuffle(rng, &mut self.bag);
        self.index = 0;
    }

    /// Pop the front of the bag, refilling first when it is empty.
    pub fn next(&mut self, rng: &mut impl RandomSource) -> PieceKind {
        if self.index >= self.bag.len() {
            self.refill(rng);
        }
        debug_assert!(self.index < self.bag.len());
        let piece = self.bag[self.index];
        self.index += 1;
        piece
    }

    /// Pieces left in the current epoch, in draw order.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.index..]
    }

    /// Front of the bag, if the epoch is not exhausted.
    pub fn peek(&self) -> Option<PieceKind> {
        self.remaining().first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining().is_empty()
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut a = SimpleRng::new(12345);
        let mut b = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds_diverge() {
        let mut a = SimpleRng::new(12345);
        let mut b = SimpleRng::new(54321);
        assert_ne!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_next_below_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for bound in [1u32, 2, 7, 8, 9, 100] {
            for _ in 0..200 {
                assert!(rng.next_below(bound) < bound);
            }
        }
    }

    #[test]
    fn test_next_below_hits_every_spawn_column() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; 8];
        for _ in 0..500 {
            seen[rng.next_below(8) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_bag_starts_empty_and_fills_on_first_draw() {
        let mut bag = SevenBag::new();
        assert!(bag.is_empty());
        assert_eq!(bag.peek(), None);

        let mut rng = SimpleRng::new(1);
        let first = bag.next(&mut rng);
        assert_eq!(bag.remaining().len(), 6);
        assert!(!bag.remaining().contains(&first));
    }

    #[test]
    fn test_bag_epoch_draws_each_kind_once() {
        let mut bag = SevenBag::new();
        let mut rng = SimpleRng::new(42);
        for _ in 0..5 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.next(&mut rng)).collect();
            drawn.sort();
            assert_eq!(drawn, PieceKind::ALL.to_vec());
            assert!(bag.is_empty());
        }
    }

    #[test]
    fn test_peek_matches_next() {
        let mut bag = SevenBag::new();
        let mut rng = SimpleRng::new(3);
        bag.refill(&mut rng);
        let peeked = bag.peek();
        assert_eq!(peeked, Some(bag.next(&mut rng)));
    }

    #[test]
    fn test_refill_discards_leftovers() {
        let mut bag = SevenBag::new();
        let mut rng = SimpleRng::new(5);
        bag.next(&mut rng);
        bag.next(&mut rng);
        bag.refill(&mut rng);
        assert_eq!(bag.remaining().len(), 7);
    }
}
