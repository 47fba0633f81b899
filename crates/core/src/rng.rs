//! RNG module - injected randomness and the preview queue
//!
//! Every random piece choice goes through the [`Randomizer`] trait, so a
//! session can be driven by a seeded [`SimpleRng`] in play and by a scripted
//! generator in tests. The [`PreviewQueue`] keeps the next four pieces and
//! refills itself with one random pick whenever its front is consumed.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::catalog::PieceCatalog;
use crate::pieces::PieceTemplate;
use crate::types::PREVIEW_LEN;

/// Source of uniform random indices.
pub trait Randomizer {
    /// Random value in `[0, max)`. `max` is never zero.
    fn next_range(&mut self, max: u32) -> u32;
}

impl<R: Randomizer + ?Sized> Randomizer for &mut R {
    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

impl<R: Randomizer + ?Sized> Randomizer for Box<R> {
    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current internal state (can seed an identical generator)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Randomizer for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of an LCG have short periods.
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Upcoming pieces, front first. Always holds exactly [`PREVIEW_LEN`] entries.
#[derive(Debug, Clone)]
pub struct PreviewQueue {
    items: ArrayVec<Arc<PieceTemplate>, PREVIEW_LEN>,
}

impl PreviewQueue {
    /// Fill a fresh queue with random picks.
    pub fn new(catalog: &PieceCatalog, rng: &mut impl Randomizer) -> Self {
        let mut items = ArrayVec::new();
        while !items.is_full() {
            items.push(catalog.choose(rng));
        }
        Self { items }
    }

    /// Consume the front piece and append one random pick.
    pub fn pop(&mut self, catalog: &PieceCatalog, rng: &mut impl Randomizer) -> Arc<PieceTemplate> {
        let front = self.items.remove(0);
        self.items.push(catalog.choose(rng));
        front
    }

    pub fn front(&self) -> &Arc<PieceTemplate> {
        &self.items[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<PieceTemplate>> {
        self.items.iter()
    }

    /// Keys in queue order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|t| t.key())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of indices.
    struct Scripted(Vec<u32>, usize);

    impl Randomizer for Scripted {
        fn next_range(&mut self, max: u32) -> u32 {
            let v = self.0[self.1 % self.0.len()];
            self.1 += 1;
            v % max
        }
    }

    fn catalog() -> PieceCatalog {
        PieceCatalog::parse("---\nA:#111111:\n11\n11\n---\nB:#222222:\n10\n11\n---\nC:#333333:\n01\n11\n")
            .unwrap()
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(99);
        for max in 1..20 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_next_range_covers_all_values() {
        let mut rng = SimpleRng::new(3);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[rng.next_range(7) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_queue_starts_full() {
        let catalog = catalog();
        let queue = PreviewQueue::new(&catalog, &mut Scripted(vec![0, 1, 2, 1], 0));
        assert_eq!(queue.len(), PREVIEW_LEN);
        assert_eq!(queue.keys().collect::<Vec<_>>(), vec!["A", "B", "C", "B"]);
    }

    #[test]
    fn test_pop_shifts_and_refills() {
        let catalog = catalog();
        let mut rng = Scripted(vec![0, 1, 2, 1, 2], 0);
        let mut queue = PreviewQueue::new(&catalog, &mut rng);

        let front = queue.pop(&catalog, &mut rng);
        assert_eq!(front.key(), "A");
        assert_eq!(queue.len(), PREVIEW_LEN);
        assert_eq!(queue.keys().collect::<Vec<_>>(), vec!["B", "C", "B", "C"]);
        assert_eq!(queue.front().key(), "B");
    }
}
