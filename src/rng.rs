//! Apple placement.
//!
//! The game asks an [`AppleSource`] for a cell whenever a new apple is due, so
//! tests can script exact placements while the binary draws them at random.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::consts::{APPLE_X_RANGE, APPLE_Y_RANGE};
use crate::snake::Cell;

pub trait AppleSource {
    /// Picks the cell for the next apple.
    fn next_apple(&mut self) -> Cell;
}

/// Uniform placement inside the apple spawn ranges.
///
/// Cells under the snake are not excluded.
#[derive(Debug, Clone)]
pub struct RandomApples<R = StdRng> {
    rng: R,
    seed: Option<u64>,
}

impl RandomApples<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RandomApples { rng: StdRng::seed_from_u64(seed), seed: Some(seed) }
    }

    /// Seeds from the thread RNG. The drawn seed is kept so a session can be replayed.
    pub fn from_random() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        Self::seeded(seed)
    }
}

impl<R: Rng> RandomApples<R> {
    pub fn with_rng(rng: R) -> Self {
        RandomApples { rng, seed: None }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl<R: Rng> AppleSource for RandomApples<R> {
    fn next_apple(&mut self) -> Cell {
        let x = self.rng.gen_range(APPLE_X_RANGE);
        let y = self.rng.gen_range(APPLE_Y_RANGE);
        Cell::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apples_stay_inside_spawn_ranges() {
        let mut apples = RandomApples::seeded(7);
        for _ in 0..5_000 {
            let c = apples.next_apple();
            assert!(APPLE_X_RANGE.contains(&c.x), "x out of range: {:?}", c);
            assert!(APPLE_Y_RANGE.contains(&c.y), "y out of range: {:?}", c);
        }
    }

    #[test]
    fn same_seed_same_apples() {
        let mut a = RandomApples::seeded(42);
        let mut b = RandomApples::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.next_apple(), b.next_apple());
        }
        assert_eq!(a.seed(), Some(42));
    }

    #[test]
    fn random_source_remembers_its_seed() {
        let apples = RandomApples::from_random();
        assert!(apples.seed().is_some());
        assert_eq!(RandomApples::with_rng(StdRng::seed_from_u64(1)).seed(), None);
    }
}
