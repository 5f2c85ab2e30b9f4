use rand::prelude::*;

use super::*;

/// Picks `count` distinct indices out of `0..total`, every combination being
/// equally likely.
///
/// Runs a partial Fisher-Yates shuffle over the identity permutation and keeps
/// its first `count` slots, so the result is exact even for `count == total`.
///
/// Panics when `count > total`.
pub fn sample_indices<R: Rng + ?Sized>(rng: &mut R, total: usize, count: usize) -> Vec<usize> {
    assert!(
        count <= total,
        "cannot sample {count} distinct indices out of {total}"
    );

    let mut slots: Vec<usize> = (0..total).collect();
    for i in 0..count {
        let j = rng.gen_range(i..total);
        slots.swap(i, j);
    }
    slots.truncate(count);
    slots
}

/// Purely random mine placement driven by a seedable rng.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl Default for RandomMinefieldGenerator {
    /// Seeded from OS entropy with the `std` feature, from a fixed seed without it.
    fn default() -> Self {
        #[cfg(feature = "std")]
        {
            Self::from_entropy()
        }
        #[cfg(not(feature = "std"))]
        {
            Self::new(0)
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> CellGrid {
        let total = usize::from(config.total_cells());
        let mines = usize::from(config.mines);

        if mines == total {
            log::warn!("Every one of the {total} cells is mined");
        }

        let placement = sample_indices(&mut self.rng, total, mines);
        CellGrid::from_mine_indices(config.size, &placement)
    }
}
