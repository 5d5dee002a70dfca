#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure region-growth system that scatters cells outward from the origin.

use rand::{seq::SliceRandom, Rng};
use tracing::debug;
use warren_core::{Capacity, Direction, Position, Region, ScatteredCell};

/// Fewest branches a cell requests when it is scattered.
pub const MIN_BRANCHES: usize = 1;
/// Most branches a cell requests when it is scattered.
pub const MAX_BRANCHES: usize = 3;

/// Region scatterer that grows a sparse cell set up to a capacity.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scatterer;

impl Scatterer {
    /// Creates a new scatterer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Grows a region from [`Position::ORIGIN`] until no branch remains or the
    /// capacity is reached.
    ///
    /// Every visited cell draws a branch count uniformly from
    /// `MIN_BRANCHES..=MAX_BRANCHES` and samples that many unscattered
    /// cardinal directions without replacement, taking all of them when fewer
    /// are available. Branches are explored depth first in sampled order. The
    /// capacity is checked before each insertion, so the region never exceeds
    /// it, and a position reached a second time keeps its first entry.
    pub fn grow<R>(&self, capacity: Capacity, rng: &mut R) -> Region
    where
        R: Rng + ?Sized,
    {
        let mut region = Region::default();
        let mut pending = vec![Position::ORIGIN];

        while let Some(position) = pending.pop() {
            if region.len() >= capacity.get() {
                break;
            }
            if region.contains(position) {
                continue;
            }

            let candidates: Vec<Direction> = Direction::CARDINALS
                .into_iter()
                .filter(|direction| !region.contains(position.step(*direction)))
                .collect();
            let branches = rng.gen_range(MIN_BRANCHES..=MAX_BRANCHES);
            let open_directions: Vec<Direction> = candidates
                .choose_multiple(rng, branches)
                .copied()
                .collect();

            for direction in open_directions.iter().rev() {
                pending.push(position.step(*direction));
            }
            let _ = region.insert(ScatteredCell::new(position, open_directions));
        }

        debug!(
            cells = region.len(),
            capacity = capacity.get(),
            "region scattered"
        );
        region
    }
}
