#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure linking system that carves a spanning tree through a wired grid.

use rand::{seq::SliceRandom, Rng};
use tracing::debug;
use warren_core::{Grid, GridCoord, GridError};

/// Randomized depth-first backtracker that links every reachable cell once.
#[derive(Clone, Copy, Debug, Default)]
pub struct Linker;

impl Linker {
    /// Creates a new linker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Links the cells reachable from `start` into a tree and returns the
    /// number of links created.
    ///
    /// The walk keeps an explicit stack. The cell on top links to a uniformly
    /// chosen wired neighbor that carries no links yet, and that neighbor is
    /// pushed; a cell without such neighbors is popped. A cell therefore gains
    /// its first link exactly when it is discovered, which rules out cycles.
    /// Call on a freshly wired grid; cells linked by an earlier walk are
    /// treated as already discovered.
    pub fn link<R>(&self, grid: &mut Grid, start: GridCoord, rng: &mut R) -> Result<usize, GridError>
    where
        R: Rng + ?Sized,
    {
        if !grid.is_present(start) {
            return Err(GridError::MissingCell { coord: start });
        }

        let mut stack = vec![start];
        let mut created = 0usize;

        while let Some(&current) = stack.last() {
            let unlinked = unlinked_neighbors(grid, current);
            let Some(&next) = unlinked.choose(rng) else {
                let _ = stack.pop();
                continue;
            };

            grid.link(current, next)?;
            created += 1;
            stack.push(next);
        }

        debug!(
            start_x = start.x(),
            start_y = start.y(),
            links = created,
            "spanning tree linked"
        );
        Ok(created)
    }
}

fn unlinked_neighbors(grid: &Grid, coord: GridCoord) -> Vec<GridCoord> {
    let Some(cell) = grid.cell(coord) else {
        return Vec::new();
    };

    cell.neighbors()
        .iter()
        .map(|(_, neighbor)| neighbor)
        .filter(|neighbor| grid.cell(*neighbor).is_some_and(|other| !other.has_links()))
        .collect()
}
