#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure wiring system that connects grid cells to their cardinal neighbors.

use tracing::debug;
use warren_core::{Direction, Grid, GridCoord};

/// Neighbor wirer resolving the north, south, east and west slots of every cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wiring;

impl Wiring {
    /// Creates a new wiring system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Rewrites every neighbor slot of every present cell.
    ///
    /// A slot refers to the adjacent coordinate when it lies within the grid
    /// and holds a cell, and is cleared otherwise. Running the wirer again on
    /// the same grid yields identical slots.
    pub fn wire(&self, grid: &mut Grid) {
        let view: &Grid = grid;
        let assignments: Vec<(GridCoord, Direction, Option<GridCoord>)> = view
            .coords()
            .flat_map(|coord| {
                Direction::CARDINALS.into_iter().map(move |direction| {
                    let neighbor = view
                        .neighbor_coord(coord, direction)
                        .filter(|candidate| view.is_present(*candidate));
                    (coord, direction, neighbor)
                })
            })
            .collect();

        let mut wired = 0usize;
        for (coord, direction, neighbor) in assignments {
            if let Some(cell) = grid.cell_mut(coord) {
                cell.set_neighbor(direction, neighbor);
                wired += usize::from(neighbor.is_some());
            }
        }

        debug!(
            cells = grid.present_count(),
            adjacencies = wired / 2,
            "grid wired"
        );
    }
}
