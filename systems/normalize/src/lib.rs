#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure normalization system that projects a scattered region onto a dense grid.

use tracing::debug;
use warren_core::{BoundsPolicy, Extents, GenerationError, Grid, GridCoord, Position, Region};

/// Dense grid produced from a region together with the box it was cut from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalized {
    /// Grid holding one cell per retained scattered position.
    pub grid: Grid,
    /// Bounding box of the scattered positions before projection.
    pub extents: Extents,
}

impl Normalized {
    /// Grid coordinate a scattered position was projected to, if it was kept.
    #[must_use]
    pub fn project(&self, position: Position) -> Option<GridCoord> {
        let x = u32::try_from(position.x().checked_sub(self.extents.min_x())?).ok()?;
        let y = u32::try_from(position.y().checked_sub(self.extents.min_y())?).ok()?;
        let coord = GridCoord::new(x, y);
        self.grid.is_present(coord).then_some(coord)
    }
}

/// Grid normalizer translating signed positions into zero-based coordinates.
#[derive(Clone, Copy, Debug, Default)]
pub struct Normalizer {
    bounds: BoundsPolicy,
}

impl Normalizer {
    /// Creates a normalizer applying the provided bounds policy.
    #[must_use]
    pub const fn new(bounds: BoundsPolicy) -> Self {
        Self { bounds }
    }

    /// Bounds policy applied when sizing the grid.
    #[must_use]
    pub const fn bounds(&self) -> BoundsPolicy {
        self.bounds
    }

    /// Projects every retained scattered position onto a fresh grid.
    ///
    /// The grid spans the region's bounding box shifted so that `min_x` and
    /// `min_y` land on zero. Under [`BoundsPolicy::Exclusive`] the maximum
    /// column and row fall outside the grid and their cells are dropped.
    pub fn normalize(&self, region: &Region) -> Result<Normalized, GenerationError> {
        let extents = region.extents().ok_or(GenerationError::EmptyRegion)?;
        let width = extents.width(self.bounds);
        let height = extents.height(self.bounds);
        let mut grid = Grid::new(width, height);

        for x in 0..width {
            for y in 0..height {
                let Some(position) = scattered_position(extents, x, y) else {
                    continue;
                };
                if region.contains(position) {
                    grid.place(GridCoord::new(x, y))?;
                }
            }
        }

        debug!(
            width,
            height,
            cells = grid.present_count(),
            dropped = region.len() - grid.present_count(),
            "region normalized"
        );
        Ok(Normalized { grid, extents })
    }
}

fn scattered_position(extents: Extents, x: u32, y: u32) -> Option<Position> {
    let x = extents.min_x().checked_add_unsigned(x)?;
    let y = extents.min_y().checked_add_unsigned(y)?;
    Some(Position::new(x, y))
}
