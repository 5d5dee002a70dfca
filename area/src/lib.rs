#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative area generation for Warren.
//!
//! [`Area::generate`] runs the scatter, normalize, wiring and linking systems
//! strictly in sequence and keeps the finished grid. Consumers inspect the
//! result exclusively through the [`query`] module.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use warren_core::{BoundsPolicy, Capacity, Extents, GenerationError, Grid, GridCoord, Position};
use warren_system_linking::Linker;
use warren_system_normalize::Normalizer;
use warren_system_scatter::Scatterer;
use warren_system_wiring::Wiring;

/// Parameters controlling a single generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AreaConfig {
    /// Maximum number of cells the scatter may produce.
    pub capacity: Capacity,
    /// Whether normalization keeps the extreme row and column.
    pub bounds: BoundsPolicy,
}

impl AreaConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub const fn new(capacity: Capacity, bounds: BoundsPolicy) -> Self {
        Self { capacity, bounds }
    }

    /// Creates a default configuration with the provided capacity.
    pub fn with_capacity(capacity: usize) -> Result<Self, GenerationError> {
        Ok(Self {
            capacity: Capacity::new(capacity)?,
            ..Self::default()
        })
    }
}

/// Finished area: a linked grid plus the cells designated for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Area {
    grid: Grid,
    extents: Extents,
    scattered: usize,
    origin: Option<GridCoord>,
    start: Option<GridCoord>,
    end: Option<GridCoord>,
}

impl Area {
    /// Generates an area drawing randomness from the provided source.
    pub fn generate<R>(config: &AreaConfig, rng: &mut R) -> Result<Self, GenerationError>
    where
        R: Rng + ?Sized,
    {
        let region = Scatterer::new().grow(config.capacity, rng);
        let normalized = Normalizer::new(config.bounds).normalize(&region)?;
        let origin = normalized.project(Position::ORIGIN);
        let extents = normalized.extents;
        let mut grid = normalized.grid;

        Wiring::new().wire(&mut grid);

        let start = select_start(&grid);
        if let Some(start) = start {
            let _ = Linker::new().link(&mut grid, start, rng)?;
        }
        let end = start.map(|start| select_end(&grid, start));

        info!(
            scattered = region.len(),
            cells = grid.present_count(),
            width = grid.width(),
            height = grid.height(),
            links = grid.link_count(),
            "area generated"
        );

        Ok(Self {
            grid,
            extents,
            scattered: region.len(),
            origin,
            start,
            end,
        })
    }

    /// Generates an area from a `ChaCha8Rng` seeded with `seed`.
    ///
    /// Identical seeds and configurations produce identical areas.
    pub fn from_seed(config: &AreaConfig, seed: u64) -> Result<Self, GenerationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::generate(config, &mut rng)
    }
}

/// Entrance: a cell in the easternmost occupied column.
///
/// Among that column's cells the one whose wired component is largest wins,
/// then the southernmost. Expects a wired grid.
fn select_start(grid: &Grid) -> Option<GridCoord> {
    let column = grid.coords().map(|coord| coord.x()).max()?;
    let mut component_sizes: BTreeMap<GridCoord, usize> = BTreeMap::new();

    for coord in grid.coords().filter(|coord| coord.x() == column) {
        if component_sizes.contains_key(&coord) {
            continue;
        }
        let component = grid.wired_component(coord);
        let size = component.len();
        for member in component.into_iter().filter(|member| member.x() == column) {
            let _ = component_sizes.insert(member, size);
        }
    }

    component_sizes
        .into_iter()
        .max_by_key(|(coord, size)| (*size, coord.y()))
        .map(|(coord, _)| coord)
}

/// Exit: the linked cell farthest from the start along the grid's longer axis.
///
/// The x axis dominates only when the grid is strictly wider than tall. Ties
/// go to the smallest coordinate.
fn select_end(grid: &Grid, start: GridCoord) -> GridCoord {
    let horizontal = grid.width() > grid.height();
    let distance = |coord: &GridCoord| {
        if horizontal {
            coord.x().abs_diff(start.x())
        } else {
            coord.y().abs_diff(start.y())
        }
    };

    grid.linked_component(start)
        .into_iter()
        .max_by(|a, b| distance(a).cmp(&distance(b)).then_with(|| b.cmp(a)))
        .unwrap_or(start)
}

/// Query functions that provide read-only access to a generated area.
pub mod query {
    use std::collections::BTreeSet;

    use super::Area;
    use warren_core::{Direction, Extents, Grid, GridCell, GridCoord};

    /// Provides read-only access to the linked grid.
    #[must_use]
    pub fn grid(area: &Area) -> &Grid {
        &area.grid
    }

    /// Cell stored at the coordinate, if present.
    #[must_use]
    pub fn cell(area: &Area, coord: GridCoord) -> Option<&GridCell> {
        area.grid.cell(coord)
    }

    /// Bounding box of the scattered positions the grid was cut from.
    #[must_use]
    pub fn bounding_extents(area: &Area) -> Extents {
        area.extents
    }

    /// Entrance cell the spanning tree was grown from.
    ///
    /// `None` only when normalization left the grid without cells.
    #[must_use]
    pub fn start_cell(area: &Area) -> Option<GridCoord> {
        area.start
    }

    /// Exit cell farthest from the entrance along the dominant axis.
    #[must_use]
    pub fn end_cell(area: &Area) -> Option<GridCoord> {
        area.end
    }

    /// Grid cell the scatter origin was projected to, if it survived normalization.
    #[must_use]
    pub fn origin_cell(area: &Area) -> Option<GridCoord> {
        area.origin
    }

    /// Directions of the links leaving a cell, in cardinal order.
    ///
    /// Absent cells have no exits.
    #[must_use]
    pub fn exits(area: &Area, coord: GridCoord) -> Vec<Direction> {
        area.grid
            .cell(coord)
            .map(GridCell::link_directions)
            .unwrap_or_default()
    }

    /// Number of links in the spanning tree.
    #[must_use]
    pub fn link_count(area: &Area) -> usize {
        area.grid.link_count()
    }

    /// Number of cells the scatter produced before normalization.
    #[must_use]
    pub fn scattered_count(area: &Area) -> usize {
        area.scattered
    }

    /// Cells reachable from the entrance by following links.
    #[must_use]
    pub fn reachable_cells(area: &Area) -> BTreeSet<GridCoord> {
        area.start
            .map(|start| area.grid.linked_component(start))
            .unwrap_or_default()
    }
}
