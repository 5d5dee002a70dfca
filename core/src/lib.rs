#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Warren area generator.
//!
//! This crate defines the vocabulary every generation stage speaks. The
//! scatter system produces a [`Region`] of [`ScatteredCell`] values keyed by
//! signed [`Position`]s, the normalizer projects that region onto a dense
//! [`Grid`] addressed by zero-based [`GridCoord`]s, and the wiring and linking
//! systems mutate the grid in place. Grid cells never own each other: both
//! neighbor slots and links are stored as coordinates into the same grid.

use std::{
    collections::{BTreeSet, VecDeque},
    num::NonZeroUsize,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Compass directions understood by the generator.
///
/// Only the four cardinal directions participate in scattering, wiring and
/// linking. The diagonals exist for movement helpers built on [`Position::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing y.
    North,
    /// Movement toward increasing x and decreasing y.
    NorthEast,
    /// Movement toward increasing x.
    East,
    /// Movement toward increasing x and increasing y.
    SouthEast,
    /// Movement toward increasing y.
    South,
    /// Movement toward decreasing x and increasing y.
    SouthWest,
    /// Movement toward decreasing x.
    West,
    /// Movement toward decreasing x and decreasing y.
    NorthWest,
}

impl Direction {
    /// Cardinal directions in canonical evaluation order.
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Coordinate delta applied when stepping one cell in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::East => Self::West,
            Self::SouthEast => Self::NorthWest,
            Self::South => Self::North,
            Self::SouthWest => Self::NorthEast,
            Self::West => Self::East,
            Self::NorthWest => Self::SouthEast,
        }
    }

    /// Lowercase label used when presenting exits to players.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::NorthEast => "north-east",
            Self::East => "east",
            Self::SouthEast => "south-east",
            Self::South => "south",
            Self::SouthWest => "south-west",
            Self::West => "west",
            Self::NorthWest => "north-west",
        }
    }

    /// Reports whether the direction is one of the four cardinal points.
    #[must_use]
    pub const fn is_cardinal(self) -> bool {
        matches!(self, Self::North | Self::East | Self::South | Self::West)
    }
}

/// Signed location of a scattered cell relative to the scatter origin.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Location where every scatter begins.
    pub const ORIGIN: Position = Position::new(0, 0);

    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component of the position.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component of the position.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Position reached by moving a single cell in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Upper bound on the number of cells a scatter may produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Capacity(NonZeroUsize);

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(Capacity::DEFAULT) {
    Some(capacity) => capacity,
    None => panic!("default capacity must be positive"),
};

impl Capacity {
    /// Capacity used when callers do not provide one.
    pub const DEFAULT: usize = 500;

    /// Validates and wraps the provided capacity.
    pub fn new(capacity: usize) -> Result<Self, GenerationError> {
        NonZeroUsize::new(capacity)
            .map(Self)
            .ok_or(GenerationError::InvalidCapacity { capacity })
    }

    /// Retrieves the numeric capacity.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self(DEFAULT_CAPACITY)
    }
}

/// Cell discovered while growing a region.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScatteredCell {
    position: Position,
    open_directions: Vec<Direction>,
}

impl ScatteredCell {
    /// Creates a scattered cell with the directions it branched toward.
    #[must_use]
    pub fn new(position: Position, open_directions: Vec<Direction>) -> Self {
        Self {
            position,
            open_directions,
        }
    }

    /// Location of the cell.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Directions the scatter branched toward, in sampled order.
    #[must_use]
    pub fn open_directions(&self) -> &[Direction] {
        &self.open_directions
    }
}

/// Sparse set of scattered cells keyed by position.
///
/// Iteration follows discovery order, so two scatters driven by identically
/// seeded random sources iterate identically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    cells: IndexMap<Position, ScatteredCell>,
}

impl Region {
    /// Number of cells in the region.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the region holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether a cell exists at the provided position.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains_key(&position)
    }

    /// Cell stored at the provided position, if any.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&ScatteredCell> {
        self.cells.get(&position)
    }

    /// Inserts a cell unless its position is already taken.
    ///
    /// Returns `false` and leaves the existing entry untouched when the
    /// position was already present.
    pub fn insert(&mut self, cell: ScatteredCell) -> bool {
        if self.cells.contains_key(&cell.position) {
            return false;
        }

        let _ = self.cells.insert(cell.position, cell);
        true
    }

    /// Iterator over the cells in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ScatteredCell> {
        self.cells.values()
    }

    /// Iterator over the occupied positions in discovery order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.keys().copied()
    }

    /// Bounding box of the region, or `None` when it is empty.
    #[must_use]
    pub fn extents(&self) -> Option<Extents> {
        let mut positions = self.positions();
        let first = positions.next()?;
        let mut extents = Extents::new(first.x, first.x, first.y, first.y);
        for position in positions {
            extents.min_x = extents.min_x.min(position.x);
            extents.max_x = extents.max_x.max(position.x);
            extents.min_y = extents.min_y.min(position.y);
            extents.max_y = extents.max_y.max(position.y);
        }
        Some(extents)
    }
}

/// Inclusive bounding box over scattered positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extents {
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
}

impl Extents {
    /// Creates a bounding box from explicit limits.
    #[must_use]
    pub const fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Smallest x coordinate in the box.
    #[must_use]
    pub const fn min_x(&self) -> i32 {
        self.min_x
    }

    /// Largest x coordinate in the box.
    #[must_use]
    pub const fn max_x(&self) -> i32 {
        self.max_x
    }

    /// Smallest y coordinate in the box.
    #[must_use]
    pub const fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Largest y coordinate in the box.
    #[must_use]
    pub const fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Limits as a `(min_x, max_x, min_y, max_y)` tuple.
    #[must_use]
    pub const fn as_tuple(&self) -> (i32, i32, i32, i32) {
        (self.min_x, self.max_x, self.min_y, self.max_y)
    }

    /// Number of grid columns the box spans under the provided policy.
    #[must_use]
    pub fn width(&self, bounds: BoundsPolicy) -> u32 {
        bounds.span(self.min_x, self.max_x)
    }

    /// Number of grid rows the box spans under the provided policy.
    #[must_use]
    pub fn height(&self, bounds: BoundsPolicy) -> u32 {
        bounds.span(self.min_y, self.max_y)
    }
}

/// Controls whether normalization keeps the maximum row and column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// Treats the maximum coordinate as an exclusive bound, dropping the
    /// extreme row and column from the grid.
    #[default]
    Exclusive,
    /// Keeps every scattered position.
    Inclusive,
}

impl BoundsPolicy {
    /// Number of grid slots between two inclusive limits.
    #[must_use]
    pub fn span(self, min: i32, max: i32) -> u32 {
        let distance = max.abs_diff(min);
        match self {
            Self::Exclusive => distance,
            Self::Inclusive => distance.saturating_add(1),
        }
    }
}

/// Zero-based location of a cell within a [`Grid`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridCoord {
    x: u32,
    y: u32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Cardinal direction leading from `self` to an adjacent `other`.
    #[must_use]
    pub fn direction_to(self, other: GridCoord) -> Option<Direction> {
        Direction::CARDINALS
            .into_iter()
            .find(|direction| self.offset(*direction) == Some(other))
    }

    /// Coordinate one step away, or `None` when it would leave the first quadrant.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Option<GridCoord> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Self::new(x, y))
    }
}

/// Neighbor slots of a grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Neighbors {
    north: Option<GridCoord>,
    south: Option<GridCoord>,
    east: Option<GridCoord>,
    west: Option<GridCoord>,
}

impl Neighbors {
    /// Neighbor recorded in the provided direction. Diagonals are never wired.
    #[must_use]
    pub const fn get(&self, direction: Direction) -> Option<GridCoord> {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
            _ => None,
        }
    }

    fn slot_mut(&mut self, direction: Direction) -> Option<&mut Option<GridCoord>> {
        match direction {
            Direction::North => Some(&mut self.north),
            Direction::South => Some(&mut self.south),
            Direction::East => Some(&mut self.east),
            Direction::West => Some(&mut self.west),
            _ => None,
        }
    }

    /// Iterator over the wired neighbors in cardinal order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, GridCoord)> + '_ {
        Direction::CARDINALS
            .into_iter()
            .filter_map(|direction| self.get(direction).map(|coord| (direction, coord)))
    }
}

/// Present cell within a [`Grid`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    coord: GridCoord,
    neighbors: Neighbors,
    links: BTreeSet<GridCoord>,
}

impl GridCell {
    fn new(coord: GridCoord) -> Self {
        Self {
            coord,
            neighbors: Neighbors::default(),
            links: BTreeSet::new(),
        }
    }

    /// Location of the cell within its grid.
    #[must_use]
    pub const fn coord(&self) -> GridCoord {
        self.coord
    }

    /// Neighbor slots wired for the cell.
    #[must_use]
    pub const fn neighbors(&self) -> &Neighbors {
        &self.neighbors
    }

    /// Neighbor recorded in the provided direction.
    #[must_use]
    pub const fn neighbor(&self, direction: Direction) -> Option<GridCoord> {
        self.neighbors.get(direction)
    }

    /// Overwrites a cardinal neighbor slot. Diagonal directions are ignored.
    pub fn set_neighbor(&mut self, direction: Direction, neighbor: Option<GridCoord>) {
        if let Some(slot) = self.neighbors.slot_mut(direction) {
            *slot = neighbor;
        }
    }

    /// Cells this cell is linked to.
    #[must_use]
    pub const fn links(&self) -> &BTreeSet<GridCoord> {
        &self.links
    }

    /// Reports whether the cell carries any link.
    #[must_use]
    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    /// Reports whether the cell is linked to `other`.
    #[must_use]
    pub fn is_linked(&self, other: GridCoord) -> bool {
        self.links.contains(&other)
    }

    /// Directions of the cell's links in cardinal order.
    #[must_use]
    pub fn link_directions(&self) -> Vec<Direction> {
        Direction::CARDINALS
            .into_iter()
            .filter(|direction| {
                self.coord
                    .offset(*direction)
                    .is_some_and(|target| self.links.contains(&target))
            })
            .collect()
    }
}

/// Dense rectangular arena of optional grid cells indexed `[x][y]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Option<GridCell>>,
}

impl Grid {
    /// Allocates a grid of the provided dimensions with every slot empty.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let slots = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            cells: vec![None; slots],
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the coordinate lies within the grid bounds.
    #[must_use]
    pub const fn contains(&self, coord: GridCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Places an empty cell at the coordinate. Existing cells are kept as-is.
    pub fn place(&mut self, coord: GridCoord) -> Result<(), GridError> {
        let index = self.index(coord).ok_or(GridError::OutOfBounds { coord })?;
        let slot = &mut self.cells[index];
        if slot.is_none() {
            *slot = Some(GridCell::new(coord));
        }
        Ok(())
    }

    /// Cell stored at the coordinate, if present.
    #[must_use]
    pub fn cell(&self, coord: GridCoord) -> Option<&GridCell> {
        self.index(coord)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    /// Mutable access to the cell stored at the coordinate, if present.
    pub fn cell_mut(&mut self, coord: GridCoord) -> Option<&mut GridCell> {
        self.index(coord)
            .and_then(|index| self.cells.get_mut(index))
            .and_then(Option::as_mut)
    }

    /// Reports whether a cell occupies the coordinate.
    #[must_use]
    pub fn is_present(&self, coord: GridCoord) -> bool {
        self.cell(coord).is_some()
    }

    /// Iterator over present cells, column by column.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().flatten()
    }

    /// Iterator over the coordinates of present cells, column by column.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.cells().map(GridCell::coord)
    }

    /// Number of present cells.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.cells().count()
    }

    /// Coordinate one step away if it stays inside the grid bounds.
    #[must_use]
    pub fn neighbor_coord(&self, coord: GridCoord, direction: Direction) -> Option<GridCoord> {
        coord
            .offset(direction)
            .filter(|candidate| self.contains(*candidate))
    }

    /// Records a mutual link between two present, adjacent cells.
    pub fn link(&mut self, from: GridCoord, to: GridCoord) -> Result<(), GridError> {
        if from.direction_to(to).is_none() {
            return Err(GridError::NotAdjacent { from, to });
        }
        if !self.is_present(to) {
            return Err(GridError::MissingCell { coord: to });
        }

        let origin = self
            .cell_mut(from)
            .ok_or(GridError::MissingCell { coord: from })?;
        let _ = origin.links.insert(to);
        if let Some(target) = self.cell_mut(to) {
            let _ = target.links.insert(from);
        }
        Ok(())
    }

    /// Number of links in the grid, counting each mutual link once.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.cells().map(|cell| cell.links.len()).sum::<usize>() / 2
    }

    /// Cells reachable from `start` by following links, including `start`.
    ///
    /// Returns an empty set when `start` is not present.
    #[must_use]
    pub fn linked_component(&self, start: GridCoord) -> BTreeSet<GridCoord> {
        self.flood(start, |cell| cell.links.iter().copied().collect())
    }

    /// Cells reachable from `start` through wired neighbor slots, including `start`.
    ///
    /// Links are ignored. Returns an empty set when `start` is not present.
    #[must_use]
    pub fn wired_component(&self, start: GridCoord) -> BTreeSet<GridCoord> {
        self.flood(start, |cell| cell.neighbors.iter().map(|(_, coord)| coord).collect())
    }

    fn flood<F>(&self, start: GridCoord, next: F) -> BTreeSet<GridCoord>
    where
        F: Fn(&GridCell) -> Vec<GridCoord>,
    {
        let mut visited = BTreeSet::new();
        if !self.is_present(start) {
            return visited;
        }

        let mut queue = VecDeque::new();
        let _ = visited.insert(start);
        queue.push_back(start);

        while let Some(coord) = queue.pop_front() {
            let Some(cell) = self.cell(coord) else {
                continue;
            };
            for following in next(cell) {
                if visited.insert(following) {
                    queue.push_back(following);
                }
            }
        }

        visited
    }

    fn index(&self, coord: GridCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }

        let column = usize::try_from(coord.x).ok()?;
        let row = usize::try_from(coord.y).ok()?;
        let height = usize::try_from(self.height).ok()?;
        column.checked_mul(height)?.checked_add(row)
    }
}

/// Reasons a grid mutation may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum GridError {
    /// The coordinate lies outside the grid bounds.
    #[error("grid coordinate {coord:?} is out of bounds")]
    OutOfBounds {
        /// Offending coordinate.
        coord: GridCoord,
    },
    /// No cell occupies the coordinate.
    #[error("no grid cell is present at {coord:?}")]
    MissingCell {
        /// Offending coordinate.
        coord: GridCoord,
    },
    /// The two cells do not share an edge.
    #[error("grid cells {from:?} and {to:?} are not adjacent")]
    NotAdjacent {
        /// Cell the link originates from.
        from: GridCoord,
        /// Cell the link was meant to reach.
        to: GridCoord,
    },
}

/// Failures surfaced while generating an area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Capacity must allow at least one cell.
    #[error("capacity must be positive (received {capacity})")]
    InvalidCapacity {
        /// Rejected capacity value.
        capacity: usize,
    },
    /// Normalization needs at least one scattered cell.
    #[error("cannot normalize an empty region")]
    EmptyRegion,
    /// A grid mutation broke one of the grid invariants.
    #[error(transparent)]
    Grid(#[from] GridError),
}
