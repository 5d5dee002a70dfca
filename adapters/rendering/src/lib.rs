#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Warren adapters.
//!
//! Presenters never mutate the generated grid. They receive a [`MapView`]
//! describing the finished area and decide how to show it; the bundled
//! [`TextPresenter`] draws a character map suitable for terminals.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use warren_core::{Direction, Grid, GridCoord};

/// Classification of a grid slot for presentation purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Slot without a cell.
    Wall,
    /// Ordinary cell.
    Room,
    /// Start cell or the cell the scatter origin landed on.
    Entrance,
    /// Cell designated as the far end of the area.
    Exit,
}

impl Tile {
    /// Character used for the tile on text maps.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => ' ',
            Self::Room => '#',
            Self::Entrance => '@',
            Self::Exit => '%',
        }
    }
}

/// Read-only view of a generated area handed to presenters.
#[derive(Clone, Copy, Debug)]
pub struct MapView<'a> {
    grid: &'a Grid,
    start: Option<GridCoord>,
    end: Option<GridCoord>,
    origin: Option<GridCoord>,
}

impl<'a> MapView<'a> {
    /// Captures a view of the grid and its designated cells.
    #[must_use]
    pub const fn new(
        grid: &'a Grid,
        start: Option<GridCoord>,
        end: Option<GridCoord>,
        origin: Option<GridCoord>,
    ) -> Self {
        Self {
            grid,
            start,
            end,
            origin,
        }
    }

    /// Grid being presented.
    #[must_use]
    pub const fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Classifies the slot at the provided coordinate.
    ///
    /// Entrances take precedence over the exit so a single-cell area shows
    /// its only cell as the way in.
    #[must_use]
    pub fn tile(&self, coord: GridCoord) -> Tile {
        if !self.grid.is_present(coord) {
            Tile::Wall
        } else if Some(coord) == self.start || Some(coord) == self.origin {
            Tile::Entrance
        } else if Some(coord) == self.end {
            Tile::Exit
        } else {
            Tile::Room
        }
    }

    /// Reports whether the cell at `coord` is linked to its neighbor in `direction`.
    #[must_use]
    pub fn is_open(&self, coord: GridCoord, direction: Direction) -> bool {
        let Some(target) = coord.offset(direction) else {
            return false;
        };
        self.grid
            .cell(coord)
            .is_some_and(|cell| cell.is_linked(target))
    }
}

/// Presentation backend capable of showing generated areas.
pub trait Presenter {
    /// Presents the provided view.
    fn present(&mut self, view: &MapView<'_>) -> AnyResult<()>;
}

/// Draws the area as a character map.
///
/// Cells sit on even columns and rows. The character between two horizontally
/// adjacent cells is `-` when they are linked, and the one between vertically
/// adjacent cells is `|`; unlinked gaps stay blank.
#[must_use]
pub fn render_text(view: &MapView<'_>) -> String {
    let grid = view.grid();
    let (width, height) = (grid.width(), grid.height());
    if width == 0 || height == 0 {
        return String::new();
    }

    let mut out = String::new();
    for row in 0..height * 2 - 1 {
        let mut line = String::with_capacity((width * 2) as usize);
        for column in 0..width * 2 - 1 {
            line.push(canvas_glyph(view, column, row));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn canvas_glyph(view: &MapView<'_>, column: u32, row: u32) -> char {
    let coord = GridCoord::new(column / 2, row / 2);
    match (column % 2, row % 2) {
        (0, 0) => view.tile(coord).glyph(),
        (1, 0) if view.is_open(coord, Direction::East) => '-',
        (0, 1) if view.is_open(coord, Direction::South) => '|',
        _ => ' ',
    }
}

/// Presenter writing text maps to any byte sink.
#[derive(Debug)]
pub struct TextPresenter<W> {
    writer: W,
}

impl<W: Write> TextPresenter<W> {
    /// Creates a presenter writing to the provided sink.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the presenter, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, view: &MapView<'_>) -> AnyResult<()> {
        self.writer
            .write_all(render_text(view).as_bytes())
            .context("failed to write text map")?;
        self.writer.flush().context("failed to flush text map")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Grid {
        let mut grid = Grid::new(3, 2);
        for x in 0..3 {
            for y in 0..2 {
                grid.place(GridCoord::new(x, y)).expect("in bounds");
            }
        }
        for ((ax, ay), (bx, by)) in [
            ((0, 0), (1, 0)),
            ((1, 0), (2, 0)),
            ((1, 0), (1, 1)),
            ((0, 0), (0, 1)),
            ((2, 0), (2, 1)),
        ] {
            grid.link(GridCoord::new(ax, ay), GridCoord::new(bx, by))
                .expect("adjacent cells link");
        }
        grid
    }

    #[test]
    fn tiles_follow_designations() {
        let grid = sample_grid();
        let view = MapView::new(
            &grid,
            Some(GridCoord::new(2, 1)),
            Some(GridCoord::new(0, 1)),
            Some(GridCoord::new(1, 0)),
        );

        assert_eq!(view.tile(GridCoord::new(2, 1)), Tile::Entrance);
        assert_eq!(view.tile(GridCoord::new(1, 0)), Tile::Entrance);
        assert_eq!(view.tile(GridCoord::new(0, 1)), Tile::Exit);
        assert_eq!(view.tile(GridCoord::new(0, 0)), Tile::Room);
        assert_eq!(view.tile(GridCoord::new(7, 7)), Tile::Wall);
    }

    #[test]
    fn start_wins_over_exit_on_single_cell() {
        let mut grid = Grid::new(1, 1);
        grid.place(GridCoord::new(0, 0)).expect("in bounds");
        let only = Some(GridCoord::new(0, 0));
        let view = MapView::new(&grid, only, only, None);

        assert_eq!(render_text(&view), "@\n");
    }

    #[test]
    fn text_map_draws_links_between_cells() {
        let grid = sample_grid();
        let view = MapView::new(
            &grid,
            Some(GridCoord::new(2, 1)),
            Some(GridCoord::new(0, 1)),
            None,
        );

        assert_eq!(render_text(&view), "#-#-#\n| | |\n% # @\n");
    }

    #[test]
    fn empty_grid_renders_nothing() {
        let grid = Grid::new(0, 0);
        let view = MapView::new(&grid, None, None, None);

        assert!(render_text(&view).is_empty());
    }

    #[test]
    fn text_presenter_writes_rendered_map() {
        let grid = sample_grid();
        let view = MapView::new(&grid, None, None, None);
        let mut presenter = TextPresenter::new(Vec::new());

        presenter.present(&view).expect("writing to memory succeeds");

        let written = String::from_utf8(presenter.into_inner()).expect("utf-8 output");
        assert_eq!(written, "#-#-#\n| | |\n# # #\n");
    }
}
