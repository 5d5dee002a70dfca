use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use warren_area::{query, Area, AreaConfig};
use warren_core::{BoundsPolicy, Capacity, GridCoord};

#[test]
fn deterministic_replay_produces_identical_areas() {
    let config = AreaConfig::new(Capacity::new(10).expect("positive"), BoundsPolicy::Exclusive);
    let first = replay(&config, 0x42f0_e1eb_d4a5_3c21);
    let second = replay(&config, 0x42f0_e1eb_d4a5_3c21);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(
        first.fingerprint(),
        second.fingerprint(),
        "fingerprint mismatch: {:#x}",
        first.fingerprint()
    );
}

#[test]
fn deterministic_replay_matches_recorded_area() {
    let config = AreaConfig::new(Capacity::new(10).expect("positive"), BoundsPolicy::Exclusive);
    let area = Area::from_seed(&config, 0x42f0_e1eb_d4a5_3c21).expect("generation succeeds");
    let outcome = replay(&config, 0x42f0_e1eb_d4a5_3c21);

    let expected = ReplayOutcome {
        width: 3,
        height: 3,
        extents: (-2, 1, -1, 2),
        scattered: 10,
        start: Some(GridCoord::new(2, 2)),
        end: Some(GridCoord::new(0, 0)),
        cells: vec![
            record((0, 0), &[(0, 1), (1, 0)]),
            record((0, 1), &[(0, 0), (1, 1)]),
            record((1, 0), &[(0, 0), (2, 0)]),
            record((1, 1), &[(0, 1), (1, 2)]),
            record((1, 2), &[(1, 1), (2, 2)]),
            record((2, 0), &[(1, 0), (2, 1)]),
            record((2, 1), &[(2, 0)]),
            record((2, 2), &[(1, 2)]),
        ],
    };

    assert_eq!(outcome, expected, "replay diverged from the recorded area");
    assert_eq!(query::origin_cell(&area), Some(GridCoord::new(2, 1)));
    assert_eq!(query::link_count(&area), 7);
}

#[test]
fn deterministic_replay_holds_for_large_inclusive_areas() {
    let config = AreaConfig::new(Capacity::new(500).expect("positive"), BoundsPolicy::Inclusive);

    assert_eq!(replay(&config, 99), replay(&config, 99));
}

fn replay(config: &AreaConfig, seed: u64) -> ReplayOutcome {
    let area = Area::from_seed(config, seed).expect("generation succeeds");
    let grid = query::grid(&area);

    let cells = grid
        .cells()
        .map(|cell| CellRecord {
            coord: cell.coord(),
            links: cell.links().iter().copied().collect(),
        })
        .collect();

    ReplayOutcome {
        width: grid.width(),
        height: grid.height(),
        extents: query::bounding_extents(&area).as_tuple(),
        scattered: query::scattered_count(&area),
        start: query::start_cell(&area),
        end: query::end_cell(&area),
        cells,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    width: u32,
    height: u32,
    extents: (i32, i32, i32, i32),
    scattered: usize,
    start: Option<GridCoord>,
    end: Option<GridCoord>,
    cells: Vec<CellRecord>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

fn record(coord: (u32, u32), links: &[(u32, u32)]) -> CellRecord {
    CellRecord {
        coord: GridCoord::new(coord.0, coord.1),
        links: links.iter().map(|&(x, y)| GridCoord::new(x, y)).collect(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CellRecord {
    coord: GridCoord,
    links: Vec<GridCoord>,
}
