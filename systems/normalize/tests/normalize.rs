use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use warren_core::{
    BoundsPolicy, Capacity, GenerationError, GridCoord, Position, Region, ScatteredCell,
};
use warren_system_normalize::Normalizer;
use warren_system_scatter::Scatterer;

fn region_from(positions: &[(i32, i32)]) -> Region {
    let mut region = Region::default();
    for &(x, y) in positions {
        let _ = region.insert(ScatteredCell::new(Position::new(x, y), Vec::new()));
    }
    region
}

fn square(side: i32, offset: i32) -> Region {
    let positions: Vec<_> = (0..side)
        .flat_map(|x| (0..side).map(move |y| (x + offset, y + offset)))
        .collect();
    region_from(&positions)
}

#[test]
fn empty_region_is_rejected() {
    let result = Normalizer::default().normalize(&Region::default());

    assert_eq!(result, Err(GenerationError::EmptyRegion));
}

#[test]
fn single_origin_collapses_to_empty_grid_when_exclusive() {
    let normalized = Normalizer::new(BoundsPolicy::Exclusive)
        .normalize(&region_from(&[(0, 0)]))
        .expect("origin normalizes");

    assert_eq!(normalized.grid.width(), 0);
    assert_eq!(normalized.grid.height(), 0);
    assert_eq!(normalized.grid.present_count(), 0);
    assert_eq!(normalized.project(Position::ORIGIN), None);
}

#[test]
fn single_origin_keeps_one_cell_when_inclusive() {
    let normalized = Normalizer::new(BoundsPolicy::Inclusive)
        .normalize(&region_from(&[(0, 0)]))
        .expect("origin normalizes");

    assert_eq!((normalized.grid.width(), normalized.grid.height()), (1, 1));
    assert_eq!(
        normalized.project(Position::ORIGIN),
        Some(GridCoord::new(0, 0))
    );
}

#[test]
fn exclusive_bounds_drop_maximum_row_and_column() {
    let normalized = Normalizer::default()
        .normalize(&square(3, -1))
        .expect("square normalizes");

    assert_eq!((normalized.grid.width(), normalized.grid.height()), (2, 2));
    assert_eq!(normalized.grid.present_count(), 4);
    assert_eq!(
        normalized.project(Position::new(-1, -1)),
        Some(GridCoord::new(0, 0))
    );
    assert_eq!(normalized.project(Position::new(1, 0)), None);
}

#[test]
fn inclusive_bounds_keep_every_position() {
    let normalized = Normalizer::new(BoundsPolicy::Inclusive)
        .normalize(&square(3, -1))
        .expect("square normalizes");

    assert_eq!((normalized.grid.width(), normalized.grid.height()), (3, 3));
    assert_eq!(normalized.grid.present_count(), 9);
    assert_eq!(
        normalized.project(Position::new(1, 1)),
        Some(GridCoord::new(2, 2))
    );
}

#[test]
fn gaps_in_the_region_stay_empty() {
    let region = region_from(&[(-2, 0), (-1, 0), (0, 0), (0, 1), (0, 2)]);
    let normalized = Normalizer::new(BoundsPolicy::Inclusive)
        .normalize(&region)
        .expect("region normalizes");
    let grid = &normalized.grid;

    assert_eq!((grid.width(), grid.height()), (3, 3));
    assert!(grid.is_present(GridCoord::new(0, 0)));
    assert!(grid.is_present(GridCoord::new(2, 2)));
    assert!(!grid.is_present(GridCoord::new(0, 1)));
    assert!(!grid.is_present(GridCoord::new(1, 1)));
    assert_eq!(grid.present_count(), region.len());
}

proptest! {
    #[test]
    fn exclusive_grid_holds_positions_strictly_inside_bounds(
        capacity in 1usize..300,
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let region = Scatterer::new().grow(Capacity::new(capacity).expect("positive"), &mut rng);
        let normalized = Normalizer::new(BoundsPolicy::Exclusive)
            .normalize(&region)
            .expect("scattered regions are never empty");
        let extents = normalized.extents;

        let inside = region
            .positions()
            .filter(|p| p.x() < extents.max_x() && p.y() < extents.max_y())
            .count();
        prop_assert_eq!(normalized.grid.present_count(), inside);
    }

    #[test]
    fn inclusive_grid_holds_every_position(capacity in 1usize..300, seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let region = Scatterer::new().grow(Capacity::new(capacity).expect("positive"), &mut rng);
        let normalized = Normalizer::new(BoundsPolicy::Inclusive)
            .normalize(&region)
            .expect("scattered regions are never empty");

        prop_assert_eq!(normalized.grid.present_count(), region.len());
        for position in region.positions() {
            prop_assert!(normalized.project(position).is_some());
        }
    }
}
