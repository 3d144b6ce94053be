//! End-to-end exercises of the sliding window: recentering, refilling
//! vacated strips, and extracting submaps across the wraparound.

use approx::assert_relative_eq;
use chakra_grid::{GridIndex, GridMap, GridSize, Position};

fn nan_count(map: &GridMap, layer: &str) -> usize {
    map.get(layer)
        .unwrap()
        .values()
        .filter(|v| v.is_nan())
        .count()
}

#[test]
fn elevation_scenario() {
    let mut map = GridMap::new(["elevation"]);
    map.set_basic_layers(["elevation"]);
    map.set_geometry(Position::new(5.0, 5.0), 1.0, Position::ZERO);
    map.add_constant("elevation", 0.0);

    assert_eq!(map.size(), GridSize::new(5, 5));
    assert_eq!(map.get("elevation").unwrap().values().count(), 25);
    assert!(map
        .get("elevation")
        .unwrap()
        .values()
        .all(|v| v == 0.0));

    let result = map.recenter(Position::new(1.0, 0.0));
    assert!(result.moved);
    assert_relative_eq!(map.position().x, 1.0);
    assert_relative_eq!(map.position().y, 0.0);
    assert_eq!(map.start_index(), GridIndex::new(4, 0));

    // Exactly one strip of 5 cells lost its data; the other 20 cells
    // kept their values.
    assert_eq!(nan_count(&map, "elevation"), 5);
    let zeros = map
        .get("elevation")
        .unwrap()
        .values()
        .filter(|v| *v == 0.0)
        .count();
    assert_eq!(zeros, 20);
}

#[test]
fn surviving_cells_keep_their_world_meaning() {
    let mut map = GridMap::new(["elevation"]);
    map.set_basic_layers(["elevation"]);
    map.set_geometry(Position::new(5.0, 5.0), 1.0, Position::ZERO);

    // Encode each cell's world position into its value.
    map.add_constant("elevation", 0.0);
    for x in 0..5 {
        for y in 0..5 {
            let index = GridIndex::new(x, y);
            let p = map.position_at(index).unwrap();
            *map.at_mut("elevation", index).unwrap() = p.x * 10.0 + p.y;
        }
    }

    map.recenter(Position::new(1.0, 1.0));

    // Every still-valid cell reads the value encoding its own position.
    for x in 0..5 {
        for y in 0..5 {
            let index = GridIndex::new(x, y);
            let value = map.at("elevation", index).unwrap();
            if value.is_nan() {
                continue;
            }
            let p = map.position_at(index).unwrap();
            assert_relative_eq!(value, p.x * 10.0 + p.y);
        }
    }
}

#[test]
fn vacated_regions_cover_exactly_the_invalid_cells() {
    let mut map = GridMap::new(["elevation"]);
    map.set_basic_layers(["elevation"]);
    map.set_geometry(Position::new(8.0, 8.0), 0.5, Position::ZERO);
    map.add_constant("elevation", 1.0);

    // Drive the window around; after several moves the vacated strips
    // reported at each step, refilled immediately, keep the map fully
    // valid.
    let targets = [
        Position::new(0.5, 0.0),
        Position::new(1.0, -1.5),
        Position::new(-0.5, -1.0),
        Position::new(-0.5, 1.5),
    ];
    for target in targets {
        let result = map.recenter(target);

        // Every cell inside a reported region was invalidated (diagonal
        // moves overlap in the corner, so collect first, then compare).
        let mut reported = std::collections::HashSet::new();
        for region in &result.new_regions {
            for dx in 0..region.size.x {
                for dy in 0..region.size.y {
                    reported.insert((region.index.x + dx, region.index.y + dy));
                }
            }
        }
        for &(x, y) in &reported {
            assert!(map.at("elevation", GridIndex::new(x, y)).unwrap().is_nan());
        }
        // And every invalidated cell is inside a reported region.
        for x in 0..map.size().x {
            for y in 0..map.size().y {
                if map.at("elevation", GridIndex::new(x, y)).unwrap().is_nan() {
                    assert!(reported.contains(&(x, y)), "unreported vacated cell");
                }
            }
        }

        for &(x, y) in &reported {
            *map.at_mut("elevation", GridIndex::new(x, y)).unwrap() = 1.0;
        }
        assert_eq!(nan_count(&map, "elevation"), 0, "after move to {target:?}");
    }
}

#[test]
fn submap_after_many_moves_matches_source() {
    let mut map = GridMap::new(["elevation", "variance"]);
    map.set_basic_layers(["elevation"]);
    map.set_geometry(Position::new(6.0, 6.0), 0.5, Position::ZERO);
    map.add_constant("elevation", 0.0);
    map.add_constant("variance", 0.0);

    for target in [
        Position::new(1.0, 0.5),
        Position::new(2.0, -0.5),
        Position::new(1.5, 1.0),
    ] {
        map.recenter(target);
        // Refill everything with position-encoded values.
        for x in 0..map.size().x {
            for y in 0..map.size().y {
                let index = GridIndex::new(x, y);
                let p = map.position_at(index).unwrap();
                *map.at_mut("elevation", index).unwrap() = p.x * 10.0 + p.y;
            }
        }
    }
    assert_ne!(map.start_index(), GridIndex::ZERO);

    let sub = map
        .submap(map.position(), Position::new(2.2, 2.2))
        .unwrap();
    assert_eq!(sub.start_index(), GridIndex::ZERO);
    for x in 0..sub.size().x {
        for y in 0..sub.size().y {
            let index = GridIndex::new(x, y);
            let p = sub.position_at(index).unwrap();
            assert_relative_eq!(sub.at("elevation", index).unwrap(), p.x * 10.0 + p.y);
            assert_relative_eq!(
                sub.at("elevation", index).unwrap(),
                map.at_position("elevation", p).unwrap()
            );
        }
    }
}

#[test]
fn full_window_jump_then_refill() {
    let mut map = GridMap::new(["elevation", "variance"]);
    map.set_basic_layers(["elevation"]);
    map.set_geometry(Position::new(4.0, 4.0), 1.0, Position::ZERO);
    map.add_constant("elevation", 3.0);
    map.add_constant("variance", 0.1);

    let result = map.recenter(Position::new(20.0, 0.0));
    assert!(result.moved);
    assert!(result.new_regions.is_empty());
    assert_eq!(nan_count(&map, "elevation"), 16);
    assert_eq!(nan_count(&map, "variance"), 16);
    assert_relative_eq!(map.position().x, 20.0);

    // The map stays usable at its new location.
    map.add_constant("elevation", 0.0);
    let index = map.index_at(Position::new(20.0, 0.0)).unwrap();
    assert!(map.is_valid(index));
}
