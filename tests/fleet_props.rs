use std::collections::HashSet;

use broadside::{
    side_fire_zones, Cell, Fleet, Grid, Movement, Rotation, VesselId,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Every alive hull has `length` distinct collinear in-bounds cells and no
/// two alive hulls share a cell.
fn assert_fleet_invariants(fleet: &Fleet) -> Result<(), TestCaseError> {
    let mut seen: HashSet<Cell> = HashSet::new();
    for (_, v) in fleet.iter().filter(|(_, v)| v.is_alive()) {
        let cells = v.occupied_cells();
        prop_assert_eq!(cells.len(), v.length() as usize);
        let (dx, dy) = v.orientation().vector();
        for (i, c) in cells.iter().enumerate() {
            let i = i as i32;
            prop_assert_eq!(*c, Cell::new(v.bow().x - dx * i, v.bow().y - dy * i));
            prop_assert!(fleet.grid().is_valid(*c));
            prop_assert!(seen.insert(*c), "cell {} shared by two hulls", c);
        }
    }
    Ok(())
}

fn random_fleet(seed: u64) -> Fleet {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut fleet = Fleet::standard(Grid::default(), &mut rng).unwrap();
    // knock a few vessels out so wrecks are part of the picture
    let sinks = rng.random_range(0..4);
    for _ in 0..sinks {
        let id = VesselId(rng.random_range(0..fleet.len()));
        fleet.get_mut(id).unwrap().take_damage_by(4);
    }
    fleet
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn moves_preserve_non_overlap(
        seed in any::<u64>(),
        ops in prop::collection::vec((0usize..14, 0u8..6), 1..120),
    ) {
        let mut fleet = random_fleet(seed);
        assert_fleet_invariants(&fleet)?;
        for (index, op) in ops {
            let id = VesselId(index);
            let before = fleet.get(id).unwrap().pose();
            let moved = match op {
                0 => fleet.move_vessel(id, Movement::Forward),
                1 => fleet.move_vessel(id, Movement::Backward),
                2 => fleet.move_vessel(id, Movement::StrafeLeft),
                3 => fleet.move_vessel(id, Movement::StrafeRight),
                4 => fleet.rotate_vessel(id, Rotation::Clockwise),
                _ => fleet.rotate_vessel(id, Rotation::CounterClockwise),
            };
            if !moved {
                prop_assert_eq!(fleet.get(id).unwrap().pose(), before);
            }
            assert_fleet_invariants(&fleet)?;
        }
    }

    #[test]
    fn fire_zones_are_perpendicular_and_armed(seed in any::<u64>(), damage in 0u8..4) {
        let mut fleet = random_fleet(seed);
        let id = VesselId(0);
        fleet.get_mut(id).unwrap().take_damage_by(damage);
        let v = *fleet.get(id).unwrap();
        let zones = side_fire_zones(fleet.grid(), &v);
        let hull = v.occupied_cells();
        let armed: Vec<Cell> = v.armed_segments().map(|i| hull[i]).collect();
        prop_assert!(zones.len() <= 2 * v.weapons_per_flank() as usize);
        for z in &zones {
            prop_assert!(!hull.contains(z));
            // exactly one step sideways from an armed body segment
            let from_armed = armed.iter().any(|s| {
                let d = (z.x - s.x, z.y - s.y);
                if v.orientation().is_vertical() {
                    d == (1, 0) || d == (-1, 0)
                } else {
                    d == (0, 1) || d == (0, -1)
                }
            });
            prop_assert!(from_armed);
        }
        if !v.is_alive() {
            prop_assert!(zones.is_empty());
        }
    }
}
