use broadside::{
    Cell, Fleet, Grid, Movement, Orientation, Rotation, SetupError, Side, Vessel, VesselId,
    GRID_COLUMNS, VESSELS_PER_SIDE,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn vessel(side: Side, length: u8, x: i32, y: i32, orientation: Orientation) -> Vessel {
    Vessel::new(side, length, Cell::new(x, y), orientation).unwrap()
}

#[test]
fn test_grid_bounds() {
    let grid = Grid::default();
    assert!(grid.is_valid(Cell::new(0, 0)));
    assert!(grid.is_valid(Cell::new(19, 14)));
    assert!(!grid.is_valid(Cell::new(20, 0)));
    assert!(!grid.is_valid(Cell::new(0, 15)));
    assert!(!grid.is_valid(Cell::new(-1, 3)));
    assert_eq!(grid.cells().count(), 20 * 15);
}

#[test]
fn test_place_rejects_overlap_and_out_of_bounds() -> Result<(), SetupError> {
    let mut fleet = Fleet::new(Grid::default());
    fleet.place(vessel(Side::A, 3, 5, 5, Orientation::Right))?;
    assert_eq!(
        fleet.place(vessel(Side::B, 2, 4, 4, Orientation::Down)),
        Err(SetupError::Overlaps)
    );
    assert_eq!(
        fleet.place(vessel(Side::B, 4, 1, 1, Orientation::Right)),
        Err(SetupError::OutOfBounds)
    );
    assert_eq!(fleet.len(), 1);
    Ok(())
}

#[test]
fn test_rotate_into_another_vessel_is_rejected() -> Result<(), SetupError> {
    let mut fleet = Fleet::new(Grid::default());
    let ship = fleet.place(vessel(Side::A, 3, 5, 5, Orientation::Right))?;
    // clockwise would put the hull on (5,6) and (5,7)
    fleet.place(vessel(Side::B, 2, 6, 6, Orientation::Right))?;

    assert!(!fleet.rotate_vessel(ship, Rotation::Clockwise));
    assert_eq!(fleet.get(ship).unwrap().orientation(), Orientation::Right);

    assert!(fleet.rotate_vessel(ship, Rotation::CounterClockwise));
    assert_eq!(fleet.get(ship).unwrap().orientation(), Orientation::Up);
    assert_eq!(
        fleet.get(ship).unwrap().occupied_cells(),
        vec![Cell::new(5, 5), Cell::new(5, 4), Cell::new(5, 3)]
    );
    Ok(())
}

#[test]
fn test_sunk_vessel_no_longer_blocks() -> Result<(), SetupError> {
    let mut fleet = Fleet::new(Grid::default());
    let ship = fleet.place(vessel(Side::A, 3, 5, 5, Orientation::Right))?;
    let wreck = fleet.place(vessel(Side::B, 2, 6, 6, Orientation::Right))?;
    assert!(fleet.get_mut(wreck).unwrap().take_damage());

    assert!(fleet.rotate_vessel(ship, Rotation::Clockwise));
    assert_eq!(fleet.get(ship).unwrap().orientation(), Orientation::Down);
    assert_eq!(fleet.vessel_at(Cell::new(5, 6)), Some(ship));
    Ok(())
}

#[test]
fn test_move_off_the_grid_is_rejected() -> Result<(), SetupError> {
    let mut fleet = Fleet::new(Grid::default());
    let ship = fleet.place(vessel(Side::A, 2, GRID_COLUMNS - 1, 5, Orientation::Right))?;
    assert!(!fleet.move_vessel(ship, Movement::Forward));
    assert_eq!(fleet.get(ship).unwrap().bow(), Cell::new(GRID_COLUMNS - 1, 5));

    assert!(fleet.move_vessel(ship, Movement::StrafeLeft));
    assert_eq!(fleet.get(ship).unwrap().bow(), Cell::new(GRID_COLUMNS - 1, 6));
    assert!(fleet.move_vessel(ship, Movement::Backward));
    assert_eq!(fleet.get(ship).unwrap().bow(), Cell::new(GRID_COLUMNS - 2, 6));
    Ok(())
}

#[test]
fn test_move_absolute() -> Result<(), SetupError> {
    let mut fleet = Fleet::new(Grid::default());
    let ship = fleet.place(vessel(Side::B, 3, 10, 10, Orientation::Left))?;
    assert!(fleet.move_absolute(ship, 0, 1));
    assert_eq!(fleet.get(ship).unwrap().bow(), Cell::new(10, 11));
    assert!(!fleet.move_absolute(ship, 0, 20));
    Ok(())
}

#[test]
fn test_unknown_id_is_a_no_op() {
    let mut fleet = Fleet::new(Grid::default());
    assert!(!fleet.move_vessel(VesselId(3), Movement::Forward));
    assert!(!fleet.rotate_vessel(VesselId(3), Rotation::Clockwise));
}

#[test]
fn test_can_occupy_ignores_self() -> Result<(), SetupError> {
    let mut fleet = Fleet::new(Grid::default());
    let ship = fleet.place(vessel(Side::A, 3, 5, 5, Orientation::Right))?;
    let own = fleet.get(ship).unwrap().occupied_cells();
    assert!(fleet.can_occupy(ship, &own));
    assert!(!fleet.can_place(&own));
    Ok(())
}

#[test]
fn test_standard_lineup() -> Result<(), SetupError> {
    let mut rng = SmallRng::seed_from_u64(7);
    let fleet = Fleet::standard(Grid::default(), &mut rng)?;
    assert_eq!(fleet.alive_count(Side::A), VESSELS_PER_SIDE);
    assert_eq!(fleet.alive_count(Side::B), VESSELS_PER_SIDE);
    for (_, v) in fleet.iter() {
        let stern = *v.occupied_cells().last().unwrap();
        match v.side() {
            Side::A => {
                assert_eq!(v.orientation(), Orientation::Right);
                assert_eq!(stern.x, 0);
            }
            Side::B => {
                assert_eq!(v.orientation(), Orientation::Left);
                assert_eq!(stern.x, GRID_COLUMNS - 1);
            }
        }
    }
    let mut lengths: Vec<u8> = fleet.alive(Side::A).map(|(_, v)| v.length()).collect();
    lengths.sort();
    assert_eq!(lengths, vec![2, 2, 3, 3, 3, 4, 4]);
    Ok(())
}

#[test]
fn test_random_placement_stays_in_own_half() -> Result<(), SetupError> {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut fleet = Fleet::new(Grid::default());
    for length in [4, 4, 3, 3, 3, 2, 2] {
        let pose = fleet.random_placement(&mut rng, Side::B, length)?;
        let v = Vessel::new(Side::B, length, pose.bow, pose.orientation)?;
        assert!(v.occupied_cells().iter().all(|c| c.x >= GRID_COLUMNS / 2 + 2));
        fleet.place(v)?;
    }
    assert_eq!(fleet.alive_count(Side::B), 7);
    Ok(())
}

#[test]
fn test_random_placement_gives_up_on_a_tiny_board() {
    let mut rng = SmallRng::seed_from_u64(1);
    let fleet = Fleet::new(Grid::new(3, 3));
    assert_eq!(
        fleet.random_placement(&mut rng, Side::B, 4),
        Err(SetupError::UnableToPlace)
    );
}
