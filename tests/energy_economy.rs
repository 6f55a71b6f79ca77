#[macro_use]
mod common;

use common::{traits, WorldBuilder};
use mycelia_data::{EnergyKind, FlowLabel, GridPos, LiveEvent, TraitKind};

#[test]
fn test_sun_converted_before_soil() {
    let (mut world, _) = WorldBuilder::new()
        .quiet()
        .with_config(|c| {
            c.acquisition.max_photosynthesis_rate = 10.0;
            c.acquisition.max_soil_absorption_rate = 6.0;
        })
        .with_fungus(
            5,
            5,
            traits(&[(TraitKind::AcquisitionSun, 50), (TraitKind::AcquisitionSoil, 50)]),
            100,
        )
        .build();
    let pos = GridPos::new(5, 5);

    world.update(1.0, 20.0).expect("Update failed");
    let cell = world.cell_at(pos).expect("Cell missing");
    assert_eq!(cell.energy_of(EnergyKind::Sun), 0);
    assert_eq!(cell.energy_of(EnergyKind::Soil), 3);
    assert_eq!(cell.nutrition(), 105);

    world.update(1.0, 20.0).expect("Update failed");
    let cell = world.cell_at(pos).expect("Cell missing");
    assert_eq!(cell.flow().gained(FlowLabel::Photosynthesis), 5);
    assert_eq!(cell.energy_of(EnergyKind::Soil), 6, "soil untouched while sun flows");
    assert_eq!(cell.nutrition(), 110);

    // Night: no sun, so the stored soil converts.
    world.update(1.0, 0.0).expect("Update failed");
    let cell = world.cell_at(pos).expect("Cell missing");
    assert_eq!(cell.energy_of(EnergyKind::Soil), 0);
    assert_eq!(cell.nutrition(), 119);
}

#[test]
fn test_soil_comes_out_of_the_tile() {
    let (mut world, _) = WorldBuilder::new()
        .quiet()
        .with_config(|c| {
            c.acquisition.max_soil_absorption_rate = 6.0;
            c.tiles.occupied_regen_rate = 0.0;
        })
        .with_fungus(2, 2, traits(&[(TraitKind::AcquisitionSoil, 100)]), 50)
        .build();
    let pos = GridPos::new(2, 2);
    let before = world.tile(pos).expect("Tile").soil();

    for _ in 0..5 {
        world.update(1.0, 0.0).expect("Update failed");
    }
    let after = world.tile(pos).expect("Tile").soil();
    assert_eq!(before - after, 30);
    assert_nutrition!(world, 2, 2, 80);
}

#[test]
fn test_parasite_drains_neighbour() {
    let (mut world, ids) = WorldBuilder::new()
        .quiet()
        .with_config(|c| c.acquisition.max_parasitism_rate = 8.0)
        .with_fungus(10, 10, traits(&[(TraitKind::AcquisitionDrain, 100)]), 100)
        .with_fungus(11, 11, traits(&[(TraitKind::Capacity, 100)]), 100)
        .build();

    world.update(1.0, 0.0).expect("Update failed");

    assert_nutrition!(world, 10, 10, 108);
    assert_nutrition!(world, 11, 11, 92);
    let parasite = world.cell_at(GridPos::new(10, 10)).expect("Cell missing");
    assert_eq!(parasite.flow().gained(FlowLabel::Parasitism), 8);
    assert_eq!(parasite.rates.parasitism, 8.0);
    let summary = world.organism_summary(ids[1]).expect("Victim missing");
    assert_eq!(summary.consumed(), 8);
}

#[test]
fn test_parasitism_scales_with_victim_count() {
    let victim = traits(&[(TraitKind::Capacity, 100)]);
    let (mut world, _) = WorldBuilder::new()
        .quiet()
        .with_config(|c| c.acquisition.max_parasitism_rate = 8.0)
        .with_fungus(10, 10, traits(&[(TraitKind::AcquisitionDrain, 100)]), 100)
        .with_fungus(9, 9, victim, 100)
        .with_fungus(11, 9, victim, 100)
        .with_fungus(10, 11, victim, 100)
        .build();

    for _ in 0..60 {
        world.update(1.0 / 60.0, 0.0).expect("Update failed");
    }

    let gained = world
        .cell_at(GridPos::new(10, 10))
        .expect("Cell missing")
        .nutrition()
        - 100;
    assert!((23..=24).contains(&gained), "drained {gained}");
    let lost: u64 = [(9, 9), (11, 9), (10, 11)]
        .iter()
        .map(|&(x, y)| 100 - world.cell_at(GridPos::new(x, y)).expect("Victim").nutrition())
        .sum();
    assert_eq!(lost, gained);
}

#[test]
fn test_starved_cell_dies_and_frees_tile() {
    let (mut world, ids) = WorldBuilder::new()
        .quiet()
        .with_config(|c| c.metabolism.base_drain_rate = 60.0)
        .with_fungus(4, 4, traits(&[(TraitKind::AcquisitionSun, 100)]), 30)
        .build();

    let events = world.update(1.0, 0.0).expect("Update failed");

    assert_tile_empty!(world, 4, 4);
    assert_population!(world, 0);
    assert!(events
        .iter()
        .any(|e| matches!(e, LiveEvent::CellDied { id, .. } if *id == ids[0])));
    assert!(events
        .iter()
        .any(|e| matches!(e, LiveEvent::Extinct { id, .. } if *id == ids[0])));
}
