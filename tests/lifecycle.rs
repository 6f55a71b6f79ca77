#[macro_use]
mod common;

use common::{traits, WorldBuilder};
use mycelia_data::{GridPos, LiveEvent, TraitKind};
use mycelia_lib::model::config::SimConfig;
use mycelia_lib::model::environment::DayCycle;
use mycelia_lib::model::world::World;
use std::collections::HashSet;

#[test]
fn test_simulation_lifecycle() {
    let mut world = World::new(SimConfig {
        world: mycelia_lib::model::config::WorldConfig {
            seed: Some(11),
            ..Default::default()
        },
        ..Default::default()
    })
    .expect("Failed to create world");
    let clock = DayCycle::from(&world.config.day_cycle);
    let planted = world.seed_random(8);
    assert_eq!(planted.len(), 8);

    let first = world.update(1.0 / 60.0, 10.0).expect("Update failed");
    let spawned = first
        .iter()
        .filter(|e| matches!(e, LiveEvent::Spawned { .. }))
        .count();
    assert_eq!(spawned, 8);

    for _ in 0..600 {
        let sun = clock.sun_rate_per_tile(world.elapsed);
        world.update(0.1, sun).expect("Update failed");

        let cells = world.cells();
        assert_eq!(cells.len(), world.cell_count());
        let occupied = world.tiles().iter().filter(|t| t.is_occupied()).count();
        assert_eq!(occupied, cells.len(), "tile occupancy out of sync");
        for cell in &cells {
            assert!(cell.is_alive());
            assert!(cell.energy() <= cell.capacity());
            let owner = world.organism(cell.organism()).expect("Orphan cell");
            assert!(owner.contains(cell.pos()));
        }
        for fungus in world.organisms() {
            assert!(fungus.is_alive());
        }
    }

    assert_eq!(world.tick, 601);
    let stats = world.stats();
    assert_eq!(stats.cell_count, world.cell_count());
    assert_eq!(stats.organism_count, world.organism_count());
}

#[test]
fn test_spawn_rejects_taken_and_offgrid_tiles() {
    let (mut world, _) = WorldBuilder::new()
        .with_fungus(3, 3, traits(&[(TraitKind::Efficiency, 100)]), 50)
        .build();

    assert!(world.spawn_organism(GridPos::new(3, 3), None).is_none());
    assert!(world.spawn_organism(GridPos::new(-1, 0), None).is_none());
    assert!(world.spawn_organism(GridPos::new(20, 0), None).is_none());
    assert!(world.spawn_organism(GridPos::new(4, 3), None).is_some());
    assert_population!(world, 2);
}

#[test]
fn test_seed_random_caps_at_free_tiles() {
    let (mut world, _) = WorldBuilder::new()
        .with_size(3, 3)
        .with_fungus(1, 1, traits(&[(TraitKind::Efficiency, 100)]), 50)
        .build();
    let planted = world.seed_random(usize::MAX);
    assert!(planted.len() <= 8);
    assert_eq!(world.organism_count(), planted.len() + 1);
}

#[test]
fn test_clear_resets_world_but_not_ids() {
    let (mut world, ids) = WorldBuilder::new()
        .with_fungus(1, 1, traits(&[(TraitKind::AcquisitionSun, 100)]), 80)
        .with_fungus(8, 8, traits(&[(TraitKind::AcquisitionSoil, 100)]), 80)
        .build();
    for _ in 0..30 {
        world.update(0.5, 15.0).expect("Update failed");
    }

    world.clear();

    assert_population!(world, 0);
    assert_eq!(world.cell_count(), 0);
    assert!(world.spores().is_empty());
    let initial = world.config.tiles.initial_soil;
    assert!(world
        .tiles()
        .iter()
        .all(|t| !t.is_occupied() && t.soil() == initial));

    let fresh = world
        .spawn_organism(GridPos::new(1, 1), None)
        .expect("Tile should be free after clear");
    let used: HashSet<_> = ids.into_iter().collect();
    assert!(!used.contains(&fresh));
    assert!(fresh.0 > 2);
}

#[test]
fn test_config_changes_apply_next_tick() {
    let (mut world, _) = WorldBuilder::new()
        .quiet()
        .with_fungus(6, 6, traits(&[(TraitKind::AcquisitionSun, 100)]), 100)
        .build();

    world.update(1.0, 0.0).expect("Update failed");
    assert_nutrition!(world, 6, 6, 100);

    world.config.metabolism.base_drain_rate = 5.0;
    world.update(1.0, 0.0).expect("Update failed");
    assert_nutrition!(world, 6, 6, 95);
}

#[test]
fn test_invalid_tick_rejected() {
    let (mut world, _) = WorldBuilder::new().build();
    assert!(world.update(-1.0, 0.0).is_err());
    assert!(world.update(f64::NAN, 0.0).is_err());
    assert_eq!(world.tick, 0);
}

#[test]
fn test_infinite_tunable_rejected_before_tick() {
    assert!(SimConfig::from_toml("[spores]\nscatter_radius = inf\n").is_err());

    let (mut world, _) = WorldBuilder::new()
        .quiet()
        .with_config(|c| c.growth.base_mushroom_cost = 10.0)
        .with_fungus(10, 10, traits(&[(TraitKind::ReproductionCost, 100)]), 200)
        .build();
    world.config.spores.scatter_radius = f64::INFINITY;
    for _ in 0..20 {
        assert!(world.update(1.0, 0.0).is_err());
    }
    assert_eq!(world.tick, 0);
    assert_nutrition!(world, 10, 10, 200);

    world.config.spores.scatter_radius = 4.0;
    assert!(world.update(1.0, 0.0).is_ok());
    assert_eq!(world.tick, 1);
}

#[test]
fn test_zero_dt_pauses_biology() {
    let (mut world, _) = WorldBuilder::new()
        .with_fungus(2, 2, traits(&[(TraitKind::AcquisitionSun, 100)]), 60)
        .build();
    for _ in 0..10 {
        world.update(0.0, 20.0).expect("Update failed");
    }
    assert_nutrition!(world, 2, 2, 60);
}

#[test]
fn test_degenerate_config_rejected() {
    let mut config = SimConfig::default();
    config.world.width = 0;
    assert!(World::new(config).is_err());

    let mut config = SimConfig::default();
    config.traits.total_points = 0;
    assert!(World::new(config).is_err());
}

#[test]
fn test_stats_serialize_to_json() {
    let (mut world, _) = WorldBuilder::new()
        .with_fungus(5, 5, traits(&[(TraitKind::AcquisitionSun, 100)]), 50)
        .build();
    world.update(0.5, 10.0).expect("Update failed");

    let stats = world.stats();
    assert_eq!(stats.mean_trait(TraitKind::AcquisitionSun), 100.0);
    let json = serde_json::to_string(&stats).expect("Stats should serialize");
    assert!(json.contains("\"organism_count\":1"));
}
