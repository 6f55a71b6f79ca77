#[macro_use]
pub mod macros;

use mycelia_data::{GridPos, OrganismId, TraitBudget, TraitKind, TraitVector};
use mycelia_lib::model::config::SimConfig;
use mycelia_lib::model::world::World;

/// One fungus to plant when the world is built.
struct Planting {
    pos: GridPos,
    traits: TraitVector,
    nutrition: u64,
}

#[allow(dead_code)]
pub struct WorldBuilder {
    config: SimConfig,
    plantings: Vec<Planting>,
}

#[allow(dead_code)]
impl WorldBuilder {
    /// A seeded 20x20 world with default tunables.
    pub fn new() -> Self {
        let mut config = SimConfig::default();
        config.world.seed = Some(42);
        Self {
            config,
            plantings: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.world.width = width;
        self.config.world.height = height;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SimConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Turns off every energy pathway so a scenario can enable just the ones it studies.
    pub fn quiet(self) -> Self {
        self.with_config(|c| {
            c.metabolism.base_drain_rate = 0.0;
            c.acquisition.max_photosynthesis_rate = 0.0;
            c.acquisition.max_soil_absorption_rate = 0.0;
            c.acquisition.max_parasitism_rate = 0.0;
        })
        .without_growth()
    }

    /// Makes expansion and mushrooms unaffordable.
    pub fn without_growth(self) -> Self {
        self.with_config(|c| {
            c.growth.base_expansion_cost = 1.0e9;
            c.growth.base_mushroom_cost = 1.0e9;
        })
    }

    pub fn with_fungus(mut self, x: i32, y: i32, traits: TraitVector, nutrition: u64) -> Self {
        self.plantings.push(Planting {
            pos: GridPos::new(x, y),
            traits,
            nutrition,
        });
        self
    }

    /// Builds the world; returns planted ids in planting order.
    pub fn build(self) -> (World, Vec<OrganismId>) {
        let mut world = World::new(self.config).expect("Failed to create world in test builder");
        let ids = self
            .plantings
            .into_iter()
            .map(|p| {
                world
                    .spawn_organism_with_energy(p.pos, Some(p.traits), p.nutrition)
                    .expect("Planting on a taken tile")
            })
            .collect();
        (world, ids)
    }
}

/// A vector with all points on the given traits, normalized to the default budget.
#[allow(dead_code)]
pub fn traits(pairs: &[(TraitKind, u32)]) -> TraitVector {
    TraitVector::from_pairs(pairs, &TraitBudget::default())
}
