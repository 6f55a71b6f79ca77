use crate::model::cell::{capacity_for, Cell};
use crate::model::config::SimConfig;
use crate::model::dna::random_traits_with_rng;
use crate::model::metrics::Metrics;
use crate::model::organism::{Fungus, OrganismIds};
use crate::model::tile::TileGrid;
use crate::model::world::World;
use mycelia_data::{GridPos, LiveEvent, OrganismId, TraitVector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error, warn};

impl World {
    /// Builds an empty world from a validated configuration.
    pub fn new(config: SimConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let tiles = TileGrid::new(
            config.world.width,
            config.world.height,
            config.tiles.initial_soil,
        )?;
        let rng = if let Some(seed) = config.world.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };

        Ok(Self {
            config,
            tick: 0,
            elapsed: 0.0,
            metrics: Metrics::new(),
            tiles,
            ecs: hecs::World::new(),
            cell_index: HashMap::new(),
            organisms: BTreeMap::new(),
            spores: Vec::new(),
            ids: OrganismIds::new(),
            rng,
            pending_events: Vec::new(),
        })
    }

    /// Plants a new one-cell fungus seeded with the germination energy.
    ///
    /// `None` when the tile is taken or off the grid.
    pub fn spawn_organism(
        &mut self,
        pos: GridPos,
        traits: Option<TraitVector>,
    ) -> Option<OrganismId> {
        let energy = self.config.spores.germination_energy;
        self.spawn_organism_with_energy(pos, traits, energy)
    }

    /// Like [`World::spawn_organism`] with an explicit starting nutrition.
    pub fn spawn_organism_with_energy(
        &mut self,
        pos: GridPos,
        traits: Option<TraitVector>,
        nutrition: u64,
    ) -> Option<OrganismId> {
        if !self.tiles.is_free(pos) {
            return None;
        }
        let traits = match traits {
            Some(t) => t,
            None => match self.config.traits.budget() {
                Ok(budget) => random_traits_with_rng(&budget, &mut self.rng),
                Err(e) => {
                    warn!("Cannot draw random traits: {e}");
                    return None;
                }
            },
        };
        let id = self.found_organism(pos, traits, 0, None, nutrition)?;
        self.pending_events.push(LiveEvent::Spawned {
            id,
            pos,
            traits,
            tick: self.tick,
        });
        Some(id)
    }

    /// Scatters `count` random fungi over free tiles.
    ///
    /// Gives up after a bounded number of draws on a crowded grid.
    pub fn seed_random(&mut self, count: usize) -> Vec<OrganismId> {
        let free = self.tiles.iter().filter(|t| !t.is_occupied()).count();
        let count = count.min(free);
        let mut planted = Vec::with_capacity(count);
        let attempts = count.saturating_mul(20);
        for _ in 0..attempts {
            if planted.len() == count {
                break;
            }
            let pos = GridPos::new(
                self.rng.gen_range(0..self.tiles.width() as i32),
                self.rng.gen_range(0..self.tiles.height() as i32),
            );
            if let Some(id) = self.spawn_organism(pos, None) {
                planted.push(id);
            }
        }
        planted
    }

    /// Removes every fungus, cell and spore and restores all tiles.
    ///
    /// Organism ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.ecs.clear();
        self.cell_index.clear();
        self.organisms.clear();
        self.spores.clear();
        self.pending_events.clear();
        self.tiles.reset(self.config.tiles.initial_soil);
        debug!(tick = self.tick, "World cleared");
    }

    /// Registers a new fungus with a single cell at `pos`.
    pub(super) fn found_organism(
        &mut self,
        pos: GridPos,
        traits: TraitVector,
        generation: u32,
        parent_id: Option<OrganismId>,
        nutrition: u64,
    ) -> Option<OrganismId> {
        if nutrition == 0 || !self.tiles.is_free(pos) {
            return None;
        }
        let id = self.ids.next_id();
        let capacity = capacity_for(&traits, &self.config.cell);
        let cell = Cell::new(pos, id, capacity, nutrition);
        self.organisms
            .insert(id, Fungus::new(id, traits, generation, parent_id));
        self.place_cell(cell);
        Some(id)
    }

    /// Puts a cell into the arena and every index that tracks it.
    pub(super) fn place_cell(&mut self, cell: Cell) -> hecs::Entity {
        let pos = cell.pos();
        let owner = cell.organism();
        let handle = self.ecs.spawn((cell,));
        self.cell_index.insert(pos, handle);
        self.tiles.set_occupied(pos, true);
        debug_assert!(
            self.organisms.contains_key(&owner),
            "cell placed for unknown organism {owner}"
        );
        if let Some(fungus) = self.organisms.get_mut(&owner) {
            fungus.insert_cell(pos, handle);
        } else {
            error!(organism = %owner, %pos, "Cell placed for unknown organism");
        }
        handle
    }

    /// Drops a cell from the arena and every index; the tile becomes free.
    pub(super) fn retire_cell(&mut self, pos: GridPos) -> Option<Cell> {
        let handle = self.cell_index.remove(&pos)?;
        let cell = self.ecs.remove_one::<Cell>(handle).ok();
        let _ = self.ecs.despawn(handle);
        self.tiles.set_occupied(pos, false);
        if let Some(owner) = cell.as_ref().map(Cell::organism) {
            if let Some(fungus) = self.organisms.get_mut(&owner) {
                fungus.remove_cell(pos);
            }
        }
        cell
    }
}
