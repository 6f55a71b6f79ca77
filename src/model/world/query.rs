use crate::model::cell::Cell;
use crate::model::organism::{Fungus, FungusSummary};
use crate::model::spore::Spore;
use crate::model::tile::{Tile, TileGrid};
use crate::model::world::World;
use mycelia_data::{EnergyKind, GridPos, OrganismId, TraitKind, TRAIT_COUNT};
use serde::{Deserialize, Serialize};

/// Population-level snapshot taken after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldStats {
    pub tick: u64,
    pub elapsed: f64,
    pub cell_count: usize,
    pub organism_count: usize,
    pub spore_count: usize,
    pub max_generation: u32,
    pub sun_in_cells: u64,
    pub soil_in_cells: u64,
    pub nutrition_in_cells: u64,
    pub soil_in_tiles: u64,
    /// Cell-weighted mean of every trait, in [`TraitKind::ALL`] order.
    pub mean_traits: [f64; TRAIT_COUNT],
}

impl WorldStats {
    #[must_use]
    pub fn mean_trait(&self, kind: TraitKind) -> f64 {
        self.mean_traits[kind.index()]
    }
}

impl World {
    #[must_use]
    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    #[must_use]
    pub fn tile(&self, pos: GridPos) -> Option<&Tile> {
        self.tiles.get(pos)
    }

    /// Copies of every indexed cell, by organism then position.
    #[must_use]
    pub fn cells(&self) -> Vec<Cell> {
        self.organisms
            .values()
            .flat_map(Fungus::cells)
            .filter_map(|(_, handle)| {
                self.ecs
                    .get::<&Cell>(handle)
                    .ok()
                    .map(|c| Cell::clone(&c))
            })
            .collect()
    }

    #[must_use]
    pub fn cell_at(&self, pos: GridPos) -> Option<Cell> {
        let handle = self.cell_index.get(&pos)?;
        self.ecs.get::<&Cell>(*handle).ok().map(|c| Cell::clone(&c))
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cell_index.len()
    }

    pub fn organisms(&self) -> impl Iterator<Item = &Fungus> {
        self.organisms.values()
    }

    #[must_use]
    pub fn organism(&self, id: OrganismId) -> Option<&Fungus> {
        self.organisms.get(&id)
    }

    #[must_use]
    pub fn organism_count(&self) -> usize {
        self.organisms.len()
    }

    /// Energy and flow totals of one fungus for this tick.
    #[must_use]
    pub fn organism_summary(&self, id: OrganismId) -> Option<FungusSummary> {
        self.organisms.get(&id).map(|f| f.summarize(&self.ecs))
    }

    #[must_use]
    pub fn spores(&self) -> &[Spore] {
        &self.spores
    }

    #[must_use]
    pub fn stats(&self) -> WorldStats {
        let mut stats = WorldStats {
            tick: self.tick,
            elapsed: self.elapsed,
            organism_count: self.organisms.len(),
            spore_count: self.spores.len(),
            soil_in_tiles: self.tiles.total_soil(),
            ..WorldStats::default()
        };

        let mut trait_sums = [0.0; TRAIT_COUNT];
        for fungus in self.organisms.values() {
            stats.max_generation = stats.max_generation.max(fungus.generation());
            let weight = fungus.cell_count() as f64;
            for kind in TraitKind::ALL {
                trait_sums[kind.index()] += f64::from(fungus.traits().get(kind)) * weight;
            }
        }

        for (_handle, cell) in self.ecs.query::<&Cell>().iter() {
            stats.cell_count += 1;
            stats.sun_in_cells += cell.energy_of(EnergyKind::Sun);
            stats.soil_in_cells += cell.energy_of(EnergyKind::Soil);
            stats.nutrition_in_cells += cell.energy_of(EnergyKind::Nutrition);
        }

        if stats.cell_count > 0 {
            for (mean, sum) in stats.mean_traits.iter_mut().zip(trait_sums) {
                *mean = sum / stats.cell_count as f64;
            }
        }
        stats
    }
}
