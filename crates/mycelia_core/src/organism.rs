//! Fungus identity, naming and cell bookkeeping.

use crate::cell::{Cell, FlowTracker};
use crate::dna::DnaLogic;
use mycelia_data::{GridPos, OrganismId, TraitKind, TraitVector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sequential organism id source owned by the engine.
///
/// Never rewinds, so ids stay unique for the life of the process even across
/// a world clear.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganismIds {
    next: u64,
}

impl OrganismIds {
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> OrganismId {
        let id = OrganismId(self.next.max(1));
        self.next = id.0 + 1;
        id
    }
}

pub fn name_for(id: OrganismId, traits: &TraitVector, generation: u32) -> String {
    let syllables = [
        "ae", "ba", "co", "da", "el", "fa", "go", "ha", "id", "jo", "ka", "lu", "ma", "na", "os",
        "pe", "qu", "ri", "sa", "tu", "vi", "wu", "xi", "yo", "ze",
    ];
    let stems = [
        "Amor", "Bry", "Cort", "Dol", "Ery", "Fom", "Gano", "Hyd", "Ino", "Lact", "Morch", "Nid",
        "Omph", "Plut", "Russ", "Suil", "Trem", "Vol", "Xer",
    ];
    let role_prefix = match traits.dominant() {
        TraitKind::AcquisitionSun => "Sol-",
        TraitKind::AcquisitionDrain => "Vam-",
        TraitKind::AcquisitionSoil => "Ter-",
        TraitKind::Efficiency => "Lum-",
        TraitKind::Capacity => "Cor-",
        TraitKind::ExpansionCost => "Ram-",
        TraitKind::ReproductionCost => "Spo-",
    };
    let h = id.0.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let stem = stems[(h % stems.len() as u64) as usize];
    let s1 = syllables[((h >> 16) % syllables.len() as u64) as usize];
    let s2 = syllables[((h >> 32) % syllables.len() as u64) as usize];
    format!("{role_prefix}{stem}{s1}{s2}-Gen{generation}")
}

/// A colony of cells sharing one trait vector.
///
/// Cells live in the engine's cell arena; a fungus holds the handles of the
/// cells it owns, keyed by position.
#[derive(Debug, Clone)]
pub struct Fungus {
    id: OrganismId,
    name: String,
    traits: TraitVector,
    generation: u32,
    parent_id: Option<OrganismId>,
    cells: BTreeMap<GridPos, hecs::Entity>,
}

impl Fungus {
    #[must_use]
    pub fn new(
        id: OrganismId,
        traits: TraitVector,
        generation: u32,
        parent_id: Option<OrganismId>,
    ) -> Self {
        Self {
            id,
            name: name_for(id, &traits, generation),
            traits,
            generation,
            parent_id,
            cells: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> OrganismId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn traits(&self) -> &TraitVector {
        &self.traits
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn parent_id(&self) -> Option<OrganismId> {
        self.parent_id
    }

    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        self.traits.dominant_color()
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.cells.is_empty()
    }

    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.cells.contains_key(&pos)
    }

    #[must_use]
    pub fn cell_handle(&self, pos: GridPos) -> Option<hecs::Entity> {
        self.cells.get(&pos).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = (GridPos, hecs::Entity)> + '_ {
        self.cells.iter().map(|(p, h)| (*p, *h))
    }

    pub fn positions(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.cells.keys().copied()
    }

    pub fn insert_cell(&mut self, pos: GridPos, handle: hecs::Entity) {
        self.cells.insert(pos, handle);
    }

    pub fn remove_cell(&mut self, pos: GridPos) -> Option<hecs::Entity> {
        self.cells.remove(&pos)
    }

    /// Aggregates energy and this tick's flow over the fungus's cells.
    #[must_use]
    pub fn summarize(&self, ecs: &hecs::World) -> FungusSummary {
        let mut summary = FungusSummary {
            cell_count: self.cells.len(),
            ..FungusSummary::default()
        };
        for handle in self.cells.values() {
            if let Ok(cell) = ecs.get::<&Cell>(*handle) {
                summary.total_energy += cell.energy();
                summary.flow.merge(cell.flow());
            }
        }
        if summary.cell_count > 0 {
            summary.average_energy = summary.total_energy as f64 / summary.cell_count as f64;
        }
        summary
    }
}

/// Aggregate read-out of one fungus, for analytics panels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FungusSummary {
    pub cell_count: usize,
    pub total_energy: u64,
    pub average_energy: f64,
    pub flow: FlowTracker,
}

impl FungusSummary {
    #[must_use]
    pub fn gained(&self) -> u64 {
        self.flow.total_gained()
    }

    #[must_use]
    pub fn consumed(&self) -> u64 {
        self.flow.total_consumed()
    }

    #[must_use]
    pub fn net(&self) -> i64 {
        self.gained() as i64 - self.consumed() as i64
    }
}
