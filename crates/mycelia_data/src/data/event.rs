use crate::data::dna::TraitVector;
use crate::data::grid::{GridPos, OrganismId};
use serde::{Deserialize, Serialize};

/// Notable things that happened during one tick.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event")]
pub enum LiveEvent {
    Spawned {
        id: OrganismId,
        pos: GridPos,
        traits: TraitVector,
        tick: u64,
    },
    Expanded {
        id: OrganismId,
        from: GridPos,
        to: GridPos,
        tick: u64,
    },
    MushroomArmed {
        id: OrganismId,
        pos: GridPos,
        tick: u64,
    },
    SporesReleased {
        id: OrganismId,
        pos: GridPos,
        count: usize,
        tick: u64,
    },
    Germinated {
        id: OrganismId,
        parent_id: OrganismId,
        pos: GridPos,
        generation: u32,
        tick: u64,
    },
    CellDied {
        id: OrganismId,
        pos: GridPos,
        tick: u64,
    },
    OrganismSplit {
        id: OrganismId,
        offshoots: Vec<OrganismId>,
        tick: u64,
    },
    Extinct {
        id: OrganismId,
        generation: u32,
        tick: u64,
    },
}

impl LiveEvent {
    #[must_use]
    pub fn tick(&self) -> u64 {
        match self {
            LiveEvent::Spawned { tick, .. }
            | LiveEvent::Expanded { tick, .. }
            | LiveEvent::MushroomArmed { tick, .. }
            | LiveEvent::SporesReleased { tick, .. }
            | LiveEvent::Germinated { tick, .. }
            | LiveEvent::CellDied { tick, .. }
            | LiveEvent::OrganismSplit { tick, .. }
            | LiveEvent::Extinct { tick, .. } => *tick,
        }
    }
}
