use crate::model::config::SimConfig;
use crate::model::metrics::Metrics;
use crate::model::organism::{Fungus, OrganismIds};
use crate::model::spore::Spore;
use crate::model::tile::TileGrid;
use mycelia_data::{GridPos, LiveEvent, OrganismId};
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeMap, HashMap};

pub mod finalize;
pub mod init;
pub mod query;
pub mod update;

pub use query::WorldStats;

/// The simulation engine.
///
/// Cells live in the `ecs` arena. Each fungus holds the handles of its own
/// cells and `cell_index` maps every occupied position to the same handle;
/// the two are only ever changed together.
pub struct World {
    /// Tunables read at the start of every tick.
    pub config: SimConfig,
    pub tick: u64,
    /// Simulated seconds since creation.
    pub elapsed: f64,
    pub metrics: Metrics,
    tiles: TileGrid,
    ecs: hecs::World,
    cell_index: HashMap<GridPos, hecs::Entity>,
    organisms: BTreeMap<OrganismId, Fungus>,
    spores: Vec<Spore>,
    ids: OrganismIds,
    rng: ChaCha8Rng,
    /// Events raised between ticks, reported by the next update.
    pending_events: Vec<LiveEvent>,
}
