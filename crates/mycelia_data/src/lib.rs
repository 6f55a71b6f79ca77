//! Plain data types shared by the Mycelia simulation crates.

pub mod data;

pub use data::dna::{TraitBudget, TraitKind, TraitVector, TRAIT_COUNT};
pub use data::energy::{EnergyKind, FlowLabel};
pub use data::error::DataError;
pub use data::event::LiveEvent;
pub use data::grid::{GridPos, OrganismId};
