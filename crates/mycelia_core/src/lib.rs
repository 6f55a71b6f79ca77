//! # Mycelia Core
//!
//! Simulation logic for Mycelia, an artificial-life toy in which fungal
//! colonies spread across a grid of soil tiles.
//!
//! This crate contains:
//! - Configuration and validation
//! - Trait vector mutation and display colour
//! - The discrete energy ledger and fractional-rate accumulators
//! - Tiles, cells, fungi and spores
//! - Per-phase rules: biology, growth, sharing, spore lifecycle, connectivity
//! - Metrics collection and structured logging
//!
//! The engine that owns the state and runs the tick pipeline lives in the
//! root `mycelia` crate.
//!
//! ## Example
//!
//! ```
//! use mycelia_core::dna::DnaLogic;
//! use mycelia_data::{TraitBudget, TraitVector};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let budget = TraitBudget::new(150, 100).unwrap();
//! let parent = TraitVector::new([90, 10, 30, 0, 20, 0, 0], &budget);
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let child = parent.mutate_with_rng(0.05, &budget, &mut rng);
//! assert_eq!(child.sum(), 150);
//! ```

/// Energy cell state, flow bookkeeping and mushroom growth
pub mod cell;
/// Configuration management for simulation parameters
pub mod config;
/// Trait vector mutation and colour derivation
pub mod dna;
/// Day/night clock
pub mod environment;
/// Error types for component construction
pub mod error;
/// Discrete energy ledger and fractional accumulator
pub mod ledger;
/// Performance metrics collection and logging
pub mod metrics;
/// Fungus identity and cell bookkeeping
pub mod organism;
/// Spores and their scatter
pub mod spore;
/// Per-phase simulation rules
pub mod systems;
/// Soil tiles and the grid
pub mod tile;

pub use dna::DnaLogic;
pub use metrics::{init_logging, Metrics};
pub use mycelia_data::{
    EnergyKind, FlowLabel, GridPos, LiveEvent, OrganismId, TraitBudget, TraitKind, TraitVector,
};
