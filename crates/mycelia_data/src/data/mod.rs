//! Core data structures for the Mycelia simulation.

pub mod dna;
pub mod energy;
pub mod error;
pub mod event;
pub mod grid;
