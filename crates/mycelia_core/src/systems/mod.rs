//! Per-phase simulation rules applied by the engine each tick.

pub mod biology;
pub mod connectivity;
pub mod growth;
pub mod sharing;
pub mod spores;
