//! # Mycelia
//!
//! Fungal colonies growing on a grid of soil tiles. The [`model::world::World`]
//! engine owns every tile, cell, fungus and spore and advances them one tick
//! at a time; callers supply elapsed time and the sun rate, then read the
//! post-tick state.

pub mod model;
