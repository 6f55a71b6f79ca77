use crate::tile::TileGrid;
use mycelia_data::{GridPos, OrganismId, TraitVector};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Reproductive payload drifting toward a tile, waiting to germinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spore {
    pub pos: GridPos,
    pub traits: TraitVector,
    /// Seconds left before the spore is discarded.
    pub lifetime: f64,
    pub parent_id: OrganismId,
    pub parent_generation: u32,
}

impl Spore {
    /// Counts down the lifetime; true once it has run out.
    pub fn age(&mut self, dt: f64) -> bool {
        self.lifetime -= dt;
        self.lifetime <= 0.0
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.lifetime <= 0.0
    }
}

/// Parameters shared by every spore of one mushroom release.
#[derive(Debug, Clone, Copy)]
pub struct SporeRelease {
    pub origin: GridPos,
    pub count: usize,
    pub radius: f64,
    pub lifetime: f64,
    pub traits: TraitVector,
    pub parent_id: OrganismId,
    pub parent_generation: u32,
}

/// Scatters spores around the origin.
///
/// Each spore gets a uniform angle and a uniform radial distance up to the
/// radius (so landings bunch toward the centre). Spores landing off the grid
/// are dropped. A non-finite radius releases nothing.
pub fn scatter_with_rng<R: Rng>(release: &SporeRelease, grid: &TileGrid, rng: &mut R) -> Vec<Spore> {
    if !release.radius.is_finite() {
        return Vec::new();
    }
    let radius = release.radius.max(0.0);
    let mut spores = Vec::with_capacity(release.count);
    for _ in 0..release.count {
        let angle = rng.gen_range(0.0..TAU);
        let dist = rng.gen_range(0.0..=radius);
        let pos = release.origin.offset(
            (angle.cos() * dist).round() as i32,
            (angle.sin() * dist).round() as i32,
        );
        if !grid.in_bounds(pos) {
            continue;
        }
        spores.push(Spore {
            pos,
            traits: release.traits,
            lifetime: release.lifetime,
            parent_id: release.parent_id,
            parent_generation: release.parent_generation,
        });
    }
    spores
}
