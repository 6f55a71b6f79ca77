//! Spore lifecycle - aging, germination and discard.

use crate::spore::Spore;
use crate::tile::TileGrid;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscardReason {
    Expired,
    Occupied,
}

/// What happens to a spore this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SporeFate {
    Germinate,
    Discard(DiscardReason),
}

/// Ages the spore by `dt` and decides its fate.
///
/// A spore with lifetime left on a free tile germinates at once, so in
/// practice a spore lives at most one tick.
pub fn advance(spore: &mut Spore, tiles: &TileGrid, dt: f64) -> SporeFate {
    let expired = spore.age(dt);
    if expired {
        SporeFate::Discard(DiscardReason::Expired)
    } else if tiles.is_free(spore.pos) {
        SporeFate::Germinate
    } else {
        SporeFate::Discard(DiscardReason::Occupied)
    }
}
