use crate::config::TileConfig;
use crate::error::{Result, SimError};
use crate::ledger::{Accumulator, EnergyLedger};
use mycelia_data::{EnergyKind, GridPos};
use serde::{Deserialize, Serialize};

/// One ground square: a soil store plus an occupancy flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pos: GridPos,
    soil: EnergyLedger,
    regen: Accumulator,
    occupied: bool,
}

impl Tile {
    fn new(pos: GridPos, initial_soil: u64) -> Self {
        Self {
            pos,
            soil: EnergyLedger::with(EnergyKind::Soil, initial_soil),
            regen: Accumulator::new(),
            occupied: false,
        }
    }

    #[must_use]
    pub fn pos(&self) -> GridPos {
        self.pos
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn set_occupied(&mut self, occupied: bool) {
        self.occupied = occupied;
    }

    #[must_use]
    pub fn soil(&self) -> u64 {
        self.soil.total()
    }

    #[must_use]
    pub fn fill_ratio(&self, max_soil: u64) -> f64 {
        self.soil() as f64 / max_soil.max(1) as f64
    }

    /// Takes up to `amount` soil units, returning what the tile could give.
    pub fn extract_soil(&mut self, amount: u64) -> u64 {
        self.soil.remove(EnergyKind::Soil, amount)
    }

    /// Regrows soil along the `rate × (1 - (soil/max)^power)` slowdown curve.
    pub fn regenerate(&mut self, config: &TileConfig, dt: f64) -> u64 {
        let base = if self.occupied {
            config.occupied_regen_rate
        } else {
            config.empty_regen_rate
        };
        let ratio = self.fill_ratio(config.max_soil).min(1.0);
        let rate = base * (1.0 - ratio.powf(config.slowdown_power));
        self.regen.add(rate * dt);
        let units = self.regen.extract_units();
        self.soil
            .add(EnergyKind::Soil, units, Some(config.max_soil))
    }

    fn reset(&mut self, initial_soil: u64) {
        self.soil = EnergyLedger::with(EnergyKind::Soil, initial_soil);
        self.regen.reset();
        self.occupied = false;
    }
}

/// Fixed-size row-major grid of tiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: u32, height: u32, initial_soil: u64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SimError::EmptyGrid { width, height });
        }
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                tiles.push(Tile::new(GridPos::new(x, y), initial_soil));
            }
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    #[must_use]
    pub fn index(&self, pos: GridPos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    #[must_use]
    pub fn get(&self, pos: GridPos) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut Tile> {
        self.index(pos).map(move |i| &mut self.tiles[i])
    }

    /// True when `pos` is inside the grid and nothing grows there.
    #[must_use]
    pub fn is_free(&self, pos: GridPos) -> bool {
        self.get(pos).is_some_and(|t| !t.is_occupied())
    }

    pub fn set_occupied(&mut self, pos: GridPos, occupied: bool) {
        if let Some(tile) = self.get_mut(pos) {
            tile.set_occupied(occupied);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn regenerate_all(&mut self, config: &TileConfig, dt: f64) {
        for tile in &mut self.tiles {
            tile.regenerate(config, dt);
        }
    }

    #[must_use]
    pub fn total_soil(&self) -> u64 {
        self.tiles.iter().map(Tile::soil).sum()
    }

    /// Empties every tile and restores its starting soil.
    pub fn reset(&mut self, initial_soil: u64) {
        for tile in &mut self.tiles {
            tile.reset(initial_soil);
        }
    }
}
