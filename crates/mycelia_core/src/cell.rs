//! The atomic living unit of a fungus.

use crate::config::CellConfig;
use crate::ledger::{Accumulator, EnergyLedger};
use mycelia_data::{EnergyKind, FlowLabel, GridPos, OrganismId, TraitKind, TraitVector};
use serde::{Deserialize, Serialize};

/// Energy capacity granted by the pink trait.
#[must_use]
pub fn capacity_for(traits: &TraitVector, config: &CellConfig) -> u64 {
    let cap = config.base_capacity + traits.fraction(TraitKind::Capacity) * config.capacity_bonus_range;
    cap.round().max(1.0) as u64
}

/// Reproductive structure growing on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MushroomState {
    pub active: bool,
    /// Growth progress in `[0, 1]`; mature at 1.
    pub progress: f64,
}

/// Continuous per-second rates of the last tick, for smooth numeric display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessRates {
    pub metabolism: f64,
    pub soil_absorption: f64,
    pub photosynthesis: f64,
    pub parasitism: f64,
}

/// Units gained and consumed during the current tick, by kind and by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowTracker {
    gained_by_kind: [u64; 3],
    consumed_by_kind: [u64; 3],
    gained_by_label: [u64; 7],
    consumed_by_label: [u64; 7],
}

impl FlowTracker {
    pub fn record_gain(&mut self, kind: EnergyKind, label: FlowLabel, amount: u64) {
        self.gained_by_kind[kind.index()] += amount;
        self.gained_by_label[label.index()] += amount;
    }

    pub fn record_consumption(&mut self, kind: EnergyKind, label: FlowLabel, amount: u64) {
        self.consumed_by_kind[kind.index()] += amount;
        self.consumed_by_label[label.index()] += amount;
    }

    #[must_use]
    pub fn total_gained(&self) -> u64 {
        self.gained_by_kind.iter().sum()
    }

    #[must_use]
    pub fn total_consumed(&self) -> u64 {
        self.consumed_by_kind.iter().sum()
    }

    #[must_use]
    pub fn gained_kind(&self, kind: EnergyKind) -> u64 {
        self.gained_by_kind[kind.index()]
    }

    #[must_use]
    pub fn consumed_kind(&self, kind: EnergyKind) -> u64 {
        self.consumed_by_kind[kind.index()]
    }

    #[must_use]
    pub fn gained(&self, label: FlowLabel) -> u64 {
        self.gained_by_label[label.index()]
    }

    #[must_use]
    pub fn consumed(&self, label: FlowLabel) -> u64 {
        self.consumed_by_label[label.index()]
    }

    /// Non-zero gains by label.
    pub fn gain_breakdown(&self) -> impl Iterator<Item = (FlowLabel, u64)> + '_ {
        FlowLabel::ALL
            .into_iter()
            .map(|l| (l, self.gained(l)))
            .filter(|(_, v)| *v > 0)
    }

    /// Non-zero consumption by label.
    pub fn consumption_breakdown(&self) -> impl Iterator<Item = (FlowLabel, u64)> + '_ {
        FlowLabel::ALL
            .into_iter()
            .map(|l| (l, self.consumed(l)))
            .filter(|(_, v)| *v > 0)
    }

    pub fn merge(&mut self, other: &FlowTracker) {
        for i in 0..3 {
            self.gained_by_kind[i] += other.gained_by_kind[i];
            self.consumed_by_kind[i] += other.consumed_by_kind[i];
        }
        for i in 0..7 {
            self.gained_by_label[i] += other.gained_by_label[i];
            self.consumed_by_label[i] += other.consumed_by_label[i];
        }
    }
}

/// Fractional carry-over of each continuous process.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CellAccumulators {
    pub metabolism: Accumulator,
    pub soil_absorption: Accumulator,
    pub photosynthesis: Accumulator,
    pub parasitism: Accumulator,
    pub sharing: Accumulator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pos: GridPos,
    organism: OrganismId,
    ledger: EnergyLedger,
    capacity: u64,
    alive: bool,
    mushroom: MushroomState,
    pub accumulators: CellAccumulators,
    pub rates: ProcessRates,
    flow: FlowTracker,
}

impl Cell {
    #[must_use]
    pub fn new(pos: GridPos, organism: OrganismId, capacity: u64, nutrition: u64) -> Self {
        let mut ledger = EnergyLedger::new();
        ledger.add(EnergyKind::Nutrition, nutrition, Some(capacity));
        Self {
            pos,
            organism,
            ledger,
            capacity,
            alive: !ledger.is_empty(),
            mushroom: MushroomState::default(),
            accumulators: CellAccumulators::default(),
            rates: ProcessRates::default(),
            flow: FlowTracker::default(),
        }
    }

    /// Fresh instance of this cell owned by `organism`.
    ///
    /// Position, stored energy and mushroom state carry over; accumulators and
    /// tick bookkeeping start clean.
    #[must_use]
    pub fn rehomed(&self, organism: OrganismId) -> Self {
        Self {
            pos: self.pos,
            organism,
            ledger: self.ledger,
            capacity: self.capacity,
            alive: self.alive,
            mushroom: self.mushroom,
            accumulators: CellAccumulators::default(),
            rates: ProcessRates::default(),
            flow: FlowTracker::default(),
        }
    }

    #[must_use]
    pub fn pos(&self) -> GridPos {
        self.pos
    }

    #[must_use]
    pub fn organism(&self) -> OrganismId {
        self.organism
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    #[must_use]
    pub fn energy(&self) -> u64 {
        self.ledger.total()
    }

    #[must_use]
    pub fn energy_of(&self, kind: EnergyKind) -> u64 {
        self.ledger.get(kind)
    }

    #[must_use]
    pub fn nutrition(&self) -> u64 {
        self.ledger.get(EnergyKind::Nutrition)
    }

    #[must_use]
    pub fn energy_ratio(&self) -> f64 {
        self.energy() as f64 / self.capacity.max(1) as f64
    }

    #[must_use]
    pub fn deficit(&self) -> u64 {
        self.capacity.saturating_sub(self.energy())
    }

    #[must_use]
    pub fn ledger(&self) -> &EnergyLedger {
        &self.ledger
    }

    #[must_use]
    pub fn flow(&self) -> &FlowTracker {
        &self.flow
    }

    /// Stores up to `amount` units within capacity and books the gain.
    pub fn gain(&mut self, kind: EnergyKind, amount: u64, label: FlowLabel) -> u64 {
        let added = self.ledger.add(kind, amount, Some(self.capacity));
        if added > 0 {
            self.flow.record_gain(kind, label, added);
        }
        added
    }

    /// Spends up to `amount` units and books the consumption.
    ///
    /// Draining the ledger to zero kills the cell.
    pub fn consume(&mut self, kind: EnergyKind, amount: u64, label: FlowLabel) -> u64 {
        let removed = self.ledger.remove(kind, amount);
        if removed > 0 {
            self.flow.record_consumption(kind, label, removed);
        }
        if self.ledger.is_empty() {
            self.die();
        }
        removed
    }

    /// Converts held energy into nutrition, 1:1.
    ///
    /// Sun is always preferred: while any sun is held, all of it converts and
    /// soil is left alone. Only a cell without sun converts its soil.
    pub fn convert_stored_energy(&mut self) -> Option<(EnergyKind, u64)> {
        let source = if self.ledger.get(EnergyKind::Sun) > 0 {
            EnergyKind::Sun
        } else if self.ledger.get(EnergyKind::Soil) > 0 {
            EnergyKind::Soil
        } else {
            return None;
        };
        let amount = self.ledger.remove(source, u64::MAX);
        self.ledger.add(EnergyKind::Nutrition, amount, None);
        Some((source, amount))
    }

    pub fn die(&mut self) {
        self.ledger.clear();
        self.alive = false;
    }

    #[must_use]
    pub fn mushroom(&self) -> MushroomState {
        self.mushroom
    }

    #[must_use]
    pub fn has_mushroom(&self) -> bool {
        self.mushroom.active
    }

    pub fn start_mushroom(&mut self) {
        self.mushroom = MushroomState {
            active: true,
            progress: 0.0,
        };
    }

    /// Advances the mushroom and reports whether it is now mature.
    pub fn grow_mushroom(&mut self, delta: f64) -> bool {
        if !self.mushroom.active {
            return false;
        }
        self.mushroom.progress = (self.mushroom.progress + delta.max(0.0)).min(1.0);
        self.is_mushroom_mature()
    }

    #[must_use]
    pub fn is_mushroom_mature(&self) -> bool {
        self.mushroom.active && self.mushroom.progress >= 1.0
    }

    pub fn remove_mushroom(&mut self) {
        self.mushroom = MushroomState::default();
    }

    pub fn reset_tick(&mut self) {
        self.flow = FlowTracker::default();
    }
}
