//! Discrete energy storage and fractional-rate accumulation.
//!
//! Every continuous per-second rate in the simulation is fed into an
//! [`Accumulator`]; only the whole units it releases ever touch an
//! [`EnergyLedger`]. Pending error per process therefore stays below one unit.

use mycelia_data::EnergyKind;
use serde::{Deserialize, Serialize};

/// Whole-unit energy store keyed by [`EnergyKind`].
///
/// Counts never go negative, and capacity-bounded additions keep the total
/// across all kinds at or below the supplied capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnergyLedger {
    amounts: [u64; 3],
}

impl EnergyLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(kind: EnergyKind, amount: u64) -> Self {
        let mut ledger = Self::default();
        ledger.amounts[kind.index()] = amount;
        ledger
    }

    #[must_use]
    pub fn get(&self, kind: EnergyKind) -> u64 {
        self.amounts[kind.index()]
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.amounts.iter().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Adds up to `amount` units of `kind`, returning how many were stored.
    ///
    /// With a capacity, the total across all kinds is clamped to it.
    pub fn add(&mut self, kind: EnergyKind, amount: u64, capacity: Option<u64>) -> u64 {
        let added = match capacity {
            Some(cap) => amount.min(cap.saturating_sub(self.total())),
            None => amount,
        };
        self.amounts[kind.index()] += added;
        added
    }

    /// Removes up to `amount` units of `kind`, returning how many were taken.
    pub fn remove(&mut self, kind: EnergyKind, amount: u64) -> u64 {
        let slot = &mut self.amounts[kind.index()];
        let removed = amount.min(*slot);
        *slot -= removed;
        removed
    }

    /// Moves up to `amount` units of `kind` from `from` into `to`.
    ///
    /// Whatever `to` cannot hold under `to_capacity` is refunded to `from`,
    /// so the combined total of both ledgers never changes. Returns the
    /// number of units that arrived.
    pub fn transfer(
        from: &mut EnergyLedger,
        to: &mut EnergyLedger,
        kind: EnergyKind,
        amount: u64,
        to_capacity: Option<u64>,
    ) -> u64 {
        let removed = from.remove(kind, amount);
        let added = to.add(kind, removed, to_capacity);
        if added < removed {
            from.add(kind, removed - added, None);
        }
        added
    }

    pub fn clear(&mut self) {
        self.amounts = [0; 3];
    }
}

/// Fractional remainder of a continuous rate not yet paid out as whole units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Accumulator {
    value: f64,
}

impl Accumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, amount: f64) {
        if amount.is_finite() && amount > 0.0 {
            self.value += amount;
        }
    }

    /// Pays out the whole units accumulated so far and keeps the remainder.
    pub fn extract_units(&mut self) -> u64 {
        let units = self.value.floor();
        self.value -= units;
        units as u64
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}
