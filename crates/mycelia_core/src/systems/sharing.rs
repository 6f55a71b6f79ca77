//! Sharing system - local nutrition flow between adjacent cells of one fungus.
//!
//! Plans are computed from read-only snapshots so the engine can apply each
//! transfer as a paired debit and credit. Every planned amount is already
//! bounded by the donor's stock and the recipient's deficit.

use crate::cell::Cell;
use crate::config::SharingConfig;

/// The slice of a cell's state that sharing decisions read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareSnapshot {
    pub energy: u64,
    pub capacity: u64,
    pub nutrition: u64,
}

impl ShareSnapshot {
    #[must_use]
    pub fn of(cell: &Cell) -> Self {
        Self {
            energy: cell.energy(),
            capacity: cell.capacity(),
            nutrition: cell.nutrition(),
        }
    }

    #[must_use]
    pub fn fill(&self) -> f64 {
        self.energy as f64 / self.capacity.max(1) as f64
    }

    #[must_use]
    pub fn deficit(&self) -> u64 {
        self.capacity.saturating_sub(self.energy)
    }
}

/// Amounts a nearly full cell pushes to each neighbour, index-aligned with `neighbours`.
///
/// Half of the surplus above `push_threshold × capacity` is split evenly;
/// each share is capped by that neighbour's deficit.
#[must_use]
pub fn push_plan(
    donor: &ShareSnapshot,
    neighbours: &[ShareSnapshot],
    config: &SharingConfig,
) -> Vec<u64> {
    let mut plan = vec![0; neighbours.len()];
    if neighbours.is_empty() || donor.fill() <= config.push_threshold {
        return plan;
    }
    let threshold = (config.push_threshold * donor.capacity as f64).floor() as u64;
    let surplus = donor.energy.saturating_sub(threshold);
    let pushable = (surplus / 2).min(donor.nutrition);
    let share = pushable / neighbours.len() as u64;
    if share == 0 {
        return plan;
    }
    for (slot, n) in plan.iter_mut().zip(neighbours) {
        *slot = share.min(n.deficit());
    }
    plan
}

/// Whole units a starving cell may pull this tick.
///
/// The `rate × dt` budget runs through the cell's sharing accumulator; cells
/// above `pull_threshold` do not accumulate.
pub fn pull_budget(cell: &mut Cell, config: &SharingConfig, dt: f64) -> u64 {
    if cell.energy_ratio() >= config.pull_threshold {
        cell.accumulators.sharing.reset();
        return 0;
    }
    cell.accumulators.sharing.add(config.rate * dt);
    cell.accumulators.sharing.extract_units().min(cell.deficit())
}

/// Splits `budget` among donors above `donor_threshold`, index-aligned with `donors`.
///
/// The remainder of the even split goes to the first eligible donors. No
/// donor gives more than `donor_cap` of its nutrition.
#[must_use]
pub fn pull_plan(budget: u64, donors: &[ShareSnapshot], config: &SharingConfig) -> Vec<u64> {
    let mut plan = vec![0; donors.len()];
    let eligible: Vec<usize> = donors
        .iter()
        .enumerate()
        .filter(|(_, d)| d.fill() > config.donor_threshold)
        .map(|(i, _)| i)
        .collect();
    if budget == 0 || eligible.is_empty() {
        return plan;
    }
    let count = eligible.len() as u64;
    let base = budget / count;
    let remainder = budget % count;
    for (rank, &i) in eligible.iter().enumerate() {
        let wanted = base + u64::from((rank as u64) < remainder);
        let cap = (config.donor_cap * donors[i].nutrition as f64).floor() as u64;
        plan[i] = wanted.min(cap);
    }
    plan
}
