use crate::data::error::DataError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of heritable traits in a [`TraitVector`].
pub const TRAIT_COUNT: usize = 7;

/// One of the seven heritable trait weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TraitKind {
    /// Green: photosynthesis ceiling.
    AcquisitionSun,
    /// Red: parasitism drain on enemy neighbours.
    AcquisitionDrain,
    /// Brown: soil absorption rate.
    AcquisitionSoil,
    /// Yellow: metabolic efficiency.
    Efficiency,
    /// Pink: cell energy capacity.
    Capacity,
    /// Blue: expansion cost reduction.
    ExpansionCost,
    /// Purple: mushroom cost reduction.
    ReproductionCost,
}

impl TraitKind {
    pub const ALL: [TraitKind; TRAIT_COUNT] = [
        TraitKind::AcquisitionSun,
        TraitKind::AcquisitionDrain,
        TraitKind::AcquisitionSoil,
        TraitKind::Efficiency,
        TraitKind::Capacity,
        TraitKind::ExpansionCost,
        TraitKind::ReproductionCost,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            TraitKind::AcquisitionSun => 0,
            TraitKind::AcquisitionDrain => 1,
            TraitKind::AcquisitionSoil => 2,
            TraitKind::Efficiency => 3,
            TraitKind::Capacity => 4,
            TraitKind::ExpansionCost => 5,
            TraitKind::ReproductionCost => 6,
        }
    }

    #[must_use]
    pub fn color_name(self) -> &'static str {
        match self {
            TraitKind::AcquisitionSun => "Green",
            TraitKind::AcquisitionDrain => "Red",
            TraitKind::AcquisitionSoil => "Brown",
            TraitKind::Efficiency => "Yellow",
            TraitKind::Capacity => "Pink",
            TraitKind::ExpansionCost => "Blue",
            TraitKind::ReproductionCost => "Purple",
        }
    }
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color_name())
    }
}

/// Point budget every trait vector is normalized against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTraitBudget")]
pub struct TraitBudget {
    total: u32,
    cap: u32,
}

impl TraitBudget {
    /// Creates a budget of `total` points with at most `cap` points per trait.
    ///
    /// Fails when `total` is zero or cannot be spread over seven traits
    /// without exceeding `cap`.
    pub fn new(total: u32, cap: u32) -> Result<Self, DataError> {
        if total == 0 || cap == 0 || u64::from(total) > u64::from(cap) * TRAIT_COUNT as u64 {
            return Err(DataError::InvalidTraitBudget { total, cap });
        }
        Ok(Self { total, cap })
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn cap(&self) -> u32 {
        self.cap
    }
}

#[derive(Deserialize)]
struct RawTraitBudget {
    total: u32,
    cap: u32,
}

impl TryFrom<RawTraitBudget> for TraitBudget {
    type Error = DataError;

    fn try_from(raw: RawTraitBudget) -> Result<Self, Self::Error> {
        Self::new(raw.total, raw.cap)
    }
}

impl Default for TraitBudget {
    fn default() -> Self {
        Self {
            total: 100,
            cap: 100,
        }
    }
}

/// Heritable trait weights of a fungus.
///
/// Always holds seven non-negative weights, each at most the budget cap,
/// summing exactly to the budget total. Instances are never edited in place:
/// every change goes through [`TraitVector::new`] again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTraitVector")]
pub struct TraitVector {
    weights: [u32; TRAIT_COUNT],
}

/// Weights as read from the wire, before checking.
///
/// A stored vector carries no budget of its own; it is normalized against
/// the budget its weights imply (their sum, capped by the heaviest weight),
/// which rejects empty and overflowing vectors.
#[derive(Deserialize)]
struct RawTraitVector {
    weights: [u32; TRAIT_COUNT],
}

impl TryFrom<RawTraitVector> for TraitVector {
    type Error = DataError;

    fn try_from(raw: RawTraitVector) -> Result<Self, Self::Error> {
        let total: u64 = raw.weights.iter().map(|&w| u64::from(w)).sum();
        let cap = raw.weights.iter().copied().max().unwrap_or(0);
        let total = u32::try_from(total).map_err(|_| DataError::InvalidTraitVector)?;
        let budget = TraitBudget::new(total, cap).map_err(|_| DataError::InvalidTraitVector)?;
        Ok(Self::new(raw.weights, &budget))
    }
}

impl TraitVector {
    /// Normalizes raw weights against `budget`.
    ///
    /// Raw values are scaled proportionally to the budget total and rounded,
    /// clamped to the cap, then the residual is handed out one point at a time
    /// to the currently lowest traits still below the cap. All-zero input is
    /// spread evenly.
    #[must_use]
    pub fn new(raw: [u32; TRAIT_COUNT], budget: &TraitBudget) -> Self {
        let target = budget.total;
        let cap = budget.cap;
        let raw_sum: u64 = raw.iter().map(|&v| u64::from(v)).sum();

        let mut weights = [0u32; TRAIT_COUNT];
        if raw_sum == 0 {
            let base = target / TRAIT_COUNT as u32;
            let extra = (target % TRAIT_COUNT as u32) as usize;
            for (i, w) in weights.iter_mut().enumerate() {
                *w = (base + u32::from(i < extra)).min(cap);
            }
        } else {
            for (w, &r) in weights.iter_mut().zip(raw.iter()) {
                let scaled = (f64::from(r) / raw_sum as f64) * f64::from(target);
                *w = (scaled.round() as u32).min(cap);
            }
        }

        let mut sum: u32 = weights.iter().sum();
        while sum < target {
            let Some(idx) = (0..TRAIT_COUNT)
                .filter(|&i| weights[i] < cap)
                .min_by_key(|&i| weights[i])
            else {
                break;
            };
            weights[idx] += 1;
            sum += 1;
        }
        // Rounding up several traits can overshoot the target.
        while sum > target {
            let Some(idx) = (0..TRAIT_COUNT)
                .filter(|&i| weights[i] > 0)
                .max_by_key(|&i| (weights[i], std::cmp::Reverse(i)))
            else {
                break;
            };
            weights[idx] -= 1;
            sum -= 1;
        }

        Self { weights }
    }

    /// Builds a vector from named weights; unnamed traits start at zero.
    #[must_use]
    pub fn from_pairs(pairs: &[(TraitKind, u32)], budget: &TraitBudget) -> Self {
        let mut raw = [0u32; TRAIT_COUNT];
        for &(kind, value) in pairs {
            raw[kind.index()] = value;
        }
        Self::new(raw, budget)
    }

    #[must_use]
    pub fn get(&self, kind: TraitKind) -> u32 {
        self.weights[kind.index()]
    }

    /// Trait weight as a fraction of 100, the scale every rate formula uses.
    #[must_use]
    pub fn fraction(&self, kind: TraitKind) -> f64 {
        f64::from(self.get(kind)) / 100.0
    }

    #[must_use]
    pub fn weights(&self) -> [u32; TRAIT_COUNT] {
        self.weights
    }

    #[must_use]
    pub fn sum(&self) -> u32 {
        self.weights.iter().sum()
    }

    /// The trait with the highest weight; ties go to the earlier trait.
    #[must_use]
    pub fn dominant(&self) -> TraitKind {
        let mut best = TraitKind::AcquisitionSun;
        for kind in TraitKind::ALL {
            if self.get(kind) > self.get(best) {
                best = kind;
            }
        }
        best
    }
}

impl fmt::Display for TraitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = TraitKind::ALL
            .iter()
            .map(|k| format!("{}={}", k.color_name(), self.get(*k)))
            .collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_normalized(v: &TraitVector, budget: &TraitBudget) {
        assert_eq!(v.sum(), budget.total());
        assert!(v.weights().iter().all(|&w| w <= budget.cap()));
    }

    #[test]
    fn test_budget_rejects_degenerate_values() {
        assert!(TraitBudget::new(0, 100).is_err());
        assert!(TraitBudget::new(100, 0).is_err());
        assert!(TraitBudget::new(701, 100).is_err());
        assert!(TraitBudget::new(700, 100).is_ok());
    }

    #[test]
    fn test_deserialized_budget_is_checked() {
        assert!(serde_json::from_str::<TraitBudget>(r#"{"total":701,"cap":100}"#).is_err());
        assert!(serde_json::from_str::<TraitBudget>(r#"{"total":0,"cap":100}"#).is_err());
        let budget: TraitBudget = serde_json::from_str(r#"{"total":150,"cap":40}"#).unwrap();
        assert_eq!(budget, TraitBudget::new(150, 40).unwrap());
    }

    #[test]
    fn test_deserialized_vector_is_checked() {
        let empty = r#"{"weights":[0,0,0,0,0,0,0]}"#;
        assert!(serde_json::from_str::<TraitVector>(empty).is_err());
        let overflow = r#"{"weights":[4294967295,1,0,0,0,0,0]}"#;
        assert!(serde_json::from_str::<TraitVector>(overflow).is_err());

        let budget = TraitBudget::default();
        let v = TraitVector::new([10, 20, 30, 5, 5, 20, 10], &budget);
        let json = serde_json::to_string(&v).unwrap();
        let back: TraitVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert_normalized(&back, &budget);
    }

    #[test]
    fn test_all_zero_spreads_evenly() {
        let budget = TraitBudget::new(100, 100).unwrap();
        let v = TraitVector::new([0; TRAIT_COUNT], &budget);
        assert_normalized(&v, &budget);
        let max = v.weights().into_iter().max().unwrap();
        let min = v.weights().into_iter().min().unwrap();
        assert!(max - min <= 1);
    }

    #[test]
    fn test_single_trait_hits_cap() {
        let budget = TraitBudget::new(100, 100).unwrap();
        let v = TraitVector::from_pairs(&[(TraitKind::AcquisitionSun, 100)], &budget);
        assert_eq!(v.get(TraitKind::AcquisitionSun), 100);
        assert_normalized(&v, &budget);
    }

    #[test]
    fn test_residual_goes_to_lowest_traits() {
        let budget = TraitBudget::new(150, 100).unwrap();
        let v = TraitVector::from_pairs(&[(TraitKind::AcquisitionSun, 100)], &budget);
        assert_eq!(v.get(TraitKind::AcquisitionSun), 100);
        assert_normalized(&v, &budget);
        // 50 leftover points spread over the six empty traits.
        for kind in TraitKind::ALL.iter().skip(1) {
            let w = v.get(*kind);
            assert!((8..=9).contains(&w), "{kind} got {w}");
        }
    }

    #[test]
    fn test_rounding_overshoot_is_trimmed() {
        let budget = TraitBudget::new(100, 100).unwrap();
        // Six shares of 16.67 all round up to 17.
        let v = TraitVector::new([1, 1, 1, 1, 1, 1, 0], &budget);
        assert_normalized(&v, &budget);
    }

    #[test]
    fn test_dominant_prefers_heaviest() {
        let budget = TraitBudget::default();
        let v = TraitVector::from_pairs(
            &[(TraitKind::Capacity, 60), (TraitKind::AcquisitionSoil, 40)],
            &budget,
        );
        assert_eq!(v.dominant(), TraitKind::Capacity);
    }

    #[test]
    fn test_serde_roundtrip_keeps_weights() {
        let v = TraitVector::new([10, 20, 30, 40, 0, 0, 0], &TraitBudget::default());
        let json = serde_json::to_string(&v).unwrap();
        let back: TraitVector = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
