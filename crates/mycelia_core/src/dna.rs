//! Trait vector mutation and display colour.

use mycelia_data::{TraitBudget, TraitKind, TraitVector, TRAIT_COUNT};
use rand::Rng;

/// Display palette, one colour per trait in [`TraitKind::ALL`] order.
const PALETTE: [(f64, f64, f64); TRAIT_COUNT] = [
    (60.0, 200.0, 80.0),
    (220.0, 50.0, 50.0),
    (140.0, 90.0, 40.0),
    (230.0, 210.0, 60.0),
    (240.0, 140.0, 190.0),
    (60.0, 110.0, 230.0),
    (150.0, 70.0, 200.0),
];

pub trait DnaLogic {
    /// Returns a copy with one to three random point transfers applied.
    fn mutate_with_rng<R: Rng>(&self, strength: f64, budget: &TraitBudget, rng: &mut R) -> Self;
    /// Weight-averaged palette colour; purely a display concern.
    fn dominant_color(&self) -> (u8, u8, u8);
}

impl DnaLogic for TraitVector {
    fn mutate_with_rng<R: Rng>(&self, strength: f64, budget: &TraitBudget, rng: &mut R) -> Self {
        let mut weights = self.weights();
        let max_amount = (f64::from(budget.total()) * strength.clamp(0.0, 1.0)).floor() as u32;
        let transfers = rng.gen_range(1..=3);

        for _ in 0..transfers {
            if max_amount == 0 {
                break;
            }
            let source = rng.gen_range(0..TRAIT_COUNT);
            let mut target = rng.gen_range(0..TRAIT_COUNT - 1);
            if target >= source {
                target += 1;
            }
            let room = budget.cap().saturating_sub(weights[target]);
            let amount = rng
                .gen_range(1..=max_amount)
                .min(weights[source])
                .min(room);
            weights[source] -= amount;
            weights[target] += amount;
        }

        TraitVector::new(weights, budget)
    }

    fn dominant_color(&self) -> (u8, u8, u8) {
        let total = f64::from(self.sum().max(1));
        let (mut r, mut g, mut b) = (0.0, 0.0, 0.0);
        for kind in TraitKind::ALL {
            let w = f64::from(self.get(kind)) / total;
            let (pr, pg, pb) = PALETTE[kind.index()];
            r += pr * w;
            g += pg * w;
            b += pb * w;
        }
        (
            r.round().clamp(0.0, 255.0) as u8,
            g.round().clamp(0.0, 255.0) as u8,
            b.round().clamp(0.0, 255.0) as u8,
        )
    }
}

/// Draws a uniformly random raw vector and normalizes it.
pub fn random_traits_with_rng<R: Rng>(budget: &TraitBudget, rng: &mut R) -> TraitVector {
    let mut raw = [0u32; TRAIT_COUNT];
    for w in raw.iter_mut() {
        *w = rng.gen_range(0..=100);
    }
    TraitVector::new(raw, budget)
}
