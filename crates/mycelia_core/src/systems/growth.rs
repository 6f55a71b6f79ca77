//! Growth system - expansion into free tiles and mushroom arming.

use crate::cell::Cell;
use crate::config::GrowthConfig;
use crate::tile::TileGrid;
use mycelia_data::{EnergyKind, FlowLabel, GridPos, TraitKind, TraitVector};
use rand::seq::SliceRandom;
use rand::Rng;

fn reduced_cost(base: f64, trait_fraction: f64, config: &GrowthConfig) -> u64 {
    (base * (1.0 - trait_fraction * config.cost_reduction))
        .round()
        .max(0.0) as u64
}

/// Nutrition spent on one expansion; blue cuts it by up to `cost_reduction`.
#[must_use]
pub fn expansion_cost(traits: &TraitVector, config: &GrowthConfig) -> u64 {
    reduced_cost(
        config.base_expansion_cost,
        traits.fraction(TraitKind::ExpansionCost),
        config,
    )
}

/// Nutrition spent to arm a mushroom; purple cuts it by up to `cost_reduction`.
#[must_use]
pub fn mushroom_cost(traits: &TraitVector, config: &GrowthConfig) -> u64 {
    reduced_cost(
        config.base_mushroom_cost,
        traits.fraction(TraitKind::ReproductionCost),
        config,
    )
}

#[must_use]
pub fn can_afford(cell: &Cell, cost: u64, config: &GrowthConfig) -> bool {
    cell.nutrition() as f64 >= config.threshold_multiplier * cost as f64
}

/// A uniformly random free cardinal neighbour inside the grid.
pub fn pick_expansion_target<R: Rng>(
    origin: GridPos,
    tiles: &TileGrid,
    rng: &mut R,
) -> Option<GridPos> {
    let free: Vec<GridPos> = origin
        .cardinal_neighbors()
        .into_iter()
        .filter(|p| tiles.is_free(*p))
        .collect();
    free.choose(rng).copied()
}

/// Debits the expansion cost and returns the offspring's starting nutrition.
///
/// `None` when the cell can no longer pay in full, or when the offspring
/// would start empty; nothing is debited in either case.
pub fn pay_for_expansion(cell: &mut Cell, cost: u64, config: &GrowthConfig) -> Option<u64> {
    let offspring = (cost as f64 * config.offspring_energy_fraction).floor() as u64;
    if offspring == 0 || cell.nutrition() < cost {
        return None;
    }
    cell.consume(EnergyKind::Nutrition, cost, FlowLabel::Expansion);
    Some(offspring)
}

/// Arms a mushroom when the cell can afford one and has none growing.
pub fn try_arm_mushroom(cell: &mut Cell, traits: &TraitVector, config: &GrowthConfig) -> bool {
    if cell.has_mushroom() || !cell.is_alive() {
        return false;
    }
    let cost = mushroom_cost(traits, config);
    if !can_afford(cell, cost, config) {
        return false;
    }
    cell.consume(EnergyKind::Nutrition, cost, FlowLabel::Reproduction);
    cell.start_mushroom();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycelia_data::{OrganismId, TraitBudget};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn traits(pairs: &[(TraitKind, u32)]) -> TraitVector {
        TraitVector::from_pairs(pairs, &TraitBudget::default())
    }

    #[test]
    fn test_costs_reduced_by_trait() {
        let config = GrowthConfig::default();
        let green = traits(&[(TraitKind::AcquisitionSun, 100)]);
        let blue = traits(&[(TraitKind::ExpansionCost, 100)]);
        let purple = traits(&[(TraitKind::ReproductionCost, 100)]);
        assert_eq!(expansion_cost(&green, &config), 60);
        assert_eq!(expansion_cost(&blue, &config), 12);
        assert_eq!(mushroom_cost(&green, &config), 200);
        assert_eq!(mushroom_cost(&purple, &config), 40);
    }

    #[test]
    fn test_threshold_applies_multiplier() {
        let config = GrowthConfig::default();
        let poor = Cell::new(GridPos::new(0, 0), OrganismId(1), 300, 71);
        let rich = Cell::new(GridPos::new(0, 0), OrganismId(1), 300, 72);
        assert!(!can_afford(&poor, 60, &config));
        assert!(can_afford(&rich, 60, &config));
    }

    #[test]
    fn test_target_is_free_cardinal_neighbour() {
        let mut tiles = TileGrid::new(3, 3, 0).unwrap();
        let origin = GridPos::new(1, 1);
        tiles.set_occupied(origin, true);
        tiles.set_occupied(GridPos::new(1, 0), true);
        tiles.set_occupied(GridPos::new(0, 1), true);
        tiles.set_occupied(GridPos::new(2, 1), true);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(
                pick_expansion_target(origin, &tiles, &mut rng),
                Some(GridPos::new(1, 2))
            );
        }
        tiles.set_occupied(GridPos::new(1, 2), true);
        assert_eq!(pick_expansion_target(origin, &tiles, &mut rng), None);
    }

    #[test]
    fn test_corner_never_targets_outside() {
        let tiles = TileGrid::new(2, 2, 0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let target = pick_expansion_target(GridPos::new(0, 0), &tiles, &mut rng).unwrap();
            assert!(tiles.in_bounds(target));
        }
    }

    #[test]
    fn test_expansion_payment() {
        let config = GrowthConfig::default();
        let mut cell = Cell::new(GridPos::new(0, 0), OrganismId(1), 300, 80);
        assert_eq!(pay_for_expansion(&mut cell, 60, &config), Some(30));
        assert_eq!(cell.nutrition(), 20);
        assert_eq!(cell.flow().consumed(FlowLabel::Expansion), 60);
        assert_eq!(pay_for_expansion(&mut cell, 60, &config), None);
        assert_eq!(cell.nutrition(), 20);
    }

    #[test]
    fn test_stillborn_offspring_costs_nothing() {
        let config = GrowthConfig::default();
        let mut cell = Cell::new(GridPos::new(0, 0), OrganismId(1), 300, 100);
        assert_eq!(pay_for_expansion(&mut cell, 1, &config), None);
        assert_eq!(cell.nutrition(), 100);
        assert_eq!(cell.flow().consumed(FlowLabel::Expansion), 0);
    }

    #[test]
    fn test_mushroom_armed_once() {
        let config = GrowthConfig::default();
        let green = traits(&[(TraitKind::AcquisitionSun, 100)]);
        let mut cell = Cell::new(GridPos::new(0, 0), OrganismId(1), 3000, 600);
        assert!(try_arm_mushroom(&mut cell, &green, &config));
        assert_eq!(cell.nutrition(), 400);
        assert!(!try_arm_mushroom(&mut cell, &green, &config));
        assert_eq!(cell.flow().consumed(FlowLabel::Reproduction), 200);
    }
}
