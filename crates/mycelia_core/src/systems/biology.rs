//! Biology system - metabolism, energy acquisition, conversion and mushroom growth.
//!
//! Each function touches a single cell (plus its tile for soil). Parasitism
//! involves two cells, so it is split into a claim on the parasite side and a
//! drain on the victim side that the engine pairs up.

use crate::cell::Cell;
use crate::config::SimConfig;
use crate::tile::Tile;
use mycelia_data::{EnergyKind, FlowLabel, TraitKind, TraitVector};

/// Inputs shared by every biology step of one cell.
pub struct BiologyContext<'a> {
    pub config: &'a SimConfig,
    pub traits: &'a TraitVector,
    /// Cells of the owning fungus (at least 1).
    pub cell_count: usize,
    pub sun_rate: f64,
    pub dt: f64,
}

/// Drain multiplier from the yellow trait: 1.0 at trait 0 down to `min_efficiency` at 100.
#[must_use]
pub fn efficiency_multiplier(traits: &TraitVector, config: &SimConfig) -> f64 {
    let floor = config.metabolism.min_efficiency;
    floor + (1.0 - floor) * (1.0 - traits.fraction(TraitKind::Efficiency))
}

/// Coordination overhead of large fungi: `1 + ln(cells) × overhead`.
#[must_use]
pub fn size_multiplier(cell_count: usize, config: &SimConfig) -> f64 {
    1.0 + (cell_count.max(1) as f64).ln() * config.metabolism.size_overhead
}

#[must_use]
pub fn metabolism_rate(traits: &TraitVector, cell_count: usize, config: &SimConfig) -> f64 {
    config.metabolism.base_drain_rate
        * efficiency_multiplier(traits, config)
        * size_multiplier(cell_count, config)
}

/// Photosynthesis is capped by the green ceiling and by what the tile receives.
#[must_use]
pub fn photosynthesis_rate(traits: &TraitVector, sun_rate: f64, config: &SimConfig) -> f64 {
    if sun_rate <= 0.0 {
        return 0.0;
    }
    (traits.fraction(TraitKind::AcquisitionSun) * config.acquisition.max_photosynthesis_rate)
        .min(sun_rate)
}

#[must_use]
pub fn soil_absorption_rate(traits: &TraitVector, config: &SimConfig) -> f64 {
    traits.fraction(TraitKind::AcquisitionSoil) * config.acquisition.max_soil_absorption_rate
}

/// Drain per victim per second.
#[must_use]
pub fn parasitism_rate(traits: &TraitVector, config: &SimConfig) -> f64 {
    traits.fraction(TraitKind::AcquisitionDrain) * config.acquisition.max_parasitism_rate
}

pub fn metabolize(cell: &mut Cell, ctx: &BiologyContext) -> u64 {
    let rate = metabolism_rate(ctx.traits, ctx.cell_count, ctx.config);
    cell.rates.metabolism = rate;
    cell.accumulators.metabolism.add(rate * ctx.dt);
    let units = cell.accumulators.metabolism.extract_units();
    if units == 0 {
        return 0;
    }
    cell.consume(EnergyKind::Nutrition, units, FlowLabel::Metabolism)
}

pub fn photosynthesize(cell: &mut Cell, ctx: &BiologyContext) -> u64 {
    let rate = photosynthesis_rate(ctx.traits, ctx.sun_rate, ctx.config);
    cell.rates.photosynthesis = rate;
    if rate <= 0.0 {
        return 0;
    }
    cell.accumulators.photosynthesis.add(rate * ctx.dt);
    let units = cell.accumulators.photosynthesis.extract_units();
    cell.gain(EnergyKind::Sun, units, FlowLabel::Photosynthesis)
}

/// Pulls soil out of the tile under the cell.
///
/// The cell gets only what the tile actually had and what fits in the cell;
/// anything that does not fit stays in the ground.
pub fn absorb_soil(cell: &mut Cell, tile: &mut Tile, ctx: &BiologyContext) -> u64 {
    if tile.soil() == 0 {
        cell.rates.soil_absorption = 0.0;
        return 0;
    }
    let rate = soil_absorption_rate(ctx.traits, ctx.config);
    cell.rates.soil_absorption = rate;
    cell.accumulators.soil_absorption.add(rate * ctx.dt);
    let units = cell
        .accumulators
        .soil_absorption
        .extract_units()
        .min(cell.deficit());
    if units == 0 {
        return 0;
    }
    let obtained = tile.extract_soil(units);
    cell.gain(EnergyKind::Soil, obtained, FlowLabel::SoilAbsorption)
}

/// Units this cell may take from one victim on this pass.
///
/// Called once per enemy neighbour, so the aggregate drain scales with the
/// number of victims. Bounded by the parasite's free capacity.
pub fn parasitism_claim(parasite: &mut Cell, ctx: &BiologyContext) -> u64 {
    let rate = parasitism_rate(ctx.traits, ctx.config);
    if rate <= 0.0 {
        return 0;
    }
    parasite.accumulators.parasitism.add(rate * ctx.dt);
    parasite
        .accumulators
        .parasitism
        .extract_units()
        .min(parasite.deficit())
}

/// Takes up to `units` nutrition from the victim; it may die from this.
pub fn drain_victim(victim: &mut Cell, units: u64) -> u64 {
    if units == 0 || !victim.is_alive() {
        return 0;
    }
    victim.consume(EnergyKind::Nutrition, units, FlowLabel::Parasitism)
}

pub fn feed_parasite(parasite: &mut Cell, units: u64) -> u64 {
    parasite.gain(EnergyKind::Nutrition, units, FlowLabel::Parasitism)
}

/// Converts held sun (or, failing that, soil) into nutrition.
pub fn convert(cell: &mut Cell) -> u64 {
    cell.convert_stored_energy().map_or(0, |(_, amount)| amount)
}

/// Advances an armed mushroom; true when it matured this step.
pub fn grow_mushroom(cell: &mut Cell, config: &SimConfig, dt: f64) -> bool {
    if !cell.has_mushroom() {
        return false;
    }
    cell.grow_mushroom(config.growth.mushroom_growth_rate * dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileGrid;
    use mycelia_data::{GridPos, OrganismId, TraitBudget};

    fn traits(pairs: &[(TraitKind, u32)]) -> TraitVector {
        TraitVector::from_pairs(pairs, &TraitBudget::default())
    }

    fn ctx<'a>(config: &'a SimConfig, traits: &'a TraitVector, dt: f64) -> BiologyContext<'a> {
        BiologyContext {
            config,
            traits,
            cell_count: 1,
            sun_rate: 20.0,
            dt,
        }
    }

    #[test]
    fn test_efficiency_range() {
        let config = SimConfig::default();
        let lazy = traits(&[(TraitKind::AcquisitionSun, 100)]);
        let thrifty = traits(&[(TraitKind::Efficiency, 100)]);
        assert!((efficiency_multiplier(&lazy, &config) - 1.0).abs() < 1e-12);
        assert!((efficiency_multiplier(&thrifty, &config) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_size_multiplier_grows_logarithmically() {
        let config = SimConfig::default();
        assert_eq!(size_multiplier(1, &config), 1.0);
        let ten = size_multiplier(10, &config);
        assert!((ten - (1.0 + 10f64.ln() * 0.35)).abs() < 1e-12);
        assert_eq!(size_multiplier(0, &config), 1.0);
    }

    #[test]
    fn test_photosynthesis_capped_by_sun() {
        let config = SimConfig::default();
        let green = traits(&[(TraitKind::AcquisitionSun, 100)]);
        assert_eq!(photosynthesis_rate(&green, 20.0, &config), 10.0);
        assert_eq!(photosynthesis_rate(&green, 4.0, &config), 4.0);
        assert_eq!(photosynthesis_rate(&green, 0.0, &config), 0.0);
    }

    #[test]
    fn test_metabolism_drains_nutrition_over_time() {
        let config = SimConfig::default();
        let t = traits(&[(TraitKind::AcquisitionSun, 100)]);
        let c = ctx(&config, &t, 0.5);
        let mut cell = Cell::new(GridPos::new(0, 0), OrganismId(1), 300, 10);
        assert_eq!(metabolize(&mut cell, &c), 1);
        assert_eq!(cell.nutrition(), 9);
        assert_eq!(cell.flow().consumed(FlowLabel::Metabolism), 1);
        assert_eq!(cell.rates.metabolism, 2.0);
    }

    #[test]
    fn test_soil_absorption_bounded_by_tile() {
        let config = SimConfig::default();
        let t = traits(&[(TraitKind::AcquisitionSoil, 100)]);
        let c = ctx(&config, &t, 1.0);
        let mut grid = TileGrid::new(1, 1, 2).unwrap();
        let tile = grid.get_mut(GridPos::new(0, 0)).unwrap();
        let mut cell = Cell::new(GridPos::new(0, 0), OrganismId(1), 300, 10);
        assert_eq!(absorb_soil(&mut cell, tile, &c), 2);
        assert_eq!(tile.soil(), 0);
        assert_eq!(cell.energy_of(EnergyKind::Soil), 2);
        assert_eq!(absorb_soil(&mut cell, tile, &c), 0);
    }

    #[test]
    fn test_parasitism_claim_per_victim() {
        let config = SimConfig::default();
        let red = traits(&[(TraitKind::AcquisitionDrain, 100)]);
        let c = ctx(&config, &red, 1.0);
        let mut parasite = Cell::new(GridPos::new(0, 0), OrganismId(1), 300, 10);
        let mut victim = Cell::new(GridPos::new(1, 0), OrganismId(2), 300, 5);
        let claim = parasitism_claim(&mut parasite, &c);
        assert_eq!(claim, 8);
        let taken = drain_victim(&mut victim, claim);
        assert_eq!(taken, 5);
        assert!(!victim.is_alive());
        assert_eq!(feed_parasite(&mut parasite, taken), 5);
        assert_eq!(parasite.nutrition(), 15);
    }

    #[test]
    fn test_mushroom_matures_at_configured_rate() {
        let config = SimConfig::default();
        let mut cell = Cell::new(GridPos::new(0, 0), OrganismId(1), 300, 10);
        cell.start_mushroom();
        assert!(!grow_mushroom(&mut cell, &config, 4.0));
        assert!(grow_mushroom(&mut cell, &config, 1.0));
    }
}
