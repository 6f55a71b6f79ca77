//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! a `config.toml` file. Every constant the tick pipeline reads lives here,
//! and all fields are public so a driver can retune them between ticks.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults section by section)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 30
//! height = 30
//! seed = 7
//!
//! [traits]
//! total_points = 150
//!
//! [spores]
//! mutation_strength = 0.1
//! ```

use mycelia_data::{DataError, TraitBudget};
use serde::{Deserialize, Serialize};

/// Grid dimensions and randomness source.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    /// Seed for the engine RNG; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            seed: None,
        }
    }
}

/// Point budget of the heritable trait vector.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TraitConfig {
    pub total_points: u32,
    pub max_trait_value: u32,
}

impl Default for TraitConfig {
    fn default() -> Self {
        Self {
            total_points: 100,
            max_trait_value: 100,
        }
    }
}

impl TraitConfig {
    pub fn budget(&self) -> Result<TraitBudget, DataError> {
        TraitBudget::new(self.total_points, self.max_trait_value)
    }
}

/// Cell energy capacity derived from the pink trait.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CellConfig {
    pub base_capacity: f64,
    pub capacity_bonus_range: f64,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            base_capacity: 300.0,
            capacity_bonus_range: 2700.0,
        }
    }
}

/// Per-cell upkeep.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MetabolismConfig {
    /// Nutrition drained per cell per second before modifiers.
    pub base_drain_rate: f64,
    /// Drain multiplier at full yellow trait.
    pub min_efficiency: f64,
    /// Weight of `ln(cell_count)` in the organism size multiplier.
    pub size_overhead: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            base_drain_rate: 2.0,
            min_efficiency: 0.2,
            size_overhead: 0.35,
        }
    }
}

/// Ceilings of the three acquisition pathways, in units per second at trait 100.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AcquisitionConfig {
    pub max_photosynthesis_rate: f64,
    pub max_soil_absorption_rate: f64,
    pub max_parasitism_rate: f64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            max_photosynthesis_rate: 10.0,
            max_soil_absorption_rate: 6.0,
            max_parasitism_rate: 8.0,
        }
    }
}

/// Expansion and mushroom costs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GrowthConfig {
    pub base_expansion_cost: f64,
    pub base_mushroom_cost: f64,
    /// Cost fraction removed at trait 100.
    pub cost_reduction: f64,
    /// Nutrition must reach `threshold_multiplier × cost` before spending.
    pub threshold_multiplier: f64,
    /// Share of the expansion cost handed to the new cell.
    pub offspring_energy_fraction: f64,
    /// Mushroom progress per second (maturity at 1.0).
    pub mushroom_growth_rate: f64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            base_expansion_cost: 60.0,
            base_mushroom_cost: 200.0,
            cost_reduction: 0.8,
            threshold_multiplier: 1.2,
            offspring_energy_fraction: 0.5,
            mushroom_growth_rate: 0.2,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SporeConfig {
    /// Spores released per mature mushroom.
    pub count: usize,
    pub scatter_radius: f64,
    /// Seconds a spore waits for an empty tile.
    pub lifetime: f64,
    /// Nutrition of a freshly germinated cell.
    pub germination_energy: u64,
    /// Upper bound of a point transfer as a fraction of the trait total.
    pub mutation_strength: f64,
}

impl Default for SporeConfig {
    fn default() -> Self {
        Self {
            count: 5,
            scatter_radius: 4.0,
            lifetime: 3.0,
            germination_energy: 40,
            mutation_strength: 0.05,
        }
    }
}

/// Local energy flow between cells of one organism.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SharingConfig {
    /// Units per second a starving cell may pull.
    pub rate: f64,
    pub push_threshold: f64,
    pub pull_threshold: f64,
    pub donor_threshold: f64,
    /// Largest share of its stock a donor gives up per tick.
    pub donor_cap: f64,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            rate: 20.0,
            push_threshold: 0.9,
            pull_threshold: 0.2,
            donor_threshold: 0.5,
            donor_cap: 0.1,
        }
    }
}

/// Soil stock and regeneration of the ground tiles.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TileConfig {
    pub max_soil: u64,
    pub initial_soil: u64,
    pub empty_regen_rate: f64,
    pub occupied_regen_rate: f64,
    /// Exponent of the `1 - (soil/max)^power` slowdown curve.
    pub slowdown_power: f64,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            max_soil: 200,
            initial_soil: 100,
            empty_regen_rate: 3.0,
            occupied_regen_rate: 0.5,
            slowdown_power: 2.0,
        }
    }
}

/// Day/night clock consumed by the driver.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DayCycleConfig {
    /// Seconds per full day.
    pub day_length: f64,
    /// Fraction of the day with sunlight.
    pub day_ratio: f64,
    /// Sun rate per tile at noon.
    pub max_sun_rate: f64,
}

impl Default for DayCycleConfig {
    fn default() -> Self {
        Self {
            day_length: 120.0,
            day_ratio: 0.6,
            max_sun_rate: 20.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub traits: TraitConfig,
    pub cell: CellConfig,
    pub metabolism: MetabolismConfig,
    pub acquisition: AcquisitionConfig,
    pub growth: GrowthConfig,
    pub spores: SporeConfig,
    pub sharing: SharingConfig,
    pub tiles: TileConfig,
    pub day_cycle: DayCycleConfig,
}

fn is_fraction(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

fn is_non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn is_at_least(v: f64, min: f64) -> bool {
    v.is_finite() && v >= min
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl SimConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.world.width > 0, "World width must be positive");
        anyhow::ensure!(self.world.height > 0, "World height must be positive");
        anyhow::ensure!(
            self.world.width <= 1000 && self.world.height <= 1000,
            "World too large (max 1000 per side)"
        );

        self.traits.budget()?;

        anyhow::ensure!(
            is_at_least(self.cell.base_capacity, 1.0),
            "Base capacity must be finite and at least 1"
        );
        anyhow::ensure!(
            is_non_negative(self.cell.capacity_bonus_range),
            "Capacity bonus range must be finite and non-negative"
        );

        anyhow::ensure!(
            is_non_negative(self.metabolism.base_drain_rate),
            "Base drain rate must be finite and non-negative"
        );
        anyhow::ensure!(
            is_fraction(self.metabolism.min_efficiency),
            "Minimum efficiency must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_non_negative(self.metabolism.size_overhead),
            "Size overhead must be finite and non-negative"
        );

        anyhow::ensure!(
            is_non_negative(self.acquisition.max_photosynthesis_rate)
                && is_non_negative(self.acquisition.max_soil_absorption_rate)
                && is_non_negative(self.acquisition.max_parasitism_rate),
            "Acquisition rates must be finite and non-negative"
        );

        anyhow::ensure!(
            is_non_negative(self.growth.base_expansion_cost)
                && is_non_negative(self.growth.base_mushroom_cost),
            "Growth costs must be finite and non-negative"
        );
        anyhow::ensure!(
            is_fraction(self.growth.cost_reduction),
            "Cost reduction must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_at_least(self.growth.threshold_multiplier, 1.0),
            "Growth threshold multiplier must be finite and at least 1.0"
        );
        anyhow::ensure!(
            is_fraction(self.growth.offspring_energy_fraction),
            "Offspring energy fraction must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_non_negative(self.growth.mushroom_growth_rate),
            "Mushroom growth rate must be finite and non-negative"
        );

        anyhow::ensure!(
            is_non_negative(self.spores.scatter_radius),
            "Spore scatter radius must be finite and non-negative"
        );
        anyhow::ensure!(
            is_non_negative(self.spores.lifetime),
            "Spore lifetime must be finite and non-negative"
        );
        anyhow::ensure!(
            self.spores.germination_energy > 0,
            "Germination energy must be positive"
        );
        anyhow::ensure!(
            is_fraction(self.spores.mutation_strength),
            "Mutation strength must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            is_non_negative(self.sharing.rate),
            "Sharing rate must be finite and non-negative"
        );
        anyhow::ensure!(
            is_fraction(self.sharing.push_threshold)
                && is_fraction(self.sharing.pull_threshold)
                && is_fraction(self.sharing.donor_threshold)
                && is_fraction(self.sharing.donor_cap),
            "Sharing thresholds must be in [0.0, 1.0]"
        );

        anyhow::ensure!(self.tiles.max_soil > 0, "Max soil must be positive");
        anyhow::ensure!(
            self.tiles.initial_soil <= self.tiles.max_soil,
            "Initial soil cannot exceed max soil"
        );
        anyhow::ensure!(
            is_non_negative(self.tiles.empty_regen_rate)
                && is_non_negative(self.tiles.occupied_regen_rate),
            "Soil regeneration rates must be finite and non-negative"
        );
        anyhow::ensure!(
            is_positive(self.tiles.slowdown_power),
            "Slowdown power must be positive"
        );

        anyhow::ensure!(
            is_positive(self.day_cycle.day_length),
            "Day length must be finite and positive"
        );
        anyhow::ensure!(
            is_fraction(self.day_cycle.day_ratio),
            "Day ratio must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_non_negative(self.day_cycle.max_sun_rate),
            "Max sun rate must be finite and non-negative"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// Sections and fields left out of the file keep their defaults.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }
}
