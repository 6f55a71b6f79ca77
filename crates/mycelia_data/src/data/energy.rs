use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of discrete energy unit held in a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnergyKind {
    /// Absorbed sunlight, waiting to be converted.
    Sun,
    /// Minerals extracted from the ground.
    Soil,
    /// The only kind spent on metabolism, growth and reproduction.
    Nutrition,
}

impl EnergyKind {
    pub const ALL: [EnergyKind; 3] = [EnergyKind::Sun, EnergyKind::Soil, EnergyKind::Nutrition];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            EnergyKind::Sun => 0,
            EnergyKind::Soil => 1,
            EnergyKind::Nutrition => 2,
        }
    }
}

impl fmt::Display for EnergyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnergyKind::Sun => "Sun",
            EnergyKind::Soil => "Soil",
            EnergyKind::Nutrition => "Nutrition",
        };
        f.write_str(name)
    }
}

/// Source or purpose tag for per-tick energy flow bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FlowLabel {
    Metabolism,
    Photosynthesis,
    SoilAbsorption,
    Parasitism,
    Expansion,
    Reproduction,
    Sharing,
}

impl FlowLabel {
    pub const ALL: [FlowLabel; 7] = [
        FlowLabel::Metabolism,
        FlowLabel::Photosynthesis,
        FlowLabel::SoilAbsorption,
        FlowLabel::Parasitism,
        FlowLabel::Expansion,
        FlowLabel::Reproduction,
        FlowLabel::Sharing,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            FlowLabel::Metabolism => 0,
            FlowLabel::Photosynthesis => 1,
            FlowLabel::SoilAbsorption => 2,
            FlowLabel::Parasitism => 3,
            FlowLabel::Expansion => 4,
            FlowLabel::Reproduction => 5,
            FlowLabel::Sharing => 6,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FlowLabel::Metabolism => "Metabolism",
            FlowLabel::Photosynthesis => "Photosynthesis",
            FlowLabel::SoilAbsorption => "Soil Absorption",
            FlowLabel::Parasitism => "Parasitism",
            FlowLabel::Expansion => "Expansion",
            FlowLabel::Reproduction => "Reproduction",
            FlowLabel::Sharing => "Sharing",
        }
    }
}

impl fmt::Display for FlowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
