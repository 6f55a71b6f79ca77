//! Day/night clock feeding the sun rate to the driver.

use crate::config::DayCycleConfig;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "☀️ Day",
            TimeOfDay::Night => "🌙 Night",
        }
    }
}

/// Sine-shaped daylight over a repeating day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCycle {
    pub day_length: f64,
    pub day_ratio: f64,
    pub max_sun_rate: f64,
}

impl From<&DayCycleConfig> for DayCycle {
    fn from(config: &DayCycleConfig) -> Self {
        Self {
            day_length: config.day_length,
            day_ratio: config.day_ratio,
            max_sun_rate: config.max_sun_rate,
        }
    }
}

impl Default for DayCycle {
    fn default() -> Self {
        Self::from(&DayCycleConfig::default())
    }
}

impl DayCycle {
    /// Position within the current day, in seconds.
    #[must_use]
    pub fn time_in_cycle(&self, elapsed: f64) -> f64 {
        if self.day_length <= 0.0 {
            return 0.0;
        }
        elapsed.rem_euclid(self.day_length)
    }

    fn day_duration(&self) -> f64 {
        self.day_length * self.day_ratio.clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_daytime(&self, elapsed: f64) -> bool {
        self.time_in_cycle(elapsed) < self.day_duration()
    }

    #[must_use]
    pub fn time_of_day(&self, elapsed: f64) -> TimeOfDay {
        if self.is_daytime(elapsed) {
            TimeOfDay::Day
        } else {
            TimeOfDay::Night
        }
    }

    /// Sun units per tile per second: a half sine over the day, zero at night.
    #[must_use]
    pub fn sun_rate_per_tile(&self, elapsed: f64) -> f64 {
        let day = self.day_duration();
        let t = self.time_in_cycle(elapsed);
        if day <= 0.0 || t >= day {
            return 0.0;
        }
        (self.max_sun_rate * (PI * t / day).sin()).max(0.0)
    }
}
