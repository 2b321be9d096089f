//! Brew methods, strengths, display units and the static ratio table.

use crate::error::BrewError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coffee preparation technique.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BrewMethod {
    PourOver,
    FrenchPress,
    Espresso,
    Aeropress,
    Chemex,
    ColdBrew,
    MokaPot,
    V60,
}

/// Coarse three-level strength selector.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

/// Display system. Never changes the computed grams/milliliters.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
}

/// Water parts per coffee part for each strength.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RatioSet {
    pub weak: f64,
    pub medium: f64,
    pub strong: f64,
}

impl RatioSet {
    pub fn get(&self, strength: Strength) -> f64 {
        match strength {
            Strength::Weak => self.weak,
            Strength::Medium => self.medium,
            Strength::Strong => self.strong,
        }
    }
}

const ESPRESSO_ML_PER_SERVING: f64 = 30.0;
const CUP_ML_PER_SERVING: f64 = 240.0;

impl BrewMethod {
    pub const ALL: [BrewMethod; 8] = [
        BrewMethod::PourOver,
        BrewMethod::FrenchPress,
        BrewMethod::Espresso,
        BrewMethod::Aeropress,
        BrewMethod::Chemex,
        BrewMethod::ColdBrew,
        BrewMethod::MokaPot,
        BrewMethod::V60,
    ];

    /// Stable kebab-case identifier, also used in recipe keys.
    pub fn id(self) -> &'static str {
        match self {
            BrewMethod::PourOver => "pour-over",
            BrewMethod::FrenchPress => "french-press",
            BrewMethod::Espresso => "espresso",
            BrewMethod::Aeropress => "aeropress",
            BrewMethod::Chemex => "chemex",
            BrewMethod::ColdBrew => "cold-brew",
            BrewMethod::MokaPot => "moka-pot",
            BrewMethod::V60 => "v60",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BrewMethod::PourOver => "Pour Over",
            BrewMethod::FrenchPress => "French Press",
            BrewMethod::Espresso => "Espresso",
            BrewMethod::Aeropress => "AeroPress",
            BrewMethod::Chemex => "Chemex",
            BrewMethod::ColdBrew => "Cold Brew",
            BrewMethod::MokaPot => "Moka Pot",
            BrewMethod::V60 => "V60",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            BrewMethod::PourOver => "☕",
            BrewMethod::FrenchPress => "🫖",
            BrewMethod::Espresso => "⚡",
            BrewMethod::Aeropress => "🎯",
            BrewMethod::Chemex => "⏳",
            BrewMethod::ColdBrew => "🧊",
            BrewMethod::MokaPot => "🔥",
            BrewMethod::V60 => "🌀",
        }
    }

    /// Typical brew duration.
    pub fn brew_time(self) -> &'static str {
        match self {
            BrewMethod::PourOver => "3-4 min",
            BrewMethod::FrenchPress => "4 min",
            BrewMethod::Espresso => "25-30 sec",
            BrewMethod::Aeropress => "1-2 min",
            BrewMethod::Chemex => "4-5 min",
            BrewMethod::ColdBrew => "12-24 hrs",
            BrewMethod::MokaPot => "4-5 min",
            BrewMethod::V60 => "2-3 min",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BrewMethod::PourOver => "Clean, bright cup with a slow, controlled pour",
            BrewMethod::FrenchPress => "Full-bodied immersion brew with rich oils",
            BrewMethod::Espresso => "Concentrated shot pulled under pressure",
            BrewMethod::Aeropress => "Versatile pressure brew, smooth and quick",
            BrewMethod::Chemex => "Thick filter for an exceptionally clean cup",
            BrewMethod::ColdBrew => "Long, cold steep for a low-acid concentrate",
            BrewMethod::MokaPot => "Stovetop brew, strong and espresso-like",
            BrewMethod::V60 => "Spiral-ribbed cone for a fast, nuanced pour",
        }
    }

    /// Ratio table entry. Every value is strictly positive.
    pub fn ratios(self) -> RatioSet {
        let (weak, medium, strong) = match self {
            BrewMethod::PourOver => (17.0, 15.0, 13.0),
            BrewMethod::FrenchPress => (17.0, 15.0, 12.0),
            BrewMethod::Espresso => (2.5, 2.0, 1.8),
            BrewMethod::Aeropress => (16.0, 14.0, 12.0),
            BrewMethod::Chemex => (17.0, 16.0, 15.0),
            BrewMethod::ColdBrew => (12.0, 8.0, 5.0),
            BrewMethod::MokaPot => (10.0, 8.0, 7.0),
            BrewMethod::V60 => (17.0, 16.0, 15.0),
        };
        RatioSet {
            weak,
            medium,
            strong,
        }
    }

    pub fn ratio(self, strength: Strength) -> f64 {
        self.ratios().get(strength)
    }

    /// Base water volume for one serving.
    pub fn water_per_serving_ml(self) -> f64 {
        match self {
            BrewMethod::Espresso => ESPRESSO_ML_PER_SERVING,
            _ => CUP_ML_PER_SERVING,
        }
    }
}

impl Strength {
    pub const ALL: [Strength; 3] = [Strength::Weak, Strength::Medium, Strength::Strong];

    pub fn id(self) -> &'static str {
        match self {
            Strength::Weak => "weak",
            Strength::Medium => "medium",
            Strength::Strong => "strong",
        }
    }
}

impl Units {
    pub fn id(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl fmt::Display for BrewMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BrewMethod {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        BrewMethod::ALL
            .into_iter()
            .find(|m| m.id() == wanted)
            .ok_or_else(|| BrewError::Parse {
                kind: "brew method",
                value: s.to_string(),
            })
    }
}

impl FromStr for Strength {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Strength::ALL
            .into_iter()
            .find(|st| st.id() == wanted)
            .ok_or_else(|| BrewError::Parse {
                kind: "strength",
                value: s.to_string(),
            })
    }
}

impl FromStr for Units {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(BrewError::Parse {
                kind: "units",
                value: s.to_string(),
            }),
        }
    }
}
