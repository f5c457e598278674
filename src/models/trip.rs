//! Trip inputs: climate buckets, traveler personas and the generation request

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PackwiseError;

/// Coarse climate bucket used to select clothing recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateCategory {
    Tropical,
    Desert,
    Mediterranean,
    HumidContinental,
    Subarctic,
    Temperate,
    Oceanic,
    Alpine,
}

impl ClimateCategory {
    /// All categories, in declaration order
    pub const ALL: [ClimateCategory; 8] = [
        ClimateCategory::Tropical,
        ClimateCategory::Desert,
        ClimateCategory::Mediterranean,
        ClimateCategory::HumidContinental,
        ClimateCategory::Subarctic,
        ClimateCategory::Temperate,
        ClimateCategory::Oceanic,
        ClimateCategory::Alpine,
    ];

    /// Friendly name for display and prompts
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            ClimateCategory::Tropical => "tropical",
            ClimateCategory::Desert => "desert",
            ClimateCategory::Mediterranean => "mediterranean",
            ClimateCategory::HumidContinental => "humid continental",
            ClimateCategory::Subarctic => "subarctic",
            ClimateCategory::Temperate => "temperate",
            ClimateCategory::Oceanic => "oceanic",
            ClimateCategory::Alpine => "alpine",
        }
    }
}

impl fmt::Display for ClimateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Traveler persona used to vary item selection within a climate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelerType {
    SoloMale,
    SoloFemale,
    Couple,
    CoupleWithKids,
    Business,
}

impl TravelerType {
    pub const ALL: [TravelerType; 5] = [
        TravelerType::SoloMale,
        TravelerType::SoloFemale,
        TravelerType::Couple,
        TravelerType::CoupleWithKids,
        TravelerType::Business,
    ];

    /// Whether the party includes children
    #[must_use]
    pub fn with_kids(&self) -> bool {
        matches!(self, TravelerType::CoupleWithKids)
    }
}

impl fmt::Display for TravelerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelerType::SoloMale => write!(f, "Solo (male)"),
            TravelerType::SoloFemale => write!(f, "Solo (female)"),
            TravelerType::Couple => write!(f, "Couple"),
            TravelerType::CoupleWithKids => write!(f, "Couple with kids"),
            TravelerType::Business => write!(f, "Business"),
        }
    }
}

impl FromStr for TravelerType {
    type Err = PackwiseError;

    /// Accepts `SoloFemale`, `solo-female`, `solo_female` and `solo female`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "solomale" => Ok(TravelerType::SoloMale),
            "solofemale" => Ok(TravelerType::SoloFemale),
            "couple" => Ok(TravelerType::Couple),
            "couplewithkids" | "family" => Ok(TravelerType::CoupleWithKids),
            "business" => Ok(TravelerType::Business),
            _ => Err(PackwiseError::validation(format!(
                "Unknown traveler type '{s}'"
            ))),
        }
    }
}

/// Caller-supplied inputs for one packing list generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub destination: String,
    pub duration_days: i32,
    pub traveler_type: TravelerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured_temp_celsius: Option<f64>,
}

impl TripRequest {
    #[must_use]
    pub fn new(destination: impl Into<String>, duration_days: i32, traveler_type: TravelerType) -> Self {
        Self {
            destination: destination.into(),
            duration_days,
            traveler_type,
            measured_temp_celsius: None,
        }
    }

    #[must_use]
    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.measured_temp_celsius = Some(celsius);
        self
    }

    /// A request is ready once it names a destination and a positive duration.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.destination.trim().is_empty() && self.duration_days > 0
    }
}

/// What a packing list was generated for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub destination: String,
    pub duration_days: i32,
    pub climate: ClimateCategory,
    pub traveler_type: TravelerType,
}
