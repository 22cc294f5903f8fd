use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::course::{HOLE_COUNT, HiddenHoleSet, HoleLayout};

/// Stored value meaning "no handicap cap".
pub const UNLIMITED_HANDICAP: f64 = 999.0;

/// Scoring configuration for one competition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionConfig {
    pub par: HoleLayout,
    pub hidden_holes: HiddenHoleSet,
    /// Scale applied to the hidden-hole total before course par is subtracted.
    pub hidden_weight: f64,
    /// Final handicap multiplier, the knob adjusted while simulating.
    pub multiplier: f64,
    pub limits: HandicapLimits,
    pub rounding_mode: RoundingMode,
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        Self {
            par: HoleLayout::STANDARD,
            hidden_holes: HiddenHoleSet::standard(),
            hidden_weight: 1.5,
            multiplier: 0.8,
            limits: HandicapLimits::default(),
            rounding_mode: RoundingMode::Round,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandicapLimits {
    /// Count hidden-hole strokes at most double par.
    pub double_par_cut: bool,
    #[serde(rename = "maxHdcp", alias = "maxHandicap")]
    pub max_handicap: HandicapCap,
}

impl Default for HandicapLimits {
    fn default() -> Self {
        Self {
            double_par_cut: true,
            max_handicap: HandicapCap::Unlimited,
        }
    }
}

/// Upper bound on a computed handicap. There is never a lower bound.
///
/// Serialized as a bare number; [`UNLIMITED_HANDICAP`] or anything above it
/// reads back as `Unlimited`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandicapCap {
    Unlimited,
    Max(f64),
}

impl HandicapCap {
    /// Clamp a handicap from above.
    pub fn apply(self, handicap: f64) -> f64 {
        match self {
            Self::Unlimited => handicap,
            Self::Max(max) => handicap.min(max),
        }
    }

    /// Common caps offered to competition organisers.
    pub const PRESETS: &[(HandicapCap, &str)] = &[
        (HandicapCap::Unlimited, "unlimited"),
        (HandicapCap::Max(36.0), "36 (men's standard)"),
        (HandicapCap::Max(40.0), "40 (women's standard)"),
        (HandicapCap::Max(72.0), "72 (double cut)"),
    ];

    /// Interpret a raw number the way it is stored.
    pub fn from_value(value: f64) -> Self {
        if value >= UNLIMITED_HANDICAP {
            Self::Unlimited
        } else {
            Self::Max(value)
        }
    }
}

impl Serialize for HandicapCap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unlimited => serializer.serialize_u32(UNLIMITED_HANDICAP as u32),
            Self::Max(max) => serializer.serialize_f64(*max),
        }
    }
}

impl<'de> Deserialize<'de> for HandicapCap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(value.map_or(Self::Unlimited, Self::from_value))
    }
}

/// How a handicap is brought to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Half away from zero.
    #[default]
    #[serde(alias = "nearest")]
    Round,
    #[serde(alias = "down")]
    Floor,
    #[serde(alias = "up")]
    Ceil,
}

impl RoundingMode {
    /// Round `value` to tenths.
    pub fn to_tenths(self, value: f64) -> f64 {
        // Snap products like 144.00000000000003 so floor/ceil see the intended tenth.
        let scaled = (value * 10.0 * 1e9).round() / 1e9;
        let rounded = match self {
            Self::Round => scaled.round(),
            Self::Floor => scaled.floor(),
            Self::Ceil => scaled.ceil(),
        };
        rounded / 10.0
    }
}

impl std::str::FromStr for RoundingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "round" | "nearest" => Ok(Self::Round),
            "floor" | "down" => Ok(Self::Floor),
            "ceil" | "up" => Ok(Self::Ceil),
            other => Err(ConfigError::UnknownRoundingMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("hole {hole} has par {par}; expected 3, 4 or 5")]
    InvalidPar { hole: usize, par: u8 },
    #[error("hidden weight must be a positive number, got {0}")]
    InvalidHiddenWeight(f64),
    #[error("multiplier must be a finite number, got {0}")]
    InvalidMultiplier(f64),
    #[error("handicap cap must be a finite number, got {0}")]
    InvalidHandicapCap(f64),
    #[error("hidden hole index {0} is outside 0..18")]
    HiddenHoleOutOfRange(usize),
    #[error("hidden hole {0} is listed more than once")]
    DuplicateHiddenHole(usize),
    #[error("unknown rounding mode \"{0}\" (expected round, floor or ceil)")]
    UnknownRoundingMode(String),
}

impl CompetitionConfig {
    /// Structural checks a caller runs before handing a config to the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (hole, &par) in self.par.0.iter().enumerate() {
            if !(3..=5).contains(&par) {
                return Err(ConfigError::InvalidPar { hole, par });
            }
        }
        if !self.hidden_weight.is_finite() || self.hidden_weight <= 0.0 {
            return Err(ConfigError::InvalidHiddenWeight(self.hidden_weight));
        }
        if !self.multiplier.is_finite() {
            return Err(ConfigError::InvalidMultiplier(self.multiplier));
        }
        if let HandicapCap::Max(max) = self.limits.max_handicap
            && !max.is_finite()
        {
            return Err(ConfigError::InvalidHandicapCap(max));
        }
        let mut seen = [false; HOLE_COUNT];
        for &hole in &self.hidden_holes.0 {
            let Some(slot) = seen.get_mut(hole) else {
                return Err(ConfigError::HiddenHoleOutOfRange(hole));
            };
            if *slot {
                return Err(ConfigError::DuplicateHiddenHole(hole));
            }
            *slot = true;
        }
        Ok(())
    }
}
