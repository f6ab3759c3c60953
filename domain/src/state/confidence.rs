//! Trust labels attached to every produced state.

use serde::{Deserialize, Serialize};

/// Ordered trust label for a [`ConsensusState`](super::ConsensusState).
///
/// The derive order is the trust order, so comparisons read naturally:
///
/// ```
/// use sensing_domain::Confidence;
///
/// assert!(Confidence::ApiDirect > Confidence::WhitelistDirect);
/// assert!(Confidence::WhitelistDirect > Confidence::CrossValidated);
/// assert!(Confidence::CrossValidated > Confidence::Unknown);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    #[default]
    Unknown,
    /// Three or more independent domains agreed on the value.
    CrossValidated,
    /// Taken directly from whitelisted, implicitly trusted sources.
    WhitelistDirect,
    /// A verified first-party quote from a financial data API.
    ApiDirect,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Unknown => "unknown",
            Confidence::CrossValidated => "cross_validated",
            Confidence::WhitelistDirect => "whitelist_direct",
            Confidence::ApiDirect => "api_direct",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unknown" => Ok(Confidence::Unknown),
            "cross_validated" => Ok(Confidence::CrossValidated),
            "whitelist_direct" => Ok(Confidence::WhitelistDirect),
            "api_direct" => Ok(Confidence::ApiDirect),
            other => Err(format!("Unknown confidence label: {}", other)),
        }
    }
}

/// Direction of the most recent movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    #[default]
    Stable,
}

impl Trend {
    /// Changes within ±0.1% are reported as stable.
    pub const STABLE_BAND_PERCENT: f64 = 0.1;

    /// Classify a percentage change.
    pub fn from_change_percent(change_percent: f64) -> Self {
        if change_percent > Self::STABLE_BAND_PERCENT {
            Trend::Rising
        } else if change_percent < -Self::STABLE_BAND_PERCENT {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }

    /// Lenient parse used on oracle output; anything unrecognized is `Stable`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Rising => "rising",
            Trend::Falling => "falling",
            Trend::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rising" | "up" => Ok(Trend::Rising),
            "falling" | "down" => Ok(Trend::Falling),
            "stable" | "flat" => Ok(Trend::Stable),
            other => Err(format!("Unknown trend: {}", other)),
        }
    }
}
