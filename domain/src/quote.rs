//! Authoritative payloads from quote and structured-data providers.

use crate::state::{SourceRef, Trend};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Last-traded quote for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectQuote {
    pub symbol: String,
    pub asset_name: String,
    pub price: f64,
    pub currency: String,
    pub previous_close: Option<f64>,
    pub source: SourceRef,
}

impl DirectQuote {
    /// Percentage change against the previous close.
    pub fn change_percent(&self) -> Option<f64> {
        percent_change(self.price, self.previous_close?)
    }

    pub fn trend(&self) -> Trend {
        self.change_percent()
            .map(Trend::from_change_percent)
            .unwrap_or_default()
    }

    /// `"{price:.2} {currency}"`, e.g. `2025.00 USD`.
    pub fn display_value(&self) -> String {
        format!("{:.2} {}", self.price, self.currency)
    }
}

/// Latest observation of a statistical series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredObservation {
    pub provider: String,
    pub series_id: String,
    pub title: String,
    pub value: f64,
    pub units: String,
    pub previous_value: Option<f64>,
    pub observed_on: Option<NaiveDate>,
    pub source: SourceRef,
}

impl StructuredObservation {
    pub fn change_percent(&self) -> Option<f64> {
        percent_change(self.value, self.previous_value?)
    }

    pub fn trend(&self) -> Trend {
        self.change_percent()
            .map(Trend::from_change_percent)
            .unwrap_or_default()
    }

    /// Percent series render as `5.33%`; everything else as `value units`.
    pub fn display_value(&self) -> String {
        let units = self.units.trim();
        if units == "%" || units.to_lowercase().starts_with("percent") {
            format!("{:.2}%", self.value)
        } else if units.is_empty() {
            format!("{:.2}", self.value)
        } else {
            format!("{:.2} {}", self.value, units)
        }
    }
}

fn percent_change(current: f64, previous: f64) -> Option<f64> {
    (previous > 0.0 && current.is_finite()).then(|| (current - previous) / previous * 100.0)
}

/// Signed two-decimal percentage, e.g. `+1.23%`.
pub fn format_change_percent(change: f64) -> String {
    format!("{:+.2}%", change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SourceKind;

    fn gold(price: f64, previous_close: Option<f64>) -> DirectQuote {
        DirectQuote {
            symbol: "GC=F".into(),
            asset_name: "Gold".into(),
            price,
            currency: "USD".into(),
            previous_close,
            source: SourceRef::new(
                "Yahoo Finance - Gold",
                "https://finance.yahoo.com/quote/GC=F",
                SourceKind::DirectApi,
            ),
        }
    }

    #[test]
    fn test_quote_trend_uses_stable_band() {
        assert_eq!(gold(2025.0, Some(2000.0)).trend(), Trend::Rising);
        assert_eq!(gold(2000.0, Some(2025.0)).trend(), Trend::Falling);
        // +0.05% is inside the band
        assert_eq!(gold(2001.0, Some(2000.0)).trend(), Trend::Stable);
        assert_eq!(gold(2025.0, None).trend(), Trend::Stable);
    }

    #[test]
    fn test_quote_formatting() {
        let quote = gold(2025.0, Some(2000.0));
        assert_eq!(quote.display_value(), "2025.00 USD");
        assert_eq!(format_change_percent(quote.change_percent().unwrap()), "+1.25%");
        assert_eq!(format_change_percent(-0.5), "-0.50%");
    }

    #[test]
    fn test_observation_units() {
        let mut obs = StructuredObservation {
            provider: "fred".into(),
            series_id: "DFF".into(),
            title: "Federal Funds Effective Rate".into(),
            value: 5.33,
            units: "Percent".into(),
            previous_value: Some(5.33),
            observed_on: None,
            source: SourceRef::new(
                "FRED",
                "https://fred.stlouisfed.org/series/DFF",
                SourceKind::StructuredApi,
            ),
        };
        assert_eq!(obs.display_value(), "5.33%");
        assert_eq!(obs.trend(), Trend::Stable);

        obs.units = "Billions of Dollars".into();
        obs.value = 27360.0;
        assert_eq!(obs.display_value(), "27360.00 Billions of Dollars");
    }
}
