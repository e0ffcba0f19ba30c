//! Recommendations derived from the aggregate.
//!
//! Waste and donation shares are compared as displayed, i.e. as
//! percentages rounded to one decimal.

use serde::Serialize;

use crate::aggregator::{percent, AggregateSummary};
use pantry_core::FreshnessState;

/// Waste share above which waste is flagged, in percent.
pub const HIGH_WASTE_PERCENT: f64 = 20.0;

/// Waste share at or below which the user is congratulated, in percent.
pub const LOW_WASTE_PERCENT: f64 = 10.0;

/// Severity used to style an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Needs action
    Danger,
    /// Worth a look
    Warning,
    /// Doing well
    Success,
    /// Neutral
    Info,
}

impl Tone {
    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Danger => "danger",
            Tone::Warning => "warning",
            Tone::Success => "success",
            Tone::Info => "info",
        }
    }
}

/// One recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    /// Waste share above [`HIGH_WASTE_PERCENT`]
    HighWaste {
        /// Waste share, percent
        waste_percent: f64,
    },
    /// Waste share at or below [`LOW_WASTE_PERCENT`]
    LowWaste {
        /// Waste share, percent
        waste_percent: f64,
    },
    /// Available items inside the near-expiry window
    ItemsNeedAttention {
        /// How many
        near_expiry: usize,
    },
    /// Some items were donated
    ThanksForDonating {
        /// Donation share, percent
        donation_percent: f64,
    },
    /// Nothing tracked yet
    GettingStarted,
}

impl Insight {
    /// Styling tier.
    pub fn tone(&self) -> Tone {
        match self {
            Insight::HighWaste { .. } => Tone::Danger,
            Insight::LowWaste { .. } => Tone::Success,
            Insight::ItemsNeedAttention { .. } => Tone::Warning,
            Insight::ThanksForDonating { .. } | Insight::GettingStarted => Tone::Info,
        }
    }

    /// Heading.
    pub fn title(&self) -> &'static str {
        match self {
            Insight::HighWaste { .. } => "High Waste Rate",
            Insight::LowWaste { .. } => "Great Job!",
            Insight::ItemsNeedAttention { .. } => "Items Need Attention",
            Insight::ThanksForDonating { .. } => "Thank You for Donating!",
            Insight::GettingStarted => "Getting Started",
        }
    }

    /// Body text.
    pub fn message(&self) -> String {
        match self {
            Insight::HighWaste { waste_percent } => format!(
                "Your waste rate is {}%. Consider meal planning and proper storage to reduce waste.",
                waste_percent
            ),
            Insight::LowWaste { waste_percent } => format!(
                "Your waste rate is only {}%. Keep up the excellent work!",
                waste_percent
            ),
            Insight::ItemsNeedAttention { near_expiry } => format!(
                "You have {} item(s) expiring soon. Check the alerts to take action.",
                near_expiry
            ),
            Insight::ThanksForDonating { donation_percent } => format!(
                "You've donated {}% of items. Your contribution helps those in need!",
                donation_percent
            ),
            Insight::GettingStarted => {
                "Add some food items to start tracking and reducing waste!".to_string()
            }
        }
    }
}

/// Recommendations for a summary, in display order.
///
/// An empty inventory only gets [`Insight::GettingStarted`].
pub fn insights(summary: &AggregateSummary) -> Vec<Insight> {
    if summary.total == 0 {
        return vec![Insight::GettingStarted];
    }

    let mut out = Vec::new();
    let waste_percent = percent(summary.rates.waste_rate);
    if waste_percent > HIGH_WASTE_PERCENT {
        out.push(Insight::HighWaste { waste_percent });
    }
    if waste_percent <= LOW_WASTE_PERCENT {
        out.push(Insight::LowWaste { waste_percent });
    }

    let near_expiry = summary.freshness(FreshnessState::NearExpiry);
    if near_expiry > 0 {
        out.push(Insight::ItemsNeedAttention { near_expiry });
    }

    let donation_percent = percent(summary.rates.donation_rate);
    if donation_percent > 0.0 {
        out.push(Insight::ThanksForDonating { donation_percent });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::Rates;

    fn summary(waste_rate: f64) -> AggregateSummary {
        AggregateSummary {
            total: 1000,
            rates: Rates {
                waste_rate,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn waste_tiers(waste_rate: f64) -> Vec<Tone> {
        insights(&summary(waste_rate))
            .iter()
            .map(Insight::tone)
            .collect()
    }

    #[test]
    fn test_waste_thresholds() {
        assert_eq!(waste_tiers(0.100), vec![Tone::Success]);
        assert_eq!(waste_tiers(0.101), Vec::<Tone>::new());
        assert_eq!(waste_tiers(0.200), Vec::<Tone>::new());
        assert_eq!(waste_tiers(0.201), vec![Tone::Danger]);
        assert_eq!(waste_tiers(0.0), vec![Tone::Success]);
    }

    #[test]
    fn test_rounded_share_is_compared() {
        // 20.04% displays as 20.0% and is not flagged
        assert_eq!(waste_tiers(0.2004), Vec::<Tone>::new());
        assert_eq!(
            insights(&summary(0.201)),
            vec![Insight::HighWaste { waste_percent: 20.1 }]
        );
    }

    #[test]
    fn test_near_expiry_and_donations() {
        let mut s = summary(0.15);
        s.by_expiry_state.insert(FreshnessState::NearExpiry, 2);
        s.rates.donation_rate = 0.05;
        assert_eq!(
            insights(&s),
            vec![
                Insight::ItemsNeedAttention { near_expiry: 2 },
                Insight::ThanksForDonating { donation_percent: 5.0 },
            ]
        );
    }

    #[test]
    fn test_empty_inventory() {
        let s = AggregateSummary::default();
        assert_eq!(insights(&s), vec![Insight::GettingStarted]);
        assert_eq!(Insight::GettingStarted.tone(), Tone::Info);
    }

    #[test]
    fn test_messages() {
        let i = Insight::HighWaste { waste_percent: 25.0 };
        assert_eq!(i.title(), "High Waste Rate");
        assert!(i.message().starts_with("Your waste rate is 25%."));
    }
}
