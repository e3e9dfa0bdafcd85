//! Price sheet shared by features and offers.

use serde::{Deserialize, Serialize};

use crate::money::{Currency, Money};

/// One band of volume-based monthly pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeTier {
    pub min_calls: u64,
    /// `None` means unlimited.
    #[serde(default)]
    pub max_calls: Option<u64>,
    pub price: Money,
    pub label: String,
}

impl VolumeTier {
    pub fn contains(&self, calls: u64) -> bool {
        calls >= self.min_calls && self.max_calls.is_none_or(|max| calls <= max)
    }
}

/// Authored pricing. Every component is optional; absent components count as zero
/// in every aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pricing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual: Option<Money>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_tiers: Vec<VolumeTier>,
    #[serde(default)]
    pub currency: Currency,
}

impl Pricing {
    pub fn setup_or_zero(&self) -> Money {
        self.setup.unwrap_or_default()
    }

    pub fn monthly_or_zero(&self) -> Money {
        self.monthly.unwrap_or_default()
    }

    pub fn annual_or_zero(&self) -> Money {
        self.annual.unwrap_or_default()
    }

    /// The price a card leads with: setup, else monthly, else annual.
    ///
    /// Zero components are skipped (a £0 setup on a payment plan is not a headline).
    pub fn headline(&self) -> Option<Money> {
        [self.setup, self.monthly, self.annual]
            .into_iter()
            .flatten()
            .find(|m| !m.is_zero())
    }

    /// Lowest and highest volume band prices, if any bands exist.
    pub fn volume_range(&self) -> Option<(Money, Money)> {
        let min = self.volume_tiers.iter().map(|t| t.price).min()?;
        let max = self.volume_tiers.iter().map(|t| t.price).max()?;
        Some((min, max))
    }

    /// Monthly price for a given call volume, from the first band that contains it.
    pub fn price_for_volume(&self, calls_per_month: u64) -> Option<Money> {
        self.volume_tiers
            .iter()
            .find(|t| t.contains(calls_per_month))
            .map(|t| t.price)
    }

    /// Setup + twelve months + annual fee.
    pub fn first_year_total(&self) -> Money {
        self.setup_or_zero() + self.monthly_or_zero() * 12 + self.annual_or_zero()
    }

    /// True when nothing about the price is known ("Custom Pricing").
    pub fn is_unpriced(&self) -> bool {
        self.headline().is_none() && self.volume_tiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekly_reports_pricing() -> Pricing {
        Pricing {
            setup: Some(Money::new(22_000)),
            volume_tiers: vec![
                VolumeTier {
                    min_calls: 0,
                    max_calls: Some(999),
                    price: Money::new(500),
                    label: "Up to 1,000 calls/month".into(),
                },
                VolumeTier {
                    min_calls: 1000,
                    max_calls: Some(2499),
                    price: Money::new(1000),
                    label: "1,000-2,500 calls/month".into(),
                },
                VolumeTier {
                    min_calls: 2500,
                    max_calls: None,
                    price: Money::new(1500),
                    label: "2,500+ calls/month".into(),
                },
            ],
            ..Pricing::default()
        }
    }

    #[test]
    fn volume_band_lookup_covers_boundaries() {
        let p = weekly_reports_pricing();
        assert_eq!(p.price_for_volume(0), Some(Money::new(500)));
        assert_eq!(p.price_for_volume(999), Some(Money::new(500)));
        assert_eq!(p.price_for_volume(1000), Some(Money::new(1000)));
        assert_eq!(p.price_for_volume(2500), Some(Money::new(1500)));
        assert_eq!(p.price_for_volume(1_000_000), Some(Money::new(1500)));
    }

    #[test]
    fn volume_range_spans_all_bands() {
        let p = weekly_reports_pricing();
        assert_eq!(p.volume_range(), Some((Money::new(500), Money::new(1500))));
        assert_eq!(Pricing::default().volume_range(), None);
    }

    #[test]
    fn headline_skips_zero_setup() {
        let p = Pricing {
            setup: Some(Money::ZERO),
            monthly: Some(Money::new(4500)),
            ..Pricing::default()
        };
        assert_eq!(p.headline(), Some(Money::new(4500)));
    }

    #[test]
    fn first_year_total_counts_missing_fields_as_zero() {
        let p = Pricing {
            setup: Some(Money::new(32_000)),
            monthly: Some(Money::new(2400)),
            ..Pricing::default()
        };
        assert_eq!(p.first_year_total(), Money::new(60_800));
        assert_eq!(Pricing::default().first_year_total(), Money::ZERO);
    }

    #[test]
    fn deserializes_sparse_documents() {
        let p: Pricing = serde_json::from_str(r#"{ "annual": 1200, "currency": "GBP" }"#).unwrap();
        assert_eq!(p.annual, Some(Money::new(1200)));
        assert!(p.setup.is_none());
        assert!(p.volume_tiers.is_empty());
        assert!(!p.is_unpriced());
        assert!(Pricing::default().is_unpriced());
    }
}
