//! Price-range filtering over headline prices.

use sao_core::{Currency, Money, Pricing};
use sao_features::Feature;
use sao_offers::Offer;
use sao_tiers::PricingTier;

/// Inclusive bounds on a headline price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    pub const FLOOR: Money = Money::ZERO;
    pub const CEILING: Money = Money::new(100_000);

    /// Bounds are swapped if given in the wrong order.
    pub fn new(min: Money, max: Money) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// True when the range is narrower than the default and actually filters.
    pub fn is_filtered(&self) -> bool {
        self.min > Self::FLOOR || self.max < Self::CEILING
    }

    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }

    /// Unpriced entries only pass an unfiltered range.
    pub fn admits(&self, pricing: &Pricing) -> bool {
        match pricing.headline() {
            Some(price) => self.contains(price),
            None => !self.is_filtered(),
        }
    }

    pub fn features<'a>(&self, features: &'a [Feature]) -> Vec<&'a Feature> {
        features.iter().filter(|f| self.admits(&f.pricing)).collect()
    }

    /// Tiers are priced by setup, falling back to the monthly fee.
    pub fn tiers<'a>(&self, tiers: &'a [PricingTier]) -> Vec<&'a PricingTier> {
        tiers
            .iter()
            .filter(|t| {
                let price = if t.setup_cost.is_zero() { t.monthly_cost } else { t.setup_cost };
                self.contains(price)
            })
            .collect()
    }

    pub fn offers<'a>(&self, offers: &'a [Offer]) -> Vec<&'a Offer> {
        offers.iter().filter(|o| self.admits(o.pricing())).collect()
    }

    /// `£10k - £30k`, `Under £10k` from a zero floor, or `£50k+` when the
    /// top is the ceiling.
    pub fn label(&self) -> String {
        let min = self.min.compact(Currency::Gbp);
        let max = self.max.compact(Currency::Gbp);
        if self.max >= Self::CEILING {
            format!("{min}+")
        } else if self.min.is_zero() {
            format!("Under {max}")
        } else {
            format!("{min} - {max}")
        }
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Self::FLOOR,
            max: Self::CEILING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePreset {
    pub label: &'static str,
    pub range: PriceRange,
}

pub const PRICE_PRESETS: [PricePreset; 4] = [
    PricePreset {
        label: "Under £10k",
        range: PriceRange { min: Money::ZERO, max: Money::new(10_000) },
    },
    PricePreset {
        label: "£10k - £30k",
        range: PriceRange { min: Money::new(10_000), max: Money::new(30_000) },
    },
    PricePreset {
        label: "£30k - £50k",
        range: PriceRange { min: Money::new(30_000), max: Money::new(50_000) },
    },
    PricePreset {
        label: "£50k+",
        range: PriceRange { min: Money::new(50_000), max: Money::new(100_000) },
    },
];

impl PricePreset {
    pub fn find(label: &str) -> Option<&'static PricePreset> {
        let label = label.trim();
        PRICE_PRESETS.iter().find(|p| p.label.eq_ignore_ascii_case(label))
    }
}
