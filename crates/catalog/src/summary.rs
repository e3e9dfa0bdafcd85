//! Headline numbers for the overview page.

use sao_core::{Categorized, Money, count_by};
use sao_offers::{ContinuityCategory, OfferKind};

use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OfferCounts {
    pub attraction: usize,
    pub upsell: usize,
    pub downsell: usize,
    pub continuity: usize,
}

impl OfferCounts {
    pub fn total(&self) -> usize {
        self.attraction + self.upsell + self.downsell + self.continuity
    }

    pub fn get(&self, kind: OfferKind) -> usize {
        match kind {
            OfferKind::Attraction => self.attraction,
            OfferKind::Upsell => self.upsell,
            OfferKind::Downsell => self.downsell,
            OfferKind::Continuity => self.continuity,
        }
    }
}

/// Monthly recurring revenue from one customer taking the priciest option of every
/// continuity category, support and coaching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaxRecurring {
    pub by_category: Vec<(ContinuityCategory, Money)>,
    pub support: Money,
    pub coaching: Money,
}

impl MaxRecurring {
    pub fn total(&self) -> Money {
        self.by_category.iter().map(|(_, m)| *m).sum::<Money>() + self.support + self.coaching
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub feature_count: usize,
    /// Setup cost of every feature bought separately.
    pub individual_value: Money,
    pub complete_setup: Option<Money>,
    pub offers: OfferCounts,
    pub max_recurring: MaxRecurring,
}

impl Summary {
    /// Setup saved by the Complete tier over buying every feature.
    pub fn complete_savings(&self) -> Money {
        self.complete_setup
            .map_or(Money::ZERO, |setup| self.individual_value.saturating_sub(setup))
    }
}

impl Catalog {
    pub fn offer_counts(&self) -> OfferCounts {
        let offers = self.offers();
        OfferCounts {
            attraction: count_by(offers, OfferKind::Attraction),
            upsell: count_by(offers, OfferKind::Upsell),
            downsell: count_by(offers, OfferKind::Downsell),
            continuity: count_by(offers, OfferKind::Continuity),
        }
    }

    pub fn individual_value(&self) -> Money {
        self.features()
            .iter()
            .map(|f| f.pricing.setup_or_zero())
            .sum()
    }

    pub fn max_recurring(&self) -> MaxRecurring {
        let by_category = ContinuityCategory::ALL
            .into_iter()
            .filter_map(|cat| {
                self.continuity_offers()
                    .filter(|o| o.category() == cat)
                    .map(|o| o.monthly_equivalent())
                    .max()
                    .map(|m| (cat, m))
            })
            .collect();
        MaxRecurring {
            by_category,
            support: self.support_tiers().iter().map(|s| s.price).max().unwrap_or_default(),
            coaching: self.coaching_tiers().iter().map(|c| c.price).max().unwrap_or_default(),
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            feature_count: self.features().len(),
            individual_value: self.individual_value(),
            complete_setup: self.tier("complete").map(|t| t.setup_cost),
            offers: self.offer_counts(),
            max_recurring: self.max_recurring(),
        }
    }
}
