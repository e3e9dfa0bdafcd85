//! Upgrade paths, credit windows and customer journeys.
//!
//! Paths are authored edges between any two catalog ids (tiers or offers). There is
//! no graph logic beyond lookups; cycles are not checked.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use sao_core::{EntityId, FeatureId, Money, TierId};

/// Credit granted when moving from one catalog entry to another within a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePath {
    pub from: EntityId,
    pub to: EntityId,
    pub credit: Money,
    pub timeframe_days: u32,
    pub description: String,
}

impl UpgradePath {
    /// Last day the credit can be redeemed for a purchase made on `purchased_on`.
    pub fn credit_deadline(&self, purchased_on: NaiveDate) -> NaiveDate {
        purchased_on
            .checked_add_days(Days::new(u64::from(self.timeframe_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whether the credit still applies on `today`. Credits expire after the window.
    pub fn credit_available(&self, purchased_on: NaiveDate, today: NaiveDate) -> bool {
        today >= purchased_on && today <= self.credit_deadline(purchased_on)
    }

    /// Credit that applies on `today`, or zero once expired.
    pub fn credit_on(&self, purchased_on: NaiveDate, today: NaiveDate) -> Money {
        if self.credit_available(purchased_on, today) {
            self.credit
        } else {
            Money::ZERO
        }
    }
}

pub fn paths_from<'a>(paths: &'a [UpgradePath], from: &str) -> Vec<&'a UpgradePath> {
    paths.iter().filter(|p| p.from == from).collect()
}

pub fn paths_to<'a>(paths: &'a [UpgradePath], to: &str) -> Vec<&'a UpgradePath> {
    paths.iter().filter(|p| p.to == to).collect()
}

/// The most generous path between two ids. Ties keep the first authored path.
pub fn best_credit<'a>(paths: &'a [UpgradePath], from: &str, to: &str) -> Option<&'a UpgradePath> {
    paths
        .iter()
        .filter(|p| p.from == from && p.to == to)
        .fold(None, |best: Option<&UpgradePath>, p| match best {
            Some(b) if b.credit >= p.credit => Some(b),
            _ => Some(p),
        })
}

/// A buying stage with the offers to lead with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerJourney {
    pub stage: String,
    pub recommended: Vec<EntityId>,
    #[serde(default)]
    pub upgrade_paths: Vec<UpgradePath>,
}

/// When a single feature should be pitched to an existing customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureUpsellTrigger {
    pub feature: FeatureId,
    #[serde(default)]
    pub requires: Vec<FeatureId>,
    pub natural_upsell_from: Vec<TierId>,
    pub present_after_days: u32,
    pub trigger: String,
}

/// Triggers that apply to a customer on `tier` after `days_active` days.
pub fn upsells_due<'a>(
    triggers: &'a [FeatureUpsellTrigger],
    tier: &str,
    days_active: u32,
) -> Vec<&'a FeatureUpsellTrigger> {
    triggers
        .iter()
        .filter(|t| t.natural_upsell_from.iter().any(|f| f == tier))
        .filter(|t| t.present_after_days <= days_active)
        .collect()
}
