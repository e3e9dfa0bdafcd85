//! Bundle calculator: an ad hoc set of features priced individually.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use sao_core::{FeatureId, Money};

use crate::feature::Feature;

/// Independent setup / monthly / annual sums over a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BundleTotals {
    pub setup: Money,
    pub monthly: Money,
    pub annual: Money,
}

impl BundleTotals {
    /// Sum the pricing of every feature whose id is in `ids`.
    ///
    /// Unknown ids are ignored and duplicates count once. Missing price components
    /// count as zero, so the empty set totals zero.
    pub fn of<'a, I>(features: &[Feature], ids: I) -> Self
    where
        I: IntoIterator<Item = &'a FeatureId>,
    {
        let wanted: HashSet<&FeatureId> = ids.into_iter().collect();
        let selected: Vec<&Feature> = features.iter().filter(|f| wanted.contains(&f.id)).collect();

        Self {
            setup: selected.iter().map(|f| f.pricing.setup_or_zero()).sum(),
            monthly: selected.iter().map(|f| f.pricing.monthly_or_zero()).sum(),
            annual: selected.iter().map(|f| f.pricing.annual_or_zero()).sum(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.setup.is_zero() && self.monthly.is_zero() && self.annual.is_zero()
    }

    pub fn first_year(&self) -> Money {
        self.setup + self.monthly * 12 + self.annual
    }

    /// How much more the bundle's setup costs than a packaged price, or zero.
    pub fn savings_versus(&self, package_setup: Money) -> Money {
        self.setup.saturating_sub(package_setup)
    }
}

/// A selected feature whose required feature is not in the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDependency {
    pub feature: FeatureId,
    pub requires: FeatureId,
}

/// The user's bundle selection, in the order features were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle {
    ids: Vec<FeatureId>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature. Adding an id already present is a no-op; returns whether the
    /// bundle changed.
    pub fn add(&mut self, id: FeatureId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove a feature; returns whether it was present.
    pub fn remove(&mut self, id: &FeatureId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|i| i != id);
        self.ids.len() != before
    }

    /// Add when absent, remove when present. Returns true when now selected.
    pub fn toggle(&mut self, id: FeatureId) -> bool {
        if self.remove(&id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &FeatureId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[FeatureId] {
        &self.ids
    }

    pub fn totals(&self, features: &[Feature]) -> BundleTotals {
        BundleTotals::of(features, &self.ids)
    }

    /// Selected features in catalog order (not selection order).
    pub fn selected<'a>(&self, features: &'a [Feature]) -> Vec<&'a Feature> {
        features.iter().filter(|f| self.contains(&f.id)).collect()
    }

    /// Required features that the selection leaves out.
    pub fn missing_dependencies(&self, features: &[Feature]) -> Vec<MissingDependency> {
        self.selected(features)
            .into_iter()
            .flat_map(|f| {
                f.dependency
                    .required_features
                    .iter()
                    .filter(|req| !self.contains(req))
                    .map(|req| MissingDependency {
                        feature: f.id.clone(),
                        requires: req.clone(),
                    })
            })
            .collect()
    }
}

impl FromIterator<FeatureId> for Bundle {
    fn from_iter<T: IntoIterator<Item = FeatureId>>(iter: T) -> Self {
        let mut bundle = Bundle::new();
        for id in iter {
            bundle.add(id);
        }
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn id(s: &str) -> FeatureId {
        FeatureId::parse(s).unwrap()
    }

    #[test]
    fn empty_bundle_totals_zero() {
        let features = fixtures::sample();
        let totals = Bundle::new().totals(&features);
        assert!(totals.is_zero());
        assert_eq!(totals, BundleTotals::default());
    }

    #[test]
    fn totals_are_independent_sums() {
        let features = fixtures::sample();
        let bundle: Bundle = [id("premium-voice-playbook"), id("analytics-retainer")]
            .into_iter()
            .collect();
        let totals = bundle.totals(&features);
        assert_eq!(totals.setup, Money::new(25_000));
        assert_eq!(totals.monthly, Money::new(500));
        assert_eq!(totals.annual, Money::new(6000));
        assert_eq!(totals.first_year(), Money::new(25_000 + 500 * 12 + 6000));
    }

    #[test]
    fn adding_twice_does_not_duplicate() {
        let features = fixtures::sample();
        let mut bundle = Bundle::new();
        assert!(bundle.add(id("crm-integration")));
        assert!(!bundle.add(id("crm-integration")));
        assert_eq!(bundle.len(), 1);
        assert_eq!(bundle.totals(&features).setup, Money::new(18_000));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let features = fixtures::sample();
        let bundle: Bundle = [id("not-a-feature")].into_iter().collect();
        assert!(bundle.totals(&features).is_zero());
    }

    #[test]
    fn toggle_and_remove() {
        let mut bundle = Bundle::new();
        assert!(bundle.toggle(id("dashboard")));
        assert!(!bundle.toggle(id("dashboard")));
        assert!(bundle.is_empty());
        assert!(!bundle.remove(&id("dashboard")));
    }

    #[test]
    fn savings_only_when_bundle_exceeds_package() {
        let totals = BundleTotals {
            setup: Money::new(90_000),
            ..BundleTotals::default()
        };
        assert_eq!(totals.savings_versus(Money::new(68_000)), Money::new(22_000));
        assert_eq!(totals.savings_versus(Money::new(100_000)), Money::ZERO);
    }

    #[test]
    fn reports_missing_dependencies() {
        let features = fixtures::sample();
        let bundle: Bundle = [id("lead-recycling"), id("premium-voice-playbook")]
            .into_iter()
            .collect();
        let missing = bundle.missing_dependencies(&features);
        assert_eq!(
            missing,
            vec![MissingDependency {
                feature: id("lead-recycling"),
                requires: id("crm-integration"),
            }]
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: totals do not depend on selection order.
            #[test]
            fn totals_are_order_independent(
                picks in proptest::collection::vec(0usize..7, 0..10)
            ) {
                let features = fixtures::sample();
                let forward: Vec<FeatureId> =
                    picks.iter().map(|&i| features[i].id.clone()).collect();
                let mut backward = forward.clone();
                backward.reverse();

                let a: Bundle = forward.into_iter().collect();
                let b: Bundle = backward.into_iter().collect();
                prop_assert_eq!(a.totals(&features), b.totals(&features));
            }

            /// Property: the setup total equals the sum over distinct selected features.
            #[test]
            fn setup_total_matches_distinct_sum(
                picks in proptest::collection::vec(0usize..7, 0..10)
            ) {
                let features = fixtures::sample();
                let bundle: Bundle =
                    picks.iter().map(|&i| features[i].id.clone()).collect();
                let expected: Money = bundle
                    .selected(&features)
                    .iter()
                    .map(|f| f.pricing.setup_or_zero())
                    .sum();
                prop_assert_eq!(bundle.totals(&features).setup, expected);
            }
        }
    }
}
