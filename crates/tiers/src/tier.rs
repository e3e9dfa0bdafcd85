use serde::{Deserialize, Serialize};

use sao_core::{Entity, FeatureId, Money, TierId};

/// A named package bundling a fixed feature set at a setup + monthly price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    pub id: TierId,
    pub name: String,
    pub tagline: String,
    pub setup_cost: Money,
    pub monthly_cost: Money,
    #[serde(default)]
    pub is_popular: bool,
    /// Included feature ids, in display order.
    pub features: Vec<FeatureId>,
    /// Human-readable inclusions (may mention things that are not features).
    pub included_features: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_limit: Option<u64>,
    pub description: String,
    pub cta: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_path: Option<TierId>,
}

impl PricingTier {
    pub fn includes(&self, feature: &FeatureId) -> bool {
        self.features.contains(feature)
    }

    /// Setup plus twelve months.
    pub fn first_year_total(&self) -> Money {
        self.cost_over_months(12)
    }

    pub fn cost_over_months(&self, months: u64) -> Money {
        self.setup_cost + self.monthly_cost * months
    }

    /// The tier this one upgrades into, resolved against `tiers`.
    pub fn upgrade_target<'a>(&self, tiers: &'a [PricingTier]) -> Option<&'a PricingTier> {
        let target = self.upgrade_path.as_ref()?;
        tiers.iter().find(|t| &t.id == target)
    }
}

impl Entity for PricingTier {
    type Id = TierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

pub fn find_tier<'a>(tiers: &'a [PricingTier], id: &str) -> Option<&'a PricingTier> {
    tiers.iter().find(|t| t.id == id)
}

/// Whether the tier includes the feature. An unknown tier includes nothing.
pub fn tier_includes_feature(tiers: &[PricingTier], tier_id: &str, feature_id: &str) -> bool {
    find_tier(tiers, tier_id).is_some_and(|t| t.features.iter().any(|f| f == feature_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn membership_check() {
        let tiers = fixtures::sample();
        assert!(tier_includes_feature(&tiers, "complete", "dashboard"));
        assert!(!tier_includes_feature(&tiers, "foundation", "dashboard"));
    }

    #[test]
    fn unknown_tier_includes_nothing() {
        let tiers = fixtures::sample();
        assert!(!tier_includes_feature(&tiers, "platinum", "dashboard"));
    }

    #[test]
    fn first_year_total_is_setup_plus_twelve_months() {
        let tiers = fixtures::sample();
        let foundation = find_tier(&tiers, "foundation").unwrap();
        assert_eq!(foundation.first_year_total(), Money::new(60_800));
        let complete = find_tier(&tiers, "complete").unwrap();
        assert_eq!(complete.first_year_total(), Money::new(122_000));
    }

    #[test]
    fn upgrade_target_resolves() {
        let tiers = fixtures::sample();
        let foundation = find_tier(&tiers, "foundation").unwrap();
        assert_eq!(foundation.upgrade_target(&tiers).map(|t| t.id.as_str()), Some("complete"));
        let complete = find_tier(&tiers, "complete").unwrap();
        assert!(complete.upgrade_target(&tiers).is_none());
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"{
            "id": "human-insights",
            "name": "Human Insights",
            "tagline": "Ongoing human analyst support",
            "setup_cost": 0,
            "monthly_cost": 3000,
            "features": ["weekly-reports"],
            "included_features": ["Weekly reports"],
            "description": "",
            "cta": "Get Human Insights"
        }"#;
        let tier: PricingTier = serde_json::from_str(json).unwrap();
        assert!(!tier.is_popular);
        assert!(tier.excluded_features.is_empty());
        assert!(tier.upgrade_path.is_none());
    }
}
