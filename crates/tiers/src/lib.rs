//! Pricing tiers, the side-by-side comparison tool, and upgrade paths with credits.
//!
//! Pure domain logic (no IO).

pub mod comparison;
pub mod tier;
pub mod upgrade;

pub use comparison::{ComparisonColumn, ComparisonMatrix, ComparisonRow, TierComparison, ToggleOutcome};
pub use tier::{PricingTier, find_tier, tier_includes_feature};
pub use upgrade::{CustomerJourney, FeatureUpsellTrigger, UpgradePath, best_credit, paths_from, paths_to, upsells_due};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use sao_core::{FeatureId, Money, TierId};

    pub fn tier(id: &str, setup: u64, monthly: u64, features: &[&str]) -> PricingTier {
        PricingTier {
            id: TierId::parse(id).unwrap(),
            name: id.to_string(),
            tagline: String::new(),
            setup_cost: Money::new(setup),
            monthly_cost: Money::new(monthly),
            is_popular: false,
            features: features.iter().map(|f| FeatureId::parse(f).unwrap()).collect(),
            included_features: Vec::new(),
            excluded_features: Vec::new(),
            call_limit: None,
            description: String::new(),
            cta: String::new(),
            upgrade_path: None,
        }
    }

    pub fn sample() -> Vec<PricingTier> {
        let mut foundation = tier(
            "foundation",
            32_000,
            2400,
            &["premium-voice-playbook", "crm-integration", "ai-call-analysis", "multi-attempt-retry"],
        );
        foundation.upgrade_path = Some(TierId::parse("complete").unwrap());

        let mut complete = tier(
            "complete",
            68_000,
            4500,
            &[
                "premium-voice-playbook",
                "crm-integration",
                "ai-call-analysis",
                "knowledge-base-rag",
                "weekly-reports",
                "dashboard",
            ],
        );
        complete.is_popular = true;

        let analyzer = tier("analyzer", 15_000, 1250, &["ai-call-analysis", "weekly-reports", "dashboard"]);
        let insights = tier("human-insights", 0, 3000, &["weekly-reports"]);

        vec![foundation, complete, analyzer, insights]
    }
}
