//! Upsell offers: add-ons sold to an existing customer.

use serde::{Deserialize, Serialize};

use sao_core::{Categorized, EntityId, Money};

use crate::offer::OfferBase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsellCategory {
    Capability,
    Intelligence,
    Pipeline,
    Coaching,
}

impl UpsellCategory {
    pub const ALL: [UpsellCategory; 4] = [
        UpsellCategory::Capability,
        UpsellCategory::Intelligence,
        UpsellCategory::Pipeline,
        UpsellCategory::Coaching,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UpsellCategory::Capability => "capability",
            UpsellCategory::Intelligence => "intelligence",
            UpsellCategory::Pipeline => "pipeline",
            UpsellCategory::Coaching => "coaching",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

/// Money off a bigger package if the customer moves within the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeCredit {
    pub upgrade_to: EntityId,
    pub amount: Money,
    pub timeframe_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsellOffer {
    #[serde(flatten)]
    pub base: OfferBase,
    pub category: UpsellCategory,
    pub improvements: Vec<String>,
    pub roi_justification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_if_upgrade: Option<UpgradeCredit>,
}

impl UpsellOffer {
    /// Credit granted for moving to `target`, if this upsell carries one.
    pub fn credit_toward(&self, target: &EntityId) -> Option<Money> {
        self.credit_if_upgrade
            .as_ref()
            .filter(|c| &c.upgrade_to == target)
            .map(|c| c.amount)
    }
}

impl Categorized for UpsellOffer {
    type Category = UpsellCategory;

    fn category(&self) -> UpsellCategory {
        self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use sao_core::filter_by;

    fn upsell(id: &str, category: UpsellCategory) -> UpsellOffer {
        UpsellOffer {
            base: fixtures::base(id, Some(8000), None),
            category,
            improvements: vec![],
            roi_justification: String::new(),
            credit_if_upgrade: None,
        }
    }

    #[test]
    fn category_labels_parse_case_insensitively() {
        assert_eq!(UpsellCategory::parse(" Pipeline "), Some(UpsellCategory::Pipeline));
        assert_eq!(UpsellCategory::parse("growth"), None);
    }

    #[test]
    fn filter_by_category_keeps_order() {
        let all = vec![
            upsell("voice-cloning-addon", UpsellCategory::Capability),
            upsell("sentiment-addon", UpsellCategory::Intelligence),
            upsell("multilingual-addon", UpsellCategory::Capability),
        ];
        let ids: Vec<_> = filter_by(&all, UpsellCategory::Capability)
            .iter()
            .map(|o| o.base.id.as_str())
            .collect();
        assert_eq!(ids, ["voice-cloning-addon", "multilingual-addon"]);
        assert!(filter_by(&all, UpsellCategory::Coaching).is_empty());
    }

    #[test]
    fn credit_only_applies_to_its_target() {
        let mut offer = upsell("analyzer-addon", UpsellCategory::Intelligence);
        offer.credit_if_upgrade = Some(UpgradeCredit {
            upgrade_to: EntityId::parse("complete").unwrap(),
            amount: Money::new(5000),
            timeframe_days: 90,
        });
        let complete = EntityId::parse("complete").unwrap();
        let foundation = EntityId::parse("foundation").unwrap();
        assert_eq!(offer.credit_toward(&complete), Some(Money::new(5000)));
        assert_eq!(offer.credit_toward(&foundation), None);
    }

    #[test]
    fn deserializes_flat_document_without_credit() {
        let json = r#"{
            "id": "crm-sync-addon",
            "name": "CRM Sync",
            "description": "Two-way sync",
            "pricing": { "setup": 6000 },
            "when_to_present": "After go-live",
            "target_audience": "Sales teams",
            "category": "pipeline",
            "improvements": ["No manual entry"],
            "roi_justification": "Saves 5 hours a week"
        }"#;
        let offer: UpsellOffer = serde_json::from_str(json).unwrap();
        assert_eq!(offer.category, UpsellCategory::Pipeline);
        assert_eq!(offer.base.pricing.setup, Some(Money::new(6000)));
        assert!(offer.credit_if_upgrade.is_none());
    }
}
