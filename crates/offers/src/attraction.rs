//! Attraction offers: the front-door offers that bring a customer in.

use serde::{Deserialize, Serialize};

use sao_core::{Categorized, CatalogError, CatalogResult, EntityId, Money, Pricing};

use crate::offer::OfferBase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttractionKind {
    Decoy,
    BuyXGetY,
    PayLessNow,
    Trial,
}

impl AttractionKind {
    pub const ALL: [AttractionKind; 4] = [
        AttractionKind::Decoy,
        AttractionKind::BuyXGetY,
        AttractionKind::PayLessNow,
        AttractionKind::Trial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttractionKind::Decoy => "decoy",
            AttractionKind::BuyXGetY => "buy_x_get_y",
            AttractionKind::PayLessNow => "pay_less_now",
            AttractionKind::Trial => "trial",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|k| k.as_str() == label)
    }
}

/// Where a decoy buyer is steered, and the credit they carry over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoyUpgrade {
    pub target: EntityId,
    pub pricing: Pricing,
    pub credits_applied: Money,
    pub timeframe_days: u32,
}

/// A deliberately limited offer that makes the real one look better.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoyTerms {
    pub what_buyer_gets: Vec<String>,
    pub deliberately_missing: Vec<String>,
    pub limitations: Vec<String>,
    pub upgrade_target: DecoyUpgrade,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyItem {
    pub item: String,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeItem {
    pub item: String,
    pub value: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyXGetYTerms {
    pub buy_items: Vec<BuyItem>,
    pub free_items: Vec<FreeItem>,
    pub total_savings: Money,
}

impl BuyXGetYTerms {
    pub fn free_value(&self) -> Money {
        self.free_items.iter().map(|i| i.value).sum()
    }

    pub fn purchase_price(&self) -> Money {
        self.buy_items.iter().map(|i| i.price).sum()
    }
}

/// Split payment: part now, the balance later (possibly waived).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLessNowTerms {
    pub upfront_payment: Money,
    pub deferred_payment: Money,
    pub waiver_condition: String,
    #[serde(default)]
    pub free_items: Vec<FreeItem>,
}

impl PayLessNowTerms {
    pub fn total(&self) -> Money {
        self.upfront_payment + self.deferred_payment
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuationPath {
    pub name: String,
    pub pricing: Pricing,
    pub credits: Money,
}

impl ContinuationPath {
    /// First-year cost of continuing, after the trial credit.
    pub fn net_first_year(&self) -> Money {
        self.pricing.first_year_total().saturating_sub(self.credits)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialTerms {
    pub trial_price: Money,
    pub delivery_days: u32,
    pub scope: String,
    pub deliverables: Vec<String>,
    pub continuation_paths: Vec<ContinuationPath>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sub_type", rename_all = "snake_case")]
pub enum AttractionTerms {
    Decoy(DecoyTerms),
    BuyXGetY(BuyXGetYTerms),
    PayLessNow(PayLessNowTerms),
    Trial(TrialTerms),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttractionOffer {
    #[serde(flatten)]
    pub base: OfferBase,
    #[serde(flatten)]
    pub terms: AttractionTerms,
}

impl AttractionOffer {
    pub fn kind(&self) -> AttractionKind {
        match self.terms {
            AttractionTerms::Decoy(_) => AttractionKind::Decoy,
            AttractionTerms::BuyXGetY(_) => AttractionKind::BuyXGetY,
            AttractionTerms::PayLessNow(_) => AttractionKind::PayLessNow,
            AttractionTerms::Trial(_) => AttractionKind::Trial,
        }
    }

    pub fn validate(&self) -> CatalogResult<()> {
        match &self.terms {
            AttractionTerms::BuyXGetY(t) if t.free_value() != t.total_savings => {
                Err(CatalogError::validation(format!(
                    "offer `{}`: free items are worth {} but savings claim {}",
                    self.base.id,
                    t.free_value(),
                    t.total_savings
                )))
            }
            AttractionTerms::PayLessNow(t) => match self.base.pricing.setup {
                Some(setup) if setup != t.total() => Err(CatalogError::validation(format!(
                    "offer `{}`: upfront + deferred is {} but setup is {}",
                    self.base.id,
                    t.total(),
                    setup
                ))),
                _ => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

impl Categorized for AttractionOffer {
    type Category = AttractionKind;

    fn category(&self) -> AttractionKind {
        self.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use sao_core::filter_by;

    fn buy_x_get_y(savings: u64) -> AttractionOffer {
        AttractionOffer {
            base: fixtures::base("complete-now-earned-visibility", Some(68_000), Some(4500)),
            terms: AttractionTerms::BuyXGetY(BuyXGetYTerms {
                buy_items: vec![BuyItem {
                    item: "Complete".into(),
                    price: Money::new(68_000),
                }],
                free_items: vec![
                    FreeItem {
                        item: "Dashboard".into(),
                        value: Money::new(12_000),
                    },
                    FreeItem {
                        item: "Reports".into(),
                        value: Money::new(1800),
                    },
                    FreeItem {
                        item: "Analyzer pass".into(),
                        value: Money::new(3000),
                    },
                ],
                total_savings: Money::new(savings),
            }),
        }
    }

    fn pay_less_now(upfront: u64, deferred: u64) -> AttractionOffer {
        AttractionOffer {
            base: fixtures::base("complete-deferred-setup", Some(68_000), Some(4500)),
            terms: AttractionTerms::PayLessNow(PayLessNowTerms {
                upfront_payment: Money::new(upfront),
                deferred_payment: Money::new(deferred),
                waiver_condition: "20 meetings in 90 days".into(),
                free_items: vec![],
            }),
        }
    }

    #[test]
    fn kind_labels_round_trip() {
        for kind in AttractionKind::ALL {
            assert_eq!(AttractionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(AttractionKind::parse("bogo"), None);
    }

    #[test]
    fn savings_must_match_free_items() {
        assert!(buy_x_get_y(16_800).validate().is_ok());
        let err = buy_x_get_y(20_000).validate().unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn split_payment_must_cover_setup() {
        assert!(pay_less_now(28_000, 40_000).validate().is_ok());
        assert!(pay_less_now(28_000, 30_000).validate().is_err());
    }

    #[test]
    fn filter_by_sub_kind() {
        let offers = vec![buy_x_get_y(16_800), pay_less_now(28_000, 40_000)];
        let hits = filter_by(&offers, AttractionKind::PayLessNow);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].base.id.as_str(), "complete-deferred-setup");
        assert!(filter_by(&offers, AttractionKind::Trial).is_empty());
    }

    #[test]
    fn continuation_net_cost_subtracts_credit() {
        let path = ContinuationPath {
            name: "Analyzer Annual".into(),
            pricing: Pricing {
                annual: Some(Money::new(15_000)),
                ..Pricing::default()
            },
            credits: Money::new(3000),
        };
        assert_eq!(path.net_first_year(), Money::new(12_000));
    }

    #[test]
    fn deserializes_flattened_document() {
        let json = r#"{
            "id": "analyzer-deep-dive",
            "name": "Analyzer Deep-Dive Trial",
            "description": "One-time deep analysis of 200 calls",
            "pricing": { "setup": 3000, "currency": "GBP" },
            "when_to_present": "Skeptical prospects",
            "target_audience": "Teams with recordings",
            "sub_type": "trial",
            "trial_price": 3000,
            "delivery_days": 7,
            "scope": "200 calls",
            "deliverables": ["Report"],
            "continuation_paths": []
        }"#;
        let offer: AttractionOffer = serde_json::from_str(json).unwrap();
        assert_eq!(offer.kind(), AttractionKind::Trial);
        assert_eq!(offer.base.pricing.setup, Some(Money::new(3000)));
    }
}
