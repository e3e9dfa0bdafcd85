//! Downsell offers: presented when a prospect hesitates or rejects.

use serde::{Deserialize, Serialize};

use sao_core::{Categorized, CatalogError, CatalogResult, EntityId, Money};

use crate::offer::OfferBase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownsellKind {
    /// Same price, spread over time.
    PaymentPlan,
    /// Lower price, fewer features.
    FeatureReduction,
}

impl DownsellKind {
    pub const ALL: [DownsellKind; 2] = [DownsellKind::PaymentPlan, DownsellKind::FeatureReduction];

    pub fn as_str(self) -> &'static str {
        match self {
            DownsellKind::PaymentPlan => "payment_plan",
            DownsellKind::FeatureReduction => "feature_reduction",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|k| k.as_str() == label)
    }
}

fn one() -> u32 {
    1
}

/// One line of a payment schedule. A recurring line (`occurrences > 1`) stands for
/// that many equal payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub amount: Money,
    pub timing: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
    #[serde(default = "one")]
    pub occurrences: u32,
}

impl Installment {
    pub fn total(&self) -> Money {
        self.amount * u64::from(self.occurrences)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlanTerms {
    pub original_price: Money,
    pub payment_schedule: Vec<Installment>,
    pub keeps_price_intact: bool,
}

impl PaymentPlanTerms {
    pub fn schedule_total(&self) -> Money {
        self.payment_schedule.iter().map(Installment::total).sum()
    }

    pub fn payment_count(&self) -> u32 {
        self.payment_schedule.iter().map(|i| i.occurrences).sum()
    }

    /// What is still owed after the first `paid` payments.
    pub fn remaining_after(&self, paid: u32) -> Money {
        let mut left = paid;
        let mut settled = Money::ZERO;
        for line in &self.payment_schedule {
            let n = left.min(line.occurrences);
            settled += line.amount * u64::from(n);
            left -= n;
        }
        self.original_price.saturating_sub(settled)
    }
}

/// Where a reduced-scope buyer can go later, and what it costs on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownsellUpgrade {
    pub target: EntityId,
    pub additional_cost: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureReductionTerms {
    pub reduced_price: Money,
    pub removed_features: Vec<String>,
    pub included_features: Vec<String>,
    pub upgrade_path: DownsellUpgrade,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sub_type", rename_all = "snake_case")]
pub enum DownsellTerms {
    PaymentPlan(PaymentPlanTerms),
    FeatureReduction(FeatureReductionTerms),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownsellOffer {
    #[serde(flatten)]
    pub base: OfferBase,
    #[serde(flatten)]
    pub terms: DownsellTerms,
}

impl DownsellOffer {
    pub fn kind(&self) -> DownsellKind {
        match self.terms {
            DownsellTerms::PaymentPlan(_) => DownsellKind::PaymentPlan,
            DownsellTerms::FeatureReduction(_) => DownsellKind::FeatureReduction,
        }
    }

    pub fn payment_plan(&self) -> Option<&PaymentPlanTerms> {
        match &self.terms {
            DownsellTerms::PaymentPlan(t) => Some(t),
            DownsellTerms::FeatureReduction(_) => None,
        }
    }

    /// A payment plan must collect exactly the original price.
    pub fn validate(&self) -> CatalogResult<()> {
        let Some(plan) = self.payment_plan() else {
            return Ok(());
        };
        if plan.payment_schedule.is_empty() {
            return Err(CatalogError::validation(format!(
                "offer `{}`: payment plan has no installments",
                self.base.id
            )));
        }
        let total = plan.schedule_total();
        if total != plan.original_price {
            return Err(CatalogError::validation(format!(
                "offer `{}`: schedule totals {} but original price is {}",
                self.base.id, total, plan.original_price
            )));
        }
        Ok(())
    }
}

impl Categorized for DownsellOffer {
    type Category = DownsellKind;

    fn category(&self) -> DownsellKind {
        self.kind()
    }
}
