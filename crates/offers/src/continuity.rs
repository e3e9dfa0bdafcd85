//! Continuity offers: recurring services that keep a customer paying after launch.

use serde::{Deserialize, Serialize};

use sao_core::{Categorized, Money};

use crate::offer::OfferBase;
use crate::reference::ServiceLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContinuityCategory {
    Platform,
    Campaign,
    Maintenance,
    Coaching,
}

impl ContinuityCategory {
    pub const ALL: [ContinuityCategory; 4] = [
        ContinuityCategory::Platform,
        ContinuityCategory::Campaign,
        ContinuityCategory::Maintenance,
        ContinuityCategory::Coaching,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContinuityCategory::Platform => "platform",
            ContinuityCategory::Campaign => "campaign",
            ContinuityCategory::Maintenance => "maintenance",
            ContinuityCategory::Coaching => "coaching",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    Annual,
}

impl BillingCycle {
    pub fn charges_per_year(self) -> u64 {
        match self {
            BillingCycle::Monthly => 12,
            BillingCycle::Quarterly => 4,
            BillingCycle::Annual => 1,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            BillingCycle::Monthly => "/mo",
            BillingCycle::Quarterly => "/qtr",
            BillingCycle::Annual => "/yr",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuityOffer {
    #[serde(flatten)]
    pub base: OfferBase,
    pub category: ContinuityCategory,
    pub recurring_price: Money,
    pub billing_cycle: BillingCycle,
    pub included_services: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slas: Vec<ServiceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_commitment_months: Option<u32>,
}

impl ContinuityOffer {
    /// Setup plus one year of recurring charges.
    pub fn annual_value(&self) -> Money {
        self.base.pricing.setup_or_zero()
            + self.recurring_price * self.billing_cycle.charges_per_year()
    }

    /// Recurring price normalised to a month, rounded down.
    pub fn monthly_equivalent(&self) -> Money {
        let yearly = self.recurring_price * self.billing_cycle.charges_per_year();
        Money::new(yearly.amount() / 12)
    }

    /// Smallest total a customer can sign up for.
    pub fn minimum_commitment_value(&self) -> Money {
        let months = u64::from(self.minimum_commitment_months.unwrap_or(1));
        self.base.pricing.setup_or_zero() + self.monthly_equivalent() * months
    }
}

impl Categorized for ContinuityOffer {
    type Category = ContinuityCategory;

    fn category(&self) -> ContinuityCategory {
        self.category
    }
}
