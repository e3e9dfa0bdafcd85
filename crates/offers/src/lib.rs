//! Sales offer library.
//!
//! Four offer kinds (attraction, upsell, downsell, continuity), each with its own
//! sub-kinds and payload, plus the support and coaching reference tiers. Pure domain
//! logic (no IO); the only fallible operation is [`Offer::validate`].

pub mod attraction;
pub mod continuity;
pub mod downsell;
pub mod offer;
pub mod reference;
pub mod upsell;

pub use attraction::{
    AttractionKind, AttractionOffer, AttractionTerms, BuyItem, BuyXGetYTerms, ContinuationPath,
    DecoyTerms, DecoyUpgrade, FreeItem, PayLessNowTerms, TrialTerms,
};
pub use continuity::{BillingCycle, ContinuityCategory, ContinuityOffer};
pub use downsell::{
    DownsellKind, DownsellOffer, DownsellTerms, DownsellUpgrade, FeatureReductionTerms,
    Installment, PaymentPlanTerms,
};
pub use offer::{Offer, OfferBase, OfferKind};
pub use reference::{CoachingTier, IncludedChanges, ServiceLevel, Severity, SupportTier};
pub use upsell::{UpgradeCredit, UpsellCategory, UpsellOffer};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use sao_core::{Money, OfferId, Pricing};

    pub fn base(id: &str, setup: Option<u64>, monthly: Option<u64>) -> OfferBase {
        OfferBase {
            id: OfferId::parse(id).unwrap(),
            name: id.replace('-', " "),
            description: format!("{id} description"),
            pricing: Pricing {
                setup: setup.map(Money::new),
                monthly: monthly.map(Money::new),
                ..Pricing::default()
            },
            when_to_present: String::new(),
            target_audience: String::new(),
        }
    }
}
