//! Load-time consistency checks and the credit audit.

use std::collections::HashSet;

use sao_core::{CatalogError, CatalogResult, Money};
use sao_offers::{AttractionTerms, DownsellTerms, Offer};

use crate::catalog::Catalog;

/// Reject a catalog whose ids collide, whose references dangle, or whose offers
/// break their own arithmetic.
pub(crate) fn validate(catalog: &Catalog) -> CatalogResult<()> {
    let mut ids: HashSet<&str> = HashSet::new();

    for f in &catalog.features {
        claim(&mut ids, "feature", f.id.as_str())?;
    }
    for t in catalog.tiers.iter().chain(&catalog.downsell_tiers) {
        claim(&mut ids, "tier", t.id.as_str())?;
    }
    for o in &catalog.offers {
        claim(&mut ids, "offer", o.base().id.as_str())?;
    }
    for s in &catalog.support_tiers {
        claim(&mut ids, "support tier", s.id.as_str())?;
    }
    for c in &catalog.coaching_tiers {
        claim(&mut ids, "coaching tier", c.id.as_str())?;
    }

    let features: HashSet<&str> = catalog.features.iter().map(|f| f.id.as_str()).collect();
    let tiers: HashSet<&str> = catalog
        .tiers
        .iter()
        .chain(&catalog.downsell_tiers)
        .map(|t| t.id.as_str())
        .collect();

    for f in &catalog.features {
        for req in &f.dependency.required_features {
            resolve(&features, "feature", f.id.as_str(), req.as_str())?;
        }
    }

    for t in catalog.tiers.iter().chain(&catalog.downsell_tiers) {
        for f in &t.features {
            resolve(&features, "tier", t.id.as_str(), f.as_str())?;
        }
        if let Some(up) = &t.upgrade_path {
            resolve(&tiers, "tier", t.id.as_str(), up.as_str())?;
        }
    }

    for o in &catalog.offers {
        o.validate()?;
        let from = o.base().id.as_str();
        for target in offer_targets(o) {
            resolve(&ids, "offer", from, target)?;
        }
    }

    let paths = catalog
        .upgrade_paths
        .iter()
        .chain(catalog.journeys.iter().flat_map(|j| &j.upgrade_paths));
    for p in paths {
        let edge = format!("{} -> {}", p.from, p.to);
        resolve(&ids, "upgrade path", &edge, p.from.as_str())?;
        resolve(&ids, "upgrade path", &edge, p.to.as_str())?;
    }

    for j in &catalog.journeys {
        for r in &j.recommended {
            resolve(&ids, "journey", &j.stage, r.as_str())?;
        }
    }

    for trig in &catalog.upsell_triggers {
        let from = trig.feature.as_str();
        resolve(&features, "upsell trigger", from, from)?;
        for req in &trig.requires {
            resolve(&features, "upsell trigger", from, req.as_str())?;
        }
        for t in &trig.natural_upsell_from {
            resolve(&tiers, "upsell trigger", from, t.as_str())?;
        }
    }

    Ok(())
}

fn claim<'a>(ids: &mut HashSet<&'a str>, kind: &'static str, id: &'a str) -> CatalogResult<()> {
    if ids.insert(id) {
        Ok(())
    } else {
        Err(CatalogError::duplicate(kind, id))
    }
}

fn resolve(set: &HashSet<&str>, kind: &'static str, from: &str, to: &str) -> CatalogResult<()> {
    if set.contains(to) {
        Ok(())
    } else {
        Err(CatalogError::dangling(kind, from, to))
    }
}

/// Ids an offer points at.
fn offer_targets(offer: &Offer) -> Vec<&str> {
    match offer {
        Offer::Attraction(a) => match &a.terms {
            AttractionTerms::Decoy(d) => vec![d.upgrade_target.target.as_str()],
            _ => vec![],
        },
        Offer::Upsell(u) => u
            .credit_if_upgrade
            .iter()
            .map(|c| c.upgrade_to.as_str())
            .collect(),
        Offer::Downsell(d) => match &d.terms {
            DownsellTerms::FeatureReduction(r) => vec![r.upgrade_path.target.as_str()],
            DownsellTerms::PaymentPlan(_) => vec![],
        },
        Offer::Continuity(_) => vec![],
    }
}

/// A credit larger than the price of what it is credited toward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditWarning {
    pub from: String,
    pub to: String,
    pub credit: Money,
    pub target_price: Money,
}

impl core::fmt::Display for CreditWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "credit {} from `{}` exceeds the {} first-year price of `{}`",
            self.credit, self.from, self.target_price, self.to
        )
    }
}

impl Catalog {
    /// Credits that exceed their target's first-year price.
    ///
    /// Authored credits are business data, so these are reported rather than
    /// rejected at load.
    pub fn audit(&self) -> Vec<CreditWarning> {
        let mut credits: Vec<(&str, &str, Money)> = self
            .upgrade_paths
            .iter()
            .map(|p| (p.from.as_str(), p.to.as_str(), p.credit))
            .collect();
        for u in self.upsell_offers() {
            if let Some(c) = &u.credit_if_upgrade {
                credits.push((u.base.id.as_str(), c.upgrade_to.as_str(), c.amount));
            }
        }

        let warnings: Vec<CreditWarning> = credits
            .into_iter()
            .filter_map(|(from, to, credit)| {
                let target_price = self.target_price(to)?;
                (credit > target_price).then(|| CreditWarning {
                    from: from.to_owned(),
                    to: to.to_owned(),
                    credit,
                    target_price,
                })
            })
            .collect();

        for w in &warnings {
            tracing::warn!(from = %w.from, to = %w.to, credit = %w.credit, "{w}");
        }
        warnings
    }
}
