use serde::Deserialize;
use serde::de::DeserializeOwned;

use sao_core::{CatalogError, CatalogResult, Money, TierId, filter_by};
use sao_features::{Bundle, BundleTotals, Feature, FeatureCategory, MarketplaceFilter};
use sao_offers::{
    AttractionKind, AttractionOffer, CoachingTier, ContinuityCategory, ContinuityOffer,
    DownsellKind, DownsellOffer, Offer, OfferKind, SupportTier, UpsellCategory, UpsellOffer,
};
use sao_tiers::{
    CustomerJourney, FeatureUpsellTrigger, PricingTier, TierComparison, UpgradePath, find_tier,
};

use crate::validate;

/// Tiers offered in the side-by-side comparison, in display order.
pub const COMPARABLE_TIERS: [&str; 3] = ["complete", "foundation", "analyzer"];

/// Raw JSON text of every catalog document.
#[derive(Debug, Clone, Copy)]
pub struct CatalogDocuments<'a> {
    pub features: &'a str,
    pub tiers: &'a str,
    pub attraction: &'a str,
    pub upsell: &'a str,
    pub downsell: &'a str,
    pub continuity: &'a str,
    pub support: &'a str,
    pub coaching: &'a str,
    pub upgrade_paths: &'a str,
    pub journeys: &'a str,
    pub upsell_triggers: &'a str,
}

impl CatalogDocuments<'static> {
    /// The documents compiled into this crate.
    pub const EMBEDDED: Self = Self {
        features: include_str!("data/features.json"),
        tiers: include_str!("data/tiers.json"),
        attraction: include_str!("data/attraction.json"),
        upsell: include_str!("data/upsell.json"),
        downsell: include_str!("data/downsell.json"),
        continuity: include_str!("data/continuity.json"),
        support: include_str!("data/support.json"),
        coaching: include_str!("data/coaching.json"),
        upgrade_paths: include_str!("data/upgrade_paths.json"),
        journeys: include_str!("data/journeys.json"),
        upsell_triggers: include_str!("data/upsell_triggers.json"),
    };
}

#[derive(Deserialize)]
struct TierDocument {
    pricing_tiers: Vec<PricingTier>,
    #[serde(default)]
    downsell_tiers: Vec<PricingTier>,
}

fn parse<T: DeserializeOwned>(document: &'static str, text: &str) -> CatalogResult<T> {
    serde_json::from_str(text).map_err(|e| CatalogError::parse(document, e.to_string()))
}

/// The validated, immutable catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) features: Vec<Feature>,
    pub(crate) tiers: Vec<PricingTier>,
    pub(crate) downsell_tiers: Vec<PricingTier>,
    pub(crate) offers: Vec<Offer>,
    pub(crate) support_tiers: Vec<SupportTier>,
    pub(crate) coaching_tiers: Vec<CoachingTier>,
    pub(crate) upgrade_paths: Vec<UpgradePath>,
    pub(crate) journeys: Vec<CustomerJourney>,
    pub(crate) upsell_triggers: Vec<FeatureUpsellTrigger>,
}

impl Catalog {
    pub fn load_embedded() -> CatalogResult<Self> {
        Self::from_documents(&CatalogDocuments::EMBEDDED)
    }

    /// Parse and validate a full set of documents.
    pub fn from_documents(docs: &CatalogDocuments<'_>) -> CatalogResult<Self> {
        let tiers: TierDocument = parse("tiers", docs.tiers)?;

        let mut offers: Vec<Offer> = Vec::new();
        offers.extend(
            parse::<Vec<AttractionOffer>>("attraction", docs.attraction)?
                .into_iter()
                .map(Offer::from),
        );
        offers.extend(
            parse::<Vec<UpsellOffer>>("upsell", docs.upsell)?
                .into_iter()
                .map(Offer::from),
        );
        offers.extend(
            parse::<Vec<DownsellOffer>>("downsell", docs.downsell)?
                .into_iter()
                .map(Offer::from),
        );
        offers.extend(
            parse::<Vec<ContinuityOffer>>("continuity", docs.continuity)?
                .into_iter()
                .map(Offer::from),
        );

        let catalog = Self {
            features: parse("features", docs.features)?,
            tiers: tiers.pricing_tiers,
            downsell_tiers: tiers.downsell_tiers,
            offers,
            support_tiers: parse("support", docs.support)?,
            coaching_tiers: parse("coaching", docs.coaching)?,
            upgrade_paths: parse("upgrade_paths", docs.upgrade_paths)?,
            journeys: parse("journeys", docs.journeys)?,
            upsell_triggers: parse("upsell_triggers", docs.upsell_triggers)?,
        };

        if let Err(err) = validate::validate(&catalog) {
            tracing::warn!(error = %err, "catalog failed validation");
            return Err(err);
        }

        tracing::info!(
            features = catalog.features.len(),
            tiers = catalog.tiers.len() + catalog.downsell_tiers.len(),
            offers = catalog.offers.len(),
            upgrade_paths = catalog.upgrade_paths.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    // Features.

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn features_by_category(&self, category: FeatureCategory) -> Vec<&Feature> {
        sao_features::by_category(&self.features, category)
    }

    pub fn search_features(&self, query: &str) -> Vec<&Feature> {
        sao_features::search(&self.features, query)
    }

    pub fn marketplace(&self, filter: &MarketplaceFilter) -> Vec<&Feature> {
        filter.apply(&self.features)
    }

    pub fn bundle_totals(&self, bundle: &Bundle) -> BundleTotals {
        bundle.totals(&self.features)
    }

    /// Setup saved by buying the Complete tier instead of the bundle, or zero.
    pub fn bundle_savings(&self, bundle: &Bundle) -> Money {
        let complete = find_tier(&self.tiers, "complete").map(|t| t.setup_cost);
        complete.map_or(Money::ZERO, |setup| {
            self.bundle_totals(bundle).savings_versus(setup)
        })
    }

    // Tiers.

    pub fn tiers(&self) -> &[PricingTier] {
        &self.tiers
    }

    pub fn downsell_tiers(&self) -> &[PricingTier] {
        &self.downsell_tiers
    }

    /// A main tier, falling back to the downsell tiers.
    pub fn tier(&self, id: &str) -> Option<&PricingTier> {
        find_tier(&self.tiers, id).or_else(|| find_tier(&self.downsell_tiers, id))
    }

    pub fn tier_includes_feature(&self, tier_id: &str, feature_id: &str) -> bool {
        self.tier(tier_id)
            .is_some_and(|t| t.features.iter().any(|f| f == feature_id))
    }

    pub fn comparable_tiers(&self) -> Vec<TierId> {
        COMPARABLE_TIERS
            .iter()
            .filter_map(|id| find_tier(&self.tiers, id))
            .map(|t| t.id.clone())
            .collect()
    }

    pub fn tier_comparison(&self) -> TierComparison {
        TierComparison::new(self.comparable_tiers())
    }

    // Offers.

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn offer(&self, id: &str) -> Option<&Offer> {
        self.offers.iter().find(|o| o.base().id == id)
    }

    pub fn offers_by_kind(&self, kind: OfferKind) -> Vec<&Offer> {
        filter_by(&self.offers, kind)
    }

    pub fn attraction_offers(&self) -> impl Iterator<Item = &AttractionOffer> {
        self.offers.iter().filter_map(|o| match o {
            Offer::Attraction(a) => Some(a),
            _ => None,
        })
    }

    pub fn upsell_offers(&self) -> impl Iterator<Item = &UpsellOffer> {
        self.offers.iter().filter_map(|o| match o {
            Offer::Upsell(u) => Some(u),
            _ => None,
        })
    }

    pub fn downsell_offers(&self) -> impl Iterator<Item = &DownsellOffer> {
        self.offers.iter().filter_map(|o| match o {
            Offer::Downsell(d) => Some(d),
            _ => None,
        })
    }

    pub fn continuity_offers(&self) -> impl Iterator<Item = &ContinuityOffer> {
        self.offers.iter().filter_map(|o| match o {
            Offer::Continuity(c) => Some(c),
            _ => None,
        })
    }

    pub fn attraction_by_kind(&self, kind: AttractionKind) -> Vec<&AttractionOffer> {
        self.attraction_offers().filter(|o| o.kind() == kind).collect()
    }

    pub fn upsells_by_category(&self, category: UpsellCategory) -> Vec<&UpsellOffer> {
        self.upsell_offers()
            .filter(|o| o.category == category)
            .collect()
    }

    pub fn downsells_by_kind(&self, kind: DownsellKind) -> Vec<&DownsellOffer> {
        self.downsell_offers().filter(|o| o.kind() == kind).collect()
    }

    pub fn continuity_by_category(&self, category: ContinuityCategory) -> Vec<&ContinuityOffer> {
        self.continuity_offers()
            .filter(|o| o.category == category)
            .collect()
    }

    // Reference data.

    pub fn support_tiers(&self) -> &[SupportTier] {
        &self.support_tiers
    }

    pub fn coaching_tiers(&self) -> &[CoachingTier] {
        &self.coaching_tiers
    }

    // Upgrades.

    pub fn upgrade_paths(&self) -> &[UpgradePath] {
        &self.upgrade_paths
    }

    pub fn upgrades_from(&self, id: &str) -> Vec<&UpgradePath> {
        sao_tiers::paths_from(&self.upgrade_paths, id)
    }

    pub fn upgrades_to(&self, id: &str) -> Vec<&UpgradePath> {
        sao_tiers::paths_to(&self.upgrade_paths, id)
    }

    pub fn best_credit(&self, from: &str, to: &str) -> Option<&UpgradePath> {
        sao_tiers::best_credit(&self.upgrade_paths, from, to)
    }

    pub fn journeys(&self) -> &[CustomerJourney] {
        &self.journeys
    }

    pub fn upsell_triggers(&self) -> &[FeatureUpsellTrigger] {
        &self.upsell_triggers
    }

    /// Feature upsells worth presenting to a customer on `tier` after `days`.
    pub fn upsells_due(&self, tier: &str, days: u32) -> Vec<&FeatureUpsellTrigger> {
        sao_tiers::upsells_due(&self.upsell_triggers, tier, days)
    }

    // Lookup by any id.

    /// Display name of any catalog entity.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        if let Some(f) = self.feature(id) {
            return Some(&f.name);
        }
        if let Some(t) = self.tier(id) {
            return Some(&t.name);
        }
        if let Some(o) = self.offer(id) {
            return Some(&o.base().name);
        }
        self.support_tiers
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
            .or_else(|| {
                self.coaching_tiers
                    .iter()
                    .find(|c| c.id == id)
                    .map(|c| c.name.as_str())
            })
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.name_of(id).is_some()
    }

    /// The price an upgrade lands on: a tier's first year, an offer's first year,
    /// or a year of support or coaching.
    pub fn target_price(&self, id: &str) -> Option<Money> {
        if let Some(t) = self.tier(id) {
            return Some(t.first_year_total());
        }
        if let Some(o) = self.offer(id) {
            return Some(o.pricing().first_year_total());
        }
        self.support_tiers
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.price * 12)
            .or_else(|| {
                self.coaching_tiers
                    .iter()
                    .find(|c| c.id == id)
                    .map(|c| c.price * 12)
            })
    }
}
