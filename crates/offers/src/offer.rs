use serde::{Deserialize, Serialize};

use sao_core::{Categorized, CatalogResult, Entity, OfferId, Pricing};

use crate::attraction::AttractionOffer;
use crate::continuity::ContinuityOffer;
use crate::downsell::DownsellOffer;
use crate::upsell::UpsellOffer;

/// Fields every offer carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferBase {
    pub id: OfferId,
    pub name: String,
    pub description: String,
    pub pricing: Pricing,
    /// Sales guidance: the moment in the conversation to bring this up.
    pub when_to_present: String,
    pub target_audience: String,
}

/// The four offer families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferKind {
    Attraction,
    Upsell,
    Downsell,
    Continuity,
}

impl OfferKind {
    pub const ALL: [OfferKind; 4] = [
        OfferKind::Attraction,
        OfferKind::Upsell,
        OfferKind::Downsell,
        OfferKind::Continuity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OfferKind::Attraction => "attraction",
            OfferKind::Upsell => "upsell",
            OfferKind::Downsell => "downsell",
            OfferKind::Continuity => "continuity",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

impl core::fmt::Display for OfferKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any offer in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Offer {
    Attraction(AttractionOffer),
    Upsell(UpsellOffer),
    Downsell(DownsellOffer),
    Continuity(ContinuityOffer),
}

impl Offer {
    pub fn base(&self) -> &OfferBase {
        match self {
            Offer::Attraction(o) => &o.base,
            Offer::Upsell(o) => &o.base,
            Offer::Downsell(o) => &o.base,
            Offer::Continuity(o) => &o.base,
        }
    }

    pub fn kind(&self) -> OfferKind {
        match self {
            Offer::Attraction(_) => OfferKind::Attraction,
            Offer::Upsell(_) => OfferKind::Upsell,
            Offer::Downsell(_) => OfferKind::Downsell,
            Offer::Continuity(_) => OfferKind::Continuity,
        }
    }

    pub fn pricing(&self) -> &Pricing {
        &self.base().pricing
    }

    /// Check the arithmetic the offer's copy promises.
    pub fn validate(&self) -> CatalogResult<()> {
        match self {
            Offer::Attraction(o) => o.validate(),
            Offer::Downsell(o) => o.validate(),
            Offer::Upsell(_) | Offer::Continuity(_) => Ok(()),
        }
    }
}

impl Entity for Offer {
    type Id = OfferId;

    fn id(&self) -> &OfferId {
        &self.base().id
    }

    fn name(&self) -> &str {
        &self.base().name
    }

    fn description(&self) -> &str {
        &self.base().description
    }
}

impl Categorized for Offer {
    type Category = OfferKind;

    fn category(&self) -> OfferKind {
        self.kind()
    }
}

impl From<AttractionOffer> for Offer {
    fn from(value: AttractionOffer) -> Self {
        Offer::Attraction(value)
    }
}

impl From<UpsellOffer> for Offer {
    fn from(value: UpsellOffer) -> Self {
        Offer::Upsell(value)
    }
}

impl From<DownsellOffer> for Offer {
    fn from(value: DownsellOffer) -> Self {
        Offer::Downsell(value)
    }
}

impl From<ContinuityOffer> for Offer {
    fn from(value: ContinuityOffer) -> Self {
        Offer::Continuity(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::upsell::UpsellCategory;
    use sao_core::filter_by;

    fn upsell(id: &str) -> Offer {
        Offer::Upsell(UpsellOffer {
            base: fixtures::base(id, Some(12_000), None),
            category: UpsellCategory::Capability,
            improvements: vec![],
            roi_justification: String::new(),
            credit_if_upgrade: None,
        })
    }

    #[test]
    fn kind_parse_round_trips() {
        for kind in OfferKind::ALL {
            assert_eq!(OfferKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(OfferKind::parse("crossSell"), None);
    }

    #[test]
    fn entity_accessors_read_the_base() {
        let offer = upsell("upsell-dashboard");
        assert_eq!(offer.id().as_str(), "upsell-dashboard");
        assert_eq!(offer.name(), "upsell dashboard");
        assert_eq!(offer.kind(), OfferKind::Upsell);
    }

    #[test]
    fn filter_by_kind() {
        let offers = vec![upsell("upsell-a"), upsell("upsell-b")];
        assert_eq!(filter_by(&offers, OfferKind::Upsell).len(), 2);
        assert!(filter_by(&offers, OfferKind::Downsell).is_empty());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(upsell("upsell-dashboard")).unwrap();
        assert_eq!(json["kind"], "upsell");
        assert_eq!(json["id"], "upsell-dashboard");
        assert_eq!(json["category"], "capability");
    }
}
