//! Global search across tiers, features and offers.

use serde::Serialize;

use sao_core::{MIN_QUERY_CHARS, Money, normalize_query};
use sao_offers::{Offer, OfferKind};

use crate::catalog::Catalog;

/// Which section of the site a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Pricing,
    Feature,
    Attraction,
    Upsell,
    Downsell,
    Continuity,
}

impl ResultKind {
    pub fn section(self) -> &'static str {
        match self {
            ResultKind::Pricing => "Pricing Tiers",
            ResultKind::Feature => "Features Marketplace",
            ResultKind::Attraction => "Attraction Offers",
            ResultKind::Upsell => "Upsell Offers",
            ResultKind::Downsell => "Downsell Offers",
            ResultKind::Continuity => "Continuity Offers",
        }
    }

    /// Page anchor of the section.
    pub fn anchor(self) -> &'static str {
        match self {
            ResultKind::Pricing => "#pricing",
            ResultKind::Feature => "#features",
            ResultKind::Attraction => "#attractions",
            ResultKind::Upsell => "#upsells",
            ResultKind::Downsell => "#downsells",
            ResultKind::Continuity => "#continuity",
        }
    }
}

impl From<OfferKind> for ResultKind {
    fn from(kind: OfferKind) -> Self {
        match kind {
            OfferKind::Attraction => ResultKind::Attraction,
            OfferKind::Upsell => ResultKind::Upsell,
            OfferKind::Downsell => ResultKind::Downsell,
            OfferKind::Continuity => ResultKind::Continuity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ResultKind,
    pub price: Option<String>,
    pub section: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Queries shorter than this (after trimming) match nothing.
    pub min_query_len: usize,
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: MIN_QUERY_CHARS,
            max_results: 8,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    result: SearchResult,
    haystack: [String; 3],
}

impl Entry {
    fn new(result: SearchResult) -> Self {
        let haystack = [
            result.name.to_lowercase(),
            result.description.to_lowercase(),
            result.section.to_lowercase(),
        ];
        Self { result, haystack }
    }

    fn matches(&self, needle: &str) -> bool {
        self.haystack.iter().any(|h| h.contains(needle))
    }
}

/// Flattened, pre-lowercased view of the catalog in section order.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<Entry>,
    config: SearchConfig,
}

impl SearchIndex {
    pub fn build(catalog: &Catalog) -> Self {
        Self::with_config(catalog, SearchConfig::default())
    }

    pub fn with_config(catalog: &Catalog, config: SearchConfig) -> Self {
        let mut entries = Vec::new();

        for tier in catalog.tiers() {
            entries.push(Entry::new(SearchResult {
                id: tier.id.to_string(),
                name: tier.name.clone(),
                description: format!("{} features included", tier.features.len()),
                kind: ResultKind::Pricing,
                price: Some(format!("{} + {}/mo", tier.setup_cost, tier.monthly_cost)),
                section: ResultKind::Pricing.section(),
            }));
        }

        for feature in catalog.features() {
            entries.push(Entry::new(SearchResult {
                id: feature.id.to_string(),
                name: feature.name.clone(),
                description: feature.description.clone(),
                kind: ResultKind::Feature,
                price: nonzero(feature.pricing.setup).map(|m| m.to_string()),
                section: ResultKind::Feature.section(),
            }));
        }

        for kind in OfferKind::ALL {
            for offer in catalog.offers_by_kind(kind) {
                let kind = ResultKind::from(kind);
                let base = offer.base();
                entries.push(Entry::new(SearchResult {
                    id: base.id.to_string(),
                    name: base.name.clone(),
                    description: base.description.clone(),
                    kind,
                    price: offer_price(offer),
                    section: kind.section(),
                }));
            }
        }

        Self { entries, config }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Case-insensitive substring match over name, description and section.
    /// Results keep index order and are capped at `max_results`.
    pub fn search(&self, query: &str) -> Vec<&SearchResult> {
        let Some(needle) = normalize_query(query, self.config.min_query_len) else {
            return Vec::new();
        };
        self.entries
            .iter()
            .filter(|e| e.matches(&needle))
            .take(self.config.max_results)
            .map(|e| &e.result)
            .collect()
    }
}

fn nonzero(m: Option<Money>) -> Option<Money> {
    m.filter(|m| !m.is_zero())
}

fn offer_price(offer: &Offer) -> Option<String> {
    let pricing = offer.pricing();
    match offer {
        Offer::Continuity(c) if c.recurring_price.is_zero() => Some("Included".to_owned()),
        Offer::Continuity(c) => Some(format!("{}{}", c.recurring_price, c.billing_cycle.suffix())),
        Offer::Downsell(_) => nonzero(pricing.setup)
            .map(|m| m.to_string())
            .or_else(|| nonzero(pricing.monthly).map(|m| format!("{m}/mo"))),
        Offer::Attraction(_) | Offer::Upsell(_) => nonzero(pricing.setup).map(|m| m.to_string()),
    }
}

/// Display state of the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    ShowingResults(usize),
    ShowingEmpty,
}

/// The search box: recomputed synchronously on every input.
#[derive(Debug, Clone)]
pub struct SearchWidget<'a> {
    index: &'a SearchIndex,
    query: String,
    results: Vec<&'a SearchResult>,
    state: WidgetState,
}

impl<'a> SearchWidget<'a> {
    pub fn new(index: &'a SearchIndex) -> Self {
        Self {
            index,
            query: String::new(),
            results: Vec::new(),
            state: WidgetState::Idle,
        }
    }

    pub fn input(&mut self, query: &str) -> WidgetState {
        self.query = query.to_owned();
        if normalize_query(query, self.index.config.min_query_len).is_none() {
            self.results.clear();
            self.state = WidgetState::Idle;
            return self.state;
        }
        self.results = self.index.search(query);
        self.state = match self.results.len() {
            0 => WidgetState::ShowingEmpty,
            n => WidgetState::ShowingResults(n),
        };
        self.state
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.state = WidgetState::Idle;
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[&'a SearchResult] {
        &self.results
    }

    pub fn empty_message(&self) -> Option<String> {
        (self.state == WidgetState::ShowingEmpty)
            .then(|| format!("No results found for \"{}\"", self.query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SearchIndex {
        SearchIndex::build(&Catalog::load_embedded().unwrap())
    }

    fn ids<'a>(results: &[&'a SearchResult]) -> Vec<&'a str> {
        results.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn index_covers_tiers_features_and_offers() {
        assert_eq!(index().len(), 4 + 12 + 37);
    }

    #[test]
    fn short_queries_match_nothing() {
        let index = index();
        assert!(index.search("").is_empty());
        assert!(index.search("a").is_empty());
        assert!(index.search("  a  ").is_empty());
    }

    #[test]
    fn results_are_capped() {
        let index = index();
        // Every offer matches through its section title.
        assert_eq!(index.search("offers").len(), 8);

        let wide = SearchIndex::with_config(
            &Catalog::load_embedded().unwrap(),
            SearchConfig {
                max_results: 100,
                ..SearchConfig::default()
            },
        );
        assert_eq!(wide.search("offers").len(), 37);
    }

    #[test]
    fn unique_name_gives_single_hit() {
        let index = index();
        assert_eq!(ids(&index.search("dial-&-dump")), ["sao-dial-dump-lite"]);
    }

    #[test]
    fn feature_name_also_finds_its_upsell() {
        let index = index();
        assert_eq!(ids(&index.search("Voice Cloning")), ["voice-cloning", "upsell-voice-cloning"]);
    }

    #[test]
    fn tier_entries_carry_price_and_feature_count() {
        let index = index();
        let hits = index.search("Foundation");
        let tier = hits.iter().find(|r| r.kind == ResultKind::Pricing).unwrap();
        assert_eq!(tier.description, "4 features included");
        assert_eq!(tier.price.as_deref(), Some("£32,000 + £2,400/mo"));
    }

    #[test]
    fn continuity_prices_use_billing_cycle() {
        let index = index();
        let hit = index.search("SAO Complete Rolling")[0];
        assert_eq!(hit.kind, ResultKind::Continuity);
        assert_eq!(hit.price.as_deref(), Some("£4,500/mo"));
    }

    #[test]
    fn widget_walks_its_states() {
        let index = index();
        let mut widget = SearchWidget::new(&index);
        assert_eq!(widget.state(), WidgetState::Idle);

        assert_eq!(widget.input("k"), WidgetState::Idle);
        assert!(matches!(widget.input("knowledge"), WidgetState::ShowingResults(n) if n > 0));
        assert!(!widget.results().is_empty());

        assert_eq!(widget.input("zzzz"), WidgetState::ShowingEmpty);
        assert_eq!(widget.empty_message().as_deref(), Some("No results found for \"zzzz\""));

        widget.clear();
        assert_eq!(widget.state(), WidgetState::Idle);
        assert!(widget.results().is_empty());
        assert_eq!(widget.empty_message(), None);
    }
}
