//! Category and text filters over the feature list.
//!
//! Every function preserves the authored order of its input.

use sao_core::{MIN_QUERY_CHARS, filter_by, normalize_query};

use crate::feature::{Feature, FeatureCategory};

/// Features in `category`, in authored order.
pub fn by_category(features: &[Feature], category: FeatureCategory) -> Vec<&Feature> {
    filter_by(features, category)
}

/// Case-insensitive substring search over name, description and capabilities.
///
/// Queries under two characters return nothing.
pub fn search<'a>(features: &'a [Feature], query: &str) -> Vec<&'a Feature> {
    let Some(needle) = normalize_query(query, MIN_QUERY_CHARS) else {
        return Vec::new();
    };
    features.iter().filter(|f| f.matches_text(&needle)).collect()
}

/// Features grouped under every category, in display order. Empty groups are kept
/// so callers can render a heading for each.
pub fn group_by_category(features: &[Feature]) -> Vec<(FeatureCategory, Vec<&Feature>)> {
    FeatureCategory::ALL
        .into_iter()
        .map(|c| (c, by_category(features, c)))
        .collect()
}

/// Marketplace browse state: an optional category chip plus the search box.
///
/// Unlike [`search`], an empty query does not constrain the result, so the
/// marketplace shows everything until the user types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketplaceFilter {
    pub category: Option<FeatureCategory>,
    pub query: String,
}

impl MarketplaceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: FeatureCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn is_active(&self) -> bool {
        self.category.is_some() || !self.query.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.category = None;
        self.query.clear();
    }

    pub fn apply<'a>(&self, features: &'a [Feature]) -> Vec<&'a Feature> {
        let needle = self.query.trim().to_lowercase();
        features
            .iter()
            .filter(|f| self.category.is_none_or(|c| f.category == c))
            .filter(|f| needle.is_empty() || f.matches_text(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn ids<'a>(features: &[&'a Feature]) -> Vec<&'a str> {
        features.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn category_filter_keeps_authored_order() {
        let features = fixtures::sample();
        let core = by_category(&features, FeatureCategory::Core);
        assert_eq!(
            ids(&core),
            vec!["premium-voice-playbook", "crm-integration", "knowledge-base-rag"]
        );
    }

    #[test]
    fn every_feature_lands_in_exactly_one_group() {
        let features = fixtures::sample();
        let groups = group_by_category(&features);
        assert_eq!(groups.len(), FeatureCategory::ALL.len());

        for feature in &features {
            let hits = groups
                .iter()
                .filter(|(_, members)| members.iter().any(|m| m.id == feature.id))
                .count();
            assert_eq!(hits, 1, "{}", feature.id);
        }
        let total: usize = groups.iter().map(|(_, m)| m.len()).sum();
        assert_eq!(total, features.len());
    }

    #[test]
    fn search_is_case_insensitive_and_single_hit() {
        let features = fixtures::sample();
        let hits = search(&features, "KNOWLEDGE base");
        assert_eq!(ids(&hits), vec!["knowledge-base-rag"]);
    }

    #[test]
    fn one_character_query_returns_nothing() {
        let features = fixtures::sample();
        assert!(search(&features, "e").is_empty());
        assert!(search(&features, "").is_empty());
    }

    #[test]
    fn search_without_match_is_empty() {
        let features = fixtures::sample();
        assert!(search(&features, "blockchain").is_empty());
    }

    #[test]
    fn marketplace_empty_query_shows_everything() {
        let features = fixtures::sample();
        let filter = MarketplaceFilter::new();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&features).len(), features.len());
    }

    #[test]
    fn marketplace_combines_category_and_text() {
        let features = fixtures::sample();
        let filter = MarketplaceFilter::new()
            .with_category(FeatureCategory::Core)
            .with_query("crm");
        assert_eq!(ids(&filter.apply(&features)), vec!["crm-integration"]);

        let mut filter = filter.with_category(FeatureCategory::Analytics);
        assert!(filter.apply(&features).is_empty());

        filter.clear();
        assert!(!filter.is_active());
    }
}
