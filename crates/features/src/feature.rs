use serde::{Deserialize, Serialize};

use sao_core::{Categorized, Entity, FeatureId, Pricing};

/// Marketplace category. Closed set; every feature belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureCategory {
    Core,
    Analytics,
    Automation,
    Premium,
    Advanced,
}

impl FeatureCategory {
    /// All categories in marketplace display order.
    pub const ALL: [FeatureCategory; 5] = [
        FeatureCategory::Core,
        FeatureCategory::Analytics,
        FeatureCategory::Automation,
        FeatureCategory::Premium,
        FeatureCategory::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FeatureCategory::Core => "core",
            FeatureCategory::Analytics => "analytics",
            FeatureCategory::Automation => "automation",
            FeatureCategory::Premium => "premium",
            FeatureCategory::Advanced => "advanced",
        }
    }

    /// Parse a category label. Unknown labels are `None`, which filters to nothing.
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

impl core::fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a feature relates to the rest of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Foundation everything else builds on.
    Critical,
    /// Needs the listed features to be useful.
    Paired,
    /// Valuable on its own.
    Standalone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub kind: DependencyKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_features: Vec<FeatureId>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketComparison {
    pub competitors: Vec<String>,
    pub price_range: String,
    pub positioning: String,
}

/// A separately sellable platform feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    pub name: String,
    pub category: FeatureCategory,
    pub description: String,
    pub what_it_is: String,
    pub why_valuable: String,
    pub capabilities: Vec<String>,
    pub pricing: Pricing,
    pub dependency: Dependency,
    pub market_comparison: MarketComparison,
    /// How sales should position the feature.
    pub sales_angle: String,
    pub standalone_sellable: bool,
}

impl Feature {
    pub fn requires(&self, other: &FeatureId) -> bool {
        self.dependency.required_features.contains(other)
    }

    /// Case-insensitive substring match over name, description and capabilities.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .capabilities
                .iter()
                .any(|c| c.to_lowercase().contains(needle))
    }
}

impl Entity for Feature {
    type Id = FeatureId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl Categorized for Feature {
    type Category = FeatureCategory;

    fn category(&self) -> FeatureCategory {
        self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(FeatureCategory::parse("Analytics"), Some(FeatureCategory::Analytics));
        assert_eq!(FeatureCategory::parse(" core "), Some(FeatureCategory::Core));
        assert_eq!(FeatureCategory::parse("gold"), None);
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&FeatureCategory::Automation).unwrap();
        assert_eq!(json, "\"automation\"");
    }

    #[test]
    fn text_match_covers_capabilities() {
        let features = fixtures::sample();
        let kb = features.iter().find(|f| f.id == "knowledge-base-rag").unwrap();
        assert!(kb.matches_text("semantic search"));
        assert!(kb.matches_text("knowledge base"));
        assert!(!kb.matches_text("calendar"));
    }

    #[test]
    fn requires_reads_dependency_list() {
        let features = fixtures::sample();
        let recycling = features.iter().find(|f| f.id == "lead-recycling").unwrap();
        assert!(recycling.requires(&FeatureId::parse("crm-integration").unwrap()));
        assert!(!recycling.requires(&FeatureId::parse("voice-cloning").unwrap()));
    }
}
