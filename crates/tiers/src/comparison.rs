//! Side-by-side tier comparison.

use serde::Serialize;

use sao_core::{FeatureId, Money, TierId};

use crate::tier::PricingTier;

/// Result of toggling a tier in the comparison selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Selection is full; nothing changed.
    LimitReached,
    /// The tier is not offered for comparison; nothing changed.
    NotComparable,
}

/// Selection state of the comparison panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierComparison {
    candidates: Vec<TierId>,
    selected: Vec<TierId>,
    limit: usize,
}

impl TierComparison {
    pub const DEFAULT_LIMIT: usize = 3;

    pub fn new(candidates: Vec<TierId>) -> Self {
        Self {
            candidates,
            selected: Vec::new(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn candidates(&self) -> &[TierId] {
        &self.candidates
    }

    pub fn selected(&self) -> &[TierId] {
        &self.selected
    }

    pub fn is_selected(&self, id: &TierId) -> bool {
        self.selected.contains(id)
    }

    pub fn toggle(&mut self, id: &TierId) -> ToggleOutcome {
        if !self.candidates.contains(id) {
            return ToggleOutcome::NotComparable;
        }
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            return ToggleOutcome::Removed;
        }
        if self.selected.len() >= self.limit {
            return ToggleOutcome::LimitReached;
        }
        self.selected.push(id.clone());
        ToggleOutcome::Added
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Build the matrix for the current selection.
    ///
    /// Columns follow catalog order, not click order. Rows are the union of the
    /// selected tiers' feature ids in first-seen order.
    pub fn matrix(&self, tiers: &[PricingTier]) -> ComparisonMatrix {
        let compared: Vec<&PricingTier> = tiers
            .iter()
            .filter(|t| self.candidates.contains(&t.id) && self.selected.contains(&t.id))
            .collect();

        let mut features: Vec<&FeatureId> = Vec::new();
        for tier in &compared {
            for f in &tier.features {
                if !features.contains(&f) {
                    features.push(f);
                }
            }
        }

        let columns = compared
            .iter()
            .map(|t| ComparisonColumn {
                tier: t.id.clone(),
                name: t.name.clone(),
                is_popular: t.is_popular,
                setup: t.setup_cost,
                monthly: t.monthly_cost,
                first_year: t.first_year_total(),
            })
            .collect();

        let rows = features
            .into_iter()
            .map(|f| ComparisonRow {
                feature: f.clone(),
                included: compared.iter().map(|t| t.includes(f)).collect(),
            })
            .collect();

        ComparisonMatrix { columns, rows }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonColumn {
    pub tier: TierId,
    pub name: String,
    pub is_popular: bool,
    pub setup: Money,
    pub monthly: Money,
    pub first_year: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub feature: FeatureId,
    /// One flag per column.
    pub included: Vec<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonMatrix {
    pub columns: Vec<ComparisonColumn>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn tid(s: &str) -> TierId {
        TierId::parse(s).unwrap()
    }

    fn comparison() -> TierComparison {
        TierComparison::new(vec![tid("complete"), tid("foundation"), tid("analyzer")])
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut cmp = comparison();
        assert_eq!(cmp.toggle(&tid("complete")), ToggleOutcome::Added);
        assert!(cmp.is_selected(&tid("complete")));
        assert_eq!(cmp.toggle(&tid("complete")), ToggleOutcome::Removed);
        assert!(cmp.selected().is_empty());
    }

    #[test]
    fn selection_is_capped() {
        let mut cmp = comparison().with_limit(2);
        cmp.toggle(&tid("complete"));
        cmp.toggle(&tid("foundation"));
        assert_eq!(cmp.toggle(&tid("analyzer")), ToggleOutcome::LimitReached);
        assert_eq!(cmp.selected().len(), 2);
    }

    #[test]
    fn non_candidates_are_rejected() {
        let mut cmp = comparison();
        assert_eq!(cmp.toggle(&tid("human-insights")), ToggleOutcome::NotComparable);
        assert!(cmp.selected().is_empty());
    }

    #[test]
    fn empty_selection_gives_empty_matrix() {
        let tiers = fixtures::sample();
        assert!(comparison().matrix(&tiers).is_empty());
    }

    #[test]
    fn matrix_unions_features_in_first_seen_order() {
        let tiers = fixtures::sample();
        let mut cmp = comparison();
        cmp.toggle(&tid("analyzer"));
        cmp.toggle(&tid("foundation"));

        let matrix = cmp.matrix(&tiers);
        let names: Vec<&str> = matrix.columns.iter().map(|c| c.tier.as_str()).collect();
        assert_eq!(names, vec!["foundation", "analyzer"]);
        assert_eq!(matrix.columns[0].first_year, Money::new(60_800));

        let rows: Vec<&str> = matrix.rows.iter().map(|r| r.feature.as_str()).collect();
        assert_eq!(
            rows,
            vec![
                "premium-voice-playbook",
                "crm-integration",
                "ai-call-analysis",
                "multi-attempt-retry",
                "weekly-reports",
                "dashboard",
            ]
        );
        let analysis = matrix.rows.iter().find(|r| r.feature == "ai-call-analysis").unwrap();
        assert_eq!(analysis.included, vec![true, true]);
        let dashboard = matrix.rows.iter().find(|r| r.feature == "dashboard").unwrap();
        assert_eq!(dashboard.included, vec![false, true]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: no sequence of toggles grows the selection past its limit.
            #[test]
            fn selection_never_exceeds_limit(
                clicks in proptest::collection::vec(0usize..4, 0..40),
                limit in 0usize..4
            ) {
                let ids = ["complete", "foundation", "analyzer", "human-insights"];
                let mut cmp = comparison().with_limit(limit);
                for i in clicks {
                    cmp.toggle(&tid(ids[i]));
                    prop_assert!(cmp.selected().len() <= limit);
                }
            }
        }
    }
}
