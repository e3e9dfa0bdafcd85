//! Support and coaching tiers. Reference data shown next to the offers; they are
//! not sold through the offer flow.

use serde::{Deserialize, Serialize};

use sao_core::{EntityId, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    P1,
    P2,
    P3,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::P1, Severity::P2, Severity::P3];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::P1 => "P1",
            Severity::P2 => "P2",
            Severity::P3 => "P3",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLevel {
    pub severity: Severity,
    pub description: String,
    pub response_time: String,
    pub resolution_target: String,
}

/// Change requests bundled into a support plan each month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludedChanges {
    pub minor: u32,
    pub medium: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportTier {
    pub id: EntityId,
    pub name: String,
    /// Monthly.
    pub price: Money,
    pub coverage: String,
    pub severity_levels: Vec<ServiceLevel>,
    #[serde(default)]
    pub included_changes: IncludedChanges,
    #[serde(default)]
    pub additional_benefits: Vec<String>,
}

impl SupportTier {
    pub fn response_for(&self, severity: Severity) -> Option<&ServiceLevel> {
        self.severity_levels.iter().find(|s| s.severity == severity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachingTier {
    pub id: EntityId,
    pub name: String,
    /// Monthly.
    pub price: Money,
    pub session_frequency: String,
    pub session_duration_minutes: u32,
    pub included_services: Vec<String>,
    pub minimum_commitment_months: u32,
    pub target_audience: String,
}

impl CoachingTier {
    pub fn commitment_total(&self) -> Money {
        self.price * u64::from(self.minimum_commitment_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(severity: Severity, response: &str) -> ServiceLevel {
        ServiceLevel {
            severity,
            description: String::new(),
            response_time: response.into(),
            resolution_target: String::new(),
        }
    }

    #[test]
    fn response_lookup_by_severity() {
        let tier = SupportTier {
            id: EntityId::parse("support-standard").unwrap(),
            name: "Standard".into(),
            price: Money::new(500),
            coverage: "Business hours".into(),
            severity_levels: vec![level(Severity::P1, "4 hours"), level(Severity::P3, "2 days")],
            included_changes: IncludedChanges { minor: 2, medium: 0 },
            additional_benefits: vec![],
        };
        assert_eq!(tier.response_for(Severity::P1).unwrap().response_time, "4 hours");
        assert!(tier.response_for(Severity::P2).is_none());
    }

    #[test]
    fn severity_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Severity::P2).unwrap(), "\"P2\"");
        let s: Severity = serde_json::from_str("\"P3\"").unwrap();
        assert_eq!(s, Severity::P3);
    }

    #[test]
    fn commitment_total_multiplies_months() {
        let tier = CoachingTier {
            id: EntityId::parse("coaching-growth").unwrap(),
            name: "Growth".into(),
            price: Money::new(1500),
            session_frequency: "Fortnightly".into(),
            session_duration_minutes: 60,
            included_services: vec![],
            minimum_commitment_months: 3,
            target_audience: String::new(),
        };
        assert_eq!(tier.commitment_total(), Money::new(4500));
    }
}
