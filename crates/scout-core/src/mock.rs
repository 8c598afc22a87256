//! Deterministic substitute documents for offline / demo operation.
//!
//! Everything produced here satisfies the same invariants as a real
//! generation pass, so downstream code carries no real-vs-mock branch.
//! The executive summary embeds a diagnostic explaining why the mock
//! path fired; it also makes these documents usable as smoke-test
//! fixtures.

use crate::credentials::CredentialFailure;
use crate::types::{Battlecard, BriefDocument, Item, Opportunity, ResearchReport, Section};

/// Marker embedded in every mock executive summary.
pub const DEMO_MARKER: &str = "[demo mode]";

/// Why the mock path fired, in the words the diagnostic uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockReason {
    MissingCredential,
    PlaceholderCredential,
    GenerationDisabled,
}

impl MockReason {
    pub fn describe(&self) -> &'static str {
        match self {
            MockReason::MissingCredential => "no API key configured",
            MockReason::PlaceholderCredential => "API key is an un-filled placeholder",
            MockReason::GenerationDisabled => "generation disabled by configuration",
        }
    }
}

impl From<CredentialFailure> for MockReason {
    fn from(failure: CredentialFailure) -> Self {
        match failure {
            CredentialFailure::Missing => MockReason::MissingCredential,
            CredentialFailure::Placeholder => MockReason::PlaceholderCredential,
        }
    }
}

/// Build the deterministic demo brief. `today` is the only varying
/// input; everything else is fixed content.
pub fn mock_brief(reason: MockReason, today: &str) -> BriefDocument {
    BriefDocument {
        date: Some(today.to_string()),
        executive_summary: format!(
            "{} Generated without upstream access ({}). Competitor launch velocity held \
             steady this cycle while pricing pressure concentrated in the mid-market tier. \
             The standout signal is agent-native tooling: three tracked vendors shipped \
             orchestration features inside two weeks.",
            DEMO_MARKER,
            reason.describe()
        ),
        sections: vec![
            Section {
                title: "Product Launches".to_string(),
                items: vec![Item {
                    headline: "Acme ships workflow automation for support teams".to_string(),
                    source: "Acme changelog".to_string(),
                    url: "https://example.com/acme/changelog".to_string(),
                    summary: "Acme's new automation builder targets the same support-ops \
                              buyer we sell to, bundled free on the Growth tier."
                        .to_string(),
                    tags: vec!["automation".to_string(), "support".to_string()],
                }],
            },
            Section {
                title: "Pricing Moves".to_string(),
                items: vec![Item {
                    headline: "Globex cuts entry plan to $19/seat".to_string(),
                    source: "Globex pricing page".to_string(),
                    url: "https://example.com/globex/pricing".to_string(),
                    summary: "A 30% cut aimed squarely at churning our SMB cohort; annual \
                              lock-in required."
                        .to_string(),
                    tags: vec!["pricing".to_string()],
                }],
            },
        ],
        top_10_opportunities: Some(vec![
            Opportunity {
                id: 1,
                feature_name: "Inbox triage copilot".to_string(),
                description: "Auto-classify and route inbound tickets using the existing \
                              tagging model."
                    .to_string(),
                why_build_it: "Highest-requested feature in churn interviews; two \
                               competitors shipped a weaker version this quarter."
                    .to_string(),
                competitor_activity: "Acme and Globex both launched triage betas in the \
                                      last 30 days."
                    .to_string(),
            },
            Opportunity {
                id: 2,
                feature_name: "Usage-based add-on pricing".to_string(),
                description: "Metered billing for automation runs above the plan quota."
                    .to_string(),
                why_build_it: "Defuses the entry-price war without discounting the core \
                               plan."
                    .to_string(),
                competitor_activity: "Globex's $19 plan caps automation runs at 100/month."
                    .to_string(),
            },
        ]),
        mock: Some(true),
    }
}

/// Deterministic battlecard for the analyze operation.
pub fn mock_battlecard(competitor: &str) -> Battlecard {
    Battlecard {
        competitor: competitor.to_string(),
        their_strengths: format!(
            "{} Strong brand recognition and an aggressive release cadence.",
            DEMO_MARKER
        ),
        their_weaknesses: "Shallow integrations outside their own suite; support quality \
                           drops sharply off the enterprise tier."
            .to_string(),
        our_angle: "Lead with depth of workflow integration and transparent pricing."
            .to_string(),
        talking_points: vec![
            "Their automation builder requires their CRM; ours is CRM-agnostic.".to_string(),
            "No per-run metering surprises on our plans.".to_string(),
        ],
        mock: Some(true),
    }
}

/// Deterministic research report for the research operation.
pub fn mock_research(topic: &str) -> ResearchReport {
    ResearchReport {
        topic: topic.to_string(),
        market_context: format!(
            "{} Demand for this capability is concentrated in mid-market support and \
             revenue teams; adjacent vendors are converging on it from both sides.",
            DEMO_MARKER
        ),
        technical_approach: "Build on the existing event pipeline; an initial rules-based \
                             pass with a model-backed fallback keeps latency predictable."
            .to_string(),
        recommendation: "Ship a scoped beta to design partners before committing to \
                         general availability."
            .to_string(),
        effort_estimate: "4-6 engineer-weeks for the beta scope".to_string(),
        mock: Some(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize_battlecard, normalize_brief, normalize_research};
    use crate::types::BriefDocument;

    #[test]
    fn test_mock_brief_passes_schema_validation() {
        for reason in [
            MockReason::MissingCredential,
            MockReason::PlaceholderCredential,
            MockReason::GenerationDisabled,
        ] {
            let doc = mock_brief(reason, &BriefDocument::today());
            let serialized = serde_json::to_string(&doc).unwrap();
            let parsed = normalize_brief(&serialized).unwrap();
            assert_eq!(parsed, doc);
        }
    }

    #[test]
    fn test_mock_brief_carries_diagnostic_and_marker() {
        let doc = mock_brief(MockReason::PlaceholderCredential, "2026-08-30");
        assert!(doc.executive_summary.contains(DEMO_MARKER));
        assert!(doc.executive_summary.contains("placeholder"));
        assert_eq!(doc.mock, Some(true));
    }

    #[test]
    fn test_mock_brief_has_opportunities_and_unique_ids() {
        let doc = mock_brief(MockReason::MissingCredential, "2026-08-30");
        let opps = doc.top_10_opportunities.unwrap();
        assert!(!opps.is_empty());
        let mut ids: Vec<i64> = opps.iter().map(|o| o.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), opps.len());
    }

    #[test]
    fn test_mock_brief_is_deterministic() {
        let a = mock_brief(MockReason::MissingCredential, "2026-08-30");
        let b = mock_brief(MockReason::MissingCredential, "2026-08-30");
        assert_eq!(a, b);
    }

    #[test]
    fn test_mock_derived_documents_pass_validation() {
        let card = mock_battlecard("Acme");
        let parsed = normalize_battlecard(&serde_json::to_string(&card).unwrap()).unwrap();
        assert_eq!(parsed, card);

        let report = mock_research("usage-based pricing");
        let parsed = normalize_research(&serde_json::to_string(&report).unwrap()).unwrap();
        assert_eq!(parsed, report);
    }
}
