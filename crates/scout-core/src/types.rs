use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One generated intelligence brief, as produced by a single
/// generation cycle (real or mock).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BriefDocument {
    /// Calendar date string (YYYY-MM-DD). Optional on the wire — the
    /// orchestrator stamps today's date before persisting if the model
    /// left it out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Headline narrative for the whole brief.
    pub executive_summary: String,

    /// Ordered topic sections. May be empty, never absent.
    pub sections: Vec<Section>,

    /// Ranked product opportunities. Absent means "no data", which is
    /// valid — consumers treat it as an empty list, not an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_10_opportunities: Option<Vec<Opportunity>>,

    /// Set when the document came from the offline mock path. History
    /// keeps mock entries alongside real ones; this marker is the only
    /// thing distinguishing them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
}

/// A titled group of items within a brief.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub title: String,
    pub items: Vec<Item>,
}

/// One sourced finding inside a section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub headline: String,
    pub source: String,
    pub url: String,
    pub summary: String,
    /// Set-like: order irrelevant, duplicates tolerated.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A ranked build opportunity. `id` is unique within its document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Opportunity {
    pub id: i64,
    pub feature_name: String,
    pub description: String,
    pub why_build_it: String,
    pub competitor_activity: String,
}

/// Persisted envelope around a serialized [`BriefDocument`].
///
/// The store exclusively owns `id` (monotonically increasing) and
/// `created_at` — callers never supply either. Records are immutable
/// once written; history is strictly append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BriefRecord {
    pub id: u64,
    pub date: String,
    /// The document as opaque serialized JSON. The store never parses it.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Competitor battlecard produced by the analyze operation.
/// Request-scoped: validated like a brief but never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Battlecard {
    pub competitor: String,
    pub their_strengths: String,
    pub their_weaknesses: String,
    pub our_angle: String,
    #[serde(default)]
    pub talking_points: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
}

/// Deep-dive report produced by the research operation.
/// Request-scoped: validated like a brief but never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResearchReport {
    pub topic: String,
    pub market_context: String,
    pub technical_approach: String,
    pub recommendation: String,
    pub effort_estimate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
}

impl BriefDocument {
    /// Today's date in the brief's calendar format.
    pub fn today() -> String {
        Utc::now().format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_omitted_from_wire() {
        let doc = BriefDocument {
            date: None,
            executive_summary: "Quiet day".to_string(),
            sections: vec![],
            top_10_opportunities: None,
            mock: None,
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("date"));
        assert!(!json.contains("top_10_opportunities"));
        assert!(!json.contains("mock"));
    }

    #[test]
    fn test_missing_tags_default_to_empty() {
        let item: Item = serde_json::from_str(
            r#"{"headline":"h","source":"s","url":"u","summary":"sum"}"#,
        )
        .unwrap();
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_absent_opportunities_is_valid() {
        let doc: BriefDocument = serde_json::from_str(
            r#"{"executive_summary":"es","sections":[]}"#,
        )
        .unwrap();
        assert!(doc.top_10_opportunities.is_none());
    }
}
