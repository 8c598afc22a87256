//! Strict boundary between raw model output and typed documents.
//!
//! This is the one place untrusted external structure enters the
//! system. Beyond stripping the code fences models like to wrap JSON
//! in, nothing is guessed or repaired: the remainder either parses and
//! passes the field-by-field schema check, or the call fails with
//! [`BriefError::InvalidUpstreamResponse`].

use crate::error::{BriefError, Result};
use crate::types::{Battlecard, BriefDocument, ResearchReport};
use serde_json::Value;

/// Remove a leading/trailing fenced-block marker and trim whitespace.
/// Idempotent: already-clean input passes through unchanged.
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    for opener in ["```json", "```"] {
        if let Some(rest) = text.strip_prefix(opener) {
            text = rest;
            break;
        }
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parse raw model output into a [`BriefDocument`], enforcing the
/// schema: `executive_summary` and `sections` must be present and
/// correctly typed; `date` and `top_10_opportunities` are optional but
/// type-checked when present.
pub fn normalize_brief(raw: &str) -> Result<BriefDocument> {
    let value = parse_json(raw)?;

    require_string(&value, "executive_summary")?;
    require_array(&value, "sections")?;
    if let Some(date) = value.get("date") {
        if !date.is_string() {
            return Err(BriefError::InvalidUpstreamResponse(
                "field 'date' must be a string".to_string(),
            ));
        }
    }
    if let Some(opps) = value.get("top_10_opportunities") {
        if !opps.is_array() && !opps.is_null() {
            return Err(BriefError::InvalidUpstreamResponse(
                "field 'top_10_opportunities' must be an array".to_string(),
            ));
        }
    }

    serde_json::from_value(value)
        .map_err(|e| BriefError::InvalidUpstreamResponse(format!("brief shape mismatch: {}", e)))
}

/// Parse raw model output into a [`Battlecard`].
pub fn normalize_battlecard(raw: &str) -> Result<Battlecard> {
    let value = parse_json(raw)?;
    for field in ["competitor", "their_strengths", "their_weaknesses", "our_angle"] {
        require_string(&value, field)?;
    }
    serde_json::from_value(value).map_err(|e| {
        BriefError::InvalidUpstreamResponse(format!("battlecard shape mismatch: {}", e))
    })
}

/// Parse raw model output into a [`ResearchReport`].
pub fn normalize_research(raw: &str) -> Result<ResearchReport> {
    let value = parse_json(raw)?;
    for field in [
        "topic",
        "market_context",
        "technical_approach",
        "recommendation",
        "effort_estimate",
    ] {
        require_string(&value, field)?;
    }
    serde_json::from_value(value).map_err(|e| {
        BriefError::InvalidUpstreamResponse(format!("research shape mismatch: {}", e))
    })
}

fn parse_json(raw: &str) -> Result<Value> {
    let cleaned = strip_fences(raw);
    if cleaned.is_empty() {
        return Err(BriefError::InvalidUpstreamResponse(
            "empty response body".to_string(),
        ));
    }
    serde_json::from_str(cleaned)
        .map_err(|e| BriefError::InvalidUpstreamResponse(format!("not parseable as JSON: {}", e)))
}

fn require_string(value: &Value, field: &str) -> Result<()> {
    match value.get(field) {
        Some(v) if v.is_string() => Ok(()),
        Some(_) => Err(BriefError::InvalidUpstreamResponse(format!(
            "field '{}' must be a string",
            field
        ))),
        None => Err(BriefError::InvalidUpstreamResponse(format!(
            "missing required field '{}'",
            field
        ))),
    }
}

fn require_array(value: &Value, field: &str) -> Result<()> {
    match value.get(field) {
        Some(v) if v.is_array() => Ok(()),
        Some(_) => Err(BriefError::InvalidUpstreamResponse(format!(
            "field '{}' must be an array",
            field
        ))),
        None => Err(BriefError::InvalidUpstreamResponse(format!(
            "missing required field '{}'",
            field
        ))),
    }
}
