//! Upstream generative AI boundary.
//!
//! The orchestrator talks to the model through [`UpstreamClient`] so
//! tests can substitute scripted stubs; [`GeminiClient`] is the
//! production implementation against the Gemini REST API with search
//! grounding enabled.

use crate::credentials::Credential;
use crate::error::{BriefError, Result};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Seam between the orchestrator and the generative service. Returns
/// the raw reply text; normalization happens at the caller.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String>;
}

/// Gemini `generateContent` client with search grounding.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    credential: Credential,
}

impl GeminiClient {
    pub fn new(credential: Credential) -> Self {
        Self::with_base_url(credential, DEFAULT_BASE_URL.to_string())
    }

    /// Custom base URL, used to point at a local stub under test.
    pub fn with_base_url(credential: Credential, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            model: DEFAULT_MODEL.to_string(),
            credential,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl UpstreamClient for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        };

        debug!(
            "Dispatching generateContent to {} ({} prompt bytes)",
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.credential.as_str())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| BriefError::UpstreamTransport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(BriefError::UpstreamTransport(format!(
                "upstream returned {}: {}",
                status,
                detail.chars().take(200).collect::<String>()
            )));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| BriefError::UpstreamTransport(format!("unreadable reply body: {}", e)))?;

        // All text parts of the first candidate, concatenated.
        let text: String = reply
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(BriefError::InvalidUpstreamResponse(
                "reply carried no candidate text".to_string(),
            ));
        }

        debug!("Upstream reply received ({} bytes)", text.len());
        Ok(text)
    }
}

// ── Wire shapes ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "scan the market".to_string(),
                }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "scan the market");
        assert!(json["tools"][0]["google_search"].is_object());
    }

    #[test]
    fn test_response_text_extraction_shape() {
        let reply: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#,
        )
        .unwrap();
        let text: String = reply.candidates[0]
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        assert_eq!(text, "{\"a\":1}");
    }
}
