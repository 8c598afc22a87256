//! Resilient client for the scout brief service.
//!
//! Wraps the HTTP boundary with a bounded retry loop so consumers ride
//! out transient conditions — the service still starting up (connection
//! refused) or a proxy answering with an HTML error page instead of
//! JSON. A *structured* error reply is different: the server processed
//! the request and said no, so it surfaces immediately without retry.
//!
//! # Example
//! ```rust,no_run
//! use scout_client::ResilientClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), scout_client::ClientError> {
//!     let client = ResilientClient::new("http://localhost:8787");
//!
//!     let record = client.generate_brief().await?;
//!     let history = client.history().await?;
//!
//!     println!("Brief {} generated; {} in history", record.id, history.len());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use scout_core::{Battlecard, BriefRecord, Item, Opportunity, ResearchReport};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Fixed attempt budget. No exponential growth — the conditions being
/// masked (service booting, proxy hiccup) clear in roughly constant time.
const ATTEMPTS: u32 = 3;

/// Fixed delay between attempts.
const BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server processed the request and returned a structured
    /// error. Not retried; carries the server-supplied message.
    #[error("Server error: {message}")]
    Server { message: String },

    /// The attempt budget ran out. Carries the last-seen error; this is
    /// the one failure consumers should render as "try again".
    #[error("Request failed after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },

    /// The body parsed as JSON but not into the expected document shape.
    #[error("Unexpected response shape: {0}")]
    Shape(String),
}

/// HTTP method for a boundary call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Options for one boundary call.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::Get,
            body: None,
        }
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::Post,
            body: Some(body),
        }
    }
}

/// Raw transport reply: status plus unparsed body.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

/// Seam under the retry loop, so tests can script transport behavior
/// without a live server.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> std::result::Result<TransportReply, String>;
}

/// Production transport over reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> std::result::Result<TransportReply, String> {
        let url = format!("{}{}", self.base_url, path);
        let request = match options.method {
            Method::Get => self.client.get(&url),
            Method::Post => {
                let builder = self.client.post(&url);
                match &options.body {
                    Some(body) => builder.json(body),
                    None => builder,
                }
            }
        };

        let response = request.send().await.map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok(TransportReply { status, body })
    }
}

/// A client that retries transient failures with fixed backoff.
pub struct ResilientClient {
    transport: Arc<dyn Transport>,
    attempts: u32,
    backoff: Duration,
}

impl ResilientClient {
    /// Client against a service base URL, e.g. `"http://localhost:8787"`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new(base_url)))
    }

    /// Client over a custom transport. Used by tests.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            attempts: ATTEMPTS,
            backoff: BACKOFF,
        }
    }

    /// Override the fixed backoff. Tests set this to zero.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Issue one boundary call with the retry policy applied.
    ///
    /// Retried: transport errors, and replies whose body is not JSON
    /// (an HTML error page from a proxy, say). Not retried: a parsed
    /// body carrying `{"error": ...}` — that is the server's answer.
    /// An explicit bounded loop, never recursion.
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ClientError> {
        let mut last_error = String::new();

        for attempt in 1..=self.attempts {
            match self.transport.send(path, &options).await {
                Err(e) => {
                    warn!("Attempt {}/{} for {} failed: {}", attempt, self.attempts, path, e);
                    last_error = e;
                }
                Ok(reply) => match serde_json::from_str::<Value>(&reply.body) {
                    Ok(value) => {
                        if let Some(message) = value.get("error").and_then(Value::as_str) {
                            let details = value
                                .get("details")
                                .and_then(Value::as_str)
                                .map(|d| format!("{}: {}", message, d));
                            return Err(ClientError::Server {
                                message: details.unwrap_or_else(|| message.to_string()),
                            });
                        }
                        debug!("{} succeeded on attempt {}", path, attempt);
                        return Ok(value);
                    }
                    Err(_) => {
                        warn!(
                            "Attempt {}/{} for {}: non-JSON body (status {})",
                            attempt, self.attempts, path, reply.status
                        );
                        last_error = format!("non-JSON body with status {}", reply.status);
                    }
                },
            }

            if attempt < self.attempts {
                tokio::time::sleep(self.backoff).await;
            }
        }

        Err(ClientError::Exhausted {
            attempts: self.attempts,
            last_error,
        })
    }

    /// Fetch the most recent brief record.
    pub async fn latest_brief(&self) -> Result<BriefRecord, ClientError> {
        let value = self.request("/api/brief/latest", RequestOptions::get()).await?;
        parse(value)
    }

    /// Fetch the full brief history, most recent first.
    pub async fn history(&self) -> Result<Vec<BriefRecord>, ClientError> {
        let value = self
            .request("/api/brief/history", RequestOptions::get())
            .await?;
        parse(value)
    }

    /// Trigger a new generation cycle. Note: this is a write — if a
    /// retry fires after the server already persisted, history gains a
    /// duplicate entry. Accepted trade-off; writes carry no natural
    /// idempotency key.
    pub async fn generate_brief(&self) -> Result<BriefRecord, ClientError> {
        let value = self
            .request(
                "/api/brief/generate",
                RequestOptions::post(Value::Object(Default::default())),
            )
            .await?;
        parse(value)
    }

    /// Build a battlecard from one brief item.
    pub async fn analyze(&self, item: &Item) -> Result<Battlecard, ClientError> {
        let body = serde_json::to_value(item).map_err(|e| ClientError::Shape(e.to_string()))?;
        let value = self.request("/api/analyze", RequestOptions::post(body)).await?;
        parse(value)
    }

    /// Research one opportunity in depth.
    pub async fn research(&self, opportunity: &Opportunity) -> Result<ResearchReport, ClientError> {
        let body =
            serde_json::to_value(opportunity).map_err(|e| ClientError::Shape(e.to_string()))?;
        let value = self.request("/api/research", RequestOptions::post(body)).await?;
        parse(value)
    }
}

fn parse<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Shape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted transport: pops one outcome per attempt and counts calls.
    struct ScriptedTransport {
        script: Mutex<Vec<std::result::Result<TransportReply, String>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<std::result::Result<TransportReply, String>>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(
            &self,
            _path: &str,
            _options: &RequestOptions,
        ) -> std::result::Result<TransportReply, String> {
            *self.calls.lock().unwrap() += 1;
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                return Err("script exhausted".to_string());
            }
            script.remove(0)
        }
    }

    fn html_reply() -> std::result::Result<TransportReply, String> {
        Ok(TransportReply {
            status: 502,
            body: "<html>Bad Gateway</html>".to_string(),
        })
    }

    fn json_reply(body: &str) -> std::result::Result<TransportReply, String> {
        Ok(TransportReply {
            status: 200,
            body: body.to_string(),
        })
    }

    fn client(transport: Arc<ScriptedTransport>) -> ResilientClient {
        ResilientClient::with_transport(transport).with_backoff(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_two_non_json_bodies_then_success() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            html_reply(),
            html_reply(),
            json_reply(r#"{"ok":true}"#),
        ]));
        let client = client(transport.clone());

        let value = client.request("/api/brief/latest", RequestOptions::get()).await.unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_transport_errors_are_retried() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err("connection refused".to_string()),
            json_reply(r#"{"ok":true}"#),
        ]));
        let client = client(transport.clone());

        client.request("/", RequestOptions::get()).await.unwrap();
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_structured_error_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::new(vec![json_reply(
            r#"{"error":"generation failed","details":"upstream timed out"}"#,
        )]));
        let client = client(transport.clone());

        let err = client.request("/api/brief/generate", RequestOptions::get()).await.unwrap_err();
        match err {
            ClientError::Server { message } => {
                assert!(message.contains("generation failed"));
                assert!(message.contains("upstream timed out"));
            }
            other => panic!("expected Server error, got {:?}", other),
        }
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_budget_exhaustion_carries_last_error() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err("connection refused".to_string()),
            Err("connection refused".to_string()),
            html_reply(),
        ]));
        let client = client(transport.clone());

        let err = client.request("/", RequestOptions::get()).await.unwrap_err();
        match err {
            ClientError::Exhausted { attempts, last_error } => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("502"));
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_typed_accessor_parses_record() {
        let transport = Arc::new(ScriptedTransport::new(vec![json_reply(
            r#"{"id":4,"date":"2026-08-30","content":"{}","created_at":"2026-08-30T09:00:00Z"}"#,
        )]));
        let client = client(transport);

        let record = client.latest_brief().await.unwrap();
        assert_eq!(record.id, 4);
        assert_eq!(record.date, "2026-08-30");
    }
}
