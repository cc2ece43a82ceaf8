//! HTTP gateway to the analysis service
//!
//! Thin wrapper issuing the two request types (analyze, chat-turn) and
//! normalizing every outcome to success or a single human-readable failure.
//! Uses a long-lived reqwest::Client for connection pooling. Single-shot,
//! non-retrying; each call resolves exactly once.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::models::{AnalysisResult, Profile};
use crate::Result;

/// Seam between the sessions and the network. Test doubles script outcomes
/// by implementing this trait.
#[async_trait]
pub trait AdvisorGateway: Send + Sync {
    /// Submit a profile snapshot for analysis.
    async fn analyze(&self, profile: &Profile) -> Result<AnalysisResult>;

    /// Submit one chat turn scoped to an analysis result.
    async fn chat(&self, message: &str, context: &AnalysisResult) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatTurnRequest<'a> {
    message: &'a str,
    context: &'a AnalysisResult,
}

/// Reusable HTTP gateway (connection-pooled)
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AdvisorError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<String> {
        let url = format!("{}/{}/", self.base_url, path);

        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            AdvisorError::Transport(format!("Could not reach the analysis service: {}", e))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("Failed reading response body from {}: {}", url, e);
            AdvisorError::Transport(format!("Connection dropped mid-response: {}", e))
        })?;

        // An explicit error field in the body wins over the HTTP status, so
        // inspect the body even for non-2xx replies before reporting the
        // status itself.
        if !status.is_success() {
            if let Some(message) = error_field(&text) {
                return Err(AdvisorError::Application(message));
            }
            error!("Analysis service returned {} for {}", status, url);
            return Err(AdvisorError::Protocol(format!(
                "Analysis service returned {}",
                status
            )));
        }

        Ok(text)
    }
}

#[async_trait]
impl AdvisorGateway for HttpGateway {
    async fn analyze(&self, profile: &Profile) -> Result<AnalysisResult> {
        info!("Submitting profile for analysis");
        let body = self.post_json("predict", profile).await?;
        let result = parse_analysis_body(&body)?;
        info!(
            total_saved = result.total_saved,
            top_cat = %result.top_cat,
            "Analysis result received"
        );
        Ok(result)
    }

    async fn chat(&self, message: &str, context: &AnalysisResult) -> Result<String> {
        info!("Sending chat turn");
        let request = ChatTurnRequest { message, context };
        let body = self.post_json("chat", &request).await?;
        parse_chat_body(&body)
    }
}

/// Extract an explicit `error` field from a response body, if any.
fn error_field(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Normalize a `/predict/` body: malformed JSON is a protocol failure, an
/// `error` field or missing expected fields are application failures.
fn parse_analysis_body(body: &str) -> Result<AnalysisResult> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AdvisorError::Protocol(format!("Malformed analysis response: {}", e)))?;

    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(AdvisorError::Application(message.to_string()));
    }

    let result: AnalysisResult = serde_json::from_value(value).map_err(|e| {
        AdvisorError::Application(format!("Analysis response missing expected fields: {}", e))
    })?;

    if result.chart_data.len() != result.chart_labels.len() {
        return Err(AdvisorError::Application(format!(
            "Chart series mismatch: {} values vs {} labels",
            result.chart_data.len(),
            result.chart_labels.len()
        )));
    }

    Ok(result)
}

/// Normalize a `/chat/` body: the reply lives in `response`; its absence is
/// a failure, never an empty bubble.
fn parse_chat_body(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AdvisorError::Protocol(format!("Malformed chat response: {}", e)))?;

    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(AdvisorError::Application(message.to_string()));
    }

    value
        .get("response")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AdvisorError::Application("Empty reply from the advisor".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AnalysisResult {
        serde_json::from_value(serde_json::json!({
            "currency": "MAD",
            "total_saved": 2000.0,
            "efficiency": 13.0,
            "top_cat": "Eating Out",
            "ai_insight": "You overspend on dining.",
            "chart_data": [500.0, 1500.0],
            "chart_labels": ["Groceries", "Eating Out"],
        }))
        .unwrap()
    }

    #[test]
    fn test_chat_request_serialization() {
        let context = sample_result();
        let request = ChatTurnRequest {
            message: "How do I save more?",
            context: &context,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("How do I save more?"));
        assert!(json.contains("\"context\""));
        assert!(json.contains("Eating Out"));
    }

    #[test]
    fn test_parse_analysis_success() {
        let body = serde_json::json!({
            "currency": "MAD",
            "total_saved": 2000.0,
            "goal_diff": -1000.0,
            "efficiency": 13.0,
            "top_cat": "Eating Out",
            "ai_insight": "You overspend on dining.",
            "chart_data": [500.0, 1500.0],
            "chart_labels": ["Groceries", "Eating Out"],
        })
        .to_string();

        let result = parse_analysis_body(&body).unwrap();
        assert_eq!(result.total_saved, 2000.0);
        assert_eq!(result.goal_diff, Some(-1000.0));
    }

    #[test]
    fn test_error_field_forces_failure() {
        let body = serde_json::json!({
            "error": "model unavailable",
            "currency": "MAD",
        })
        .to_string();

        let err = parse_analysis_body(&body).unwrap_err();
        assert!(matches!(err, AdvisorError::Application(_)));
        assert!(err.to_string().contains("model unavailable"));
    }

    #[test]
    fn test_malformed_body_is_protocol_failure() {
        let err = parse_analysis_body("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, AdvisorError::Protocol(_)));
    }

    #[test]
    fn test_missing_fields_is_application_failure() {
        let body = serde_json::json!({ "currency": "MAD" }).to_string();
        let err = parse_analysis_body(&body).unwrap_err();
        assert!(matches!(err, AdvisorError::Application(_)));
    }

    #[test]
    fn test_chart_series_length_mismatch_rejected() {
        let body = serde_json::json!({
            "currency": "MAD",
            "total_saved": 2000.0,
            "efficiency": 13.0,
            "top_cat": "Eating Out",
            "ai_insight": "ok",
            "chart_data": [1.0, 2.0, 3.0],
            "chart_labels": ["a", "b"],
        })
        .to_string();

        let err = parse_analysis_body(&body).unwrap_err();
        assert!(matches!(err, AdvisorError::Application(_)));
    }

    #[test]
    fn test_parse_chat_success_and_missing_response() {
        let ok = serde_json::json!({ "response": "Cut dining out." }).to_string();
        assert_eq!(parse_chat_body(&ok).unwrap(), "Cut dining out.");

        let missing = serde_json::json!({ "status": "ok" }).to_string();
        assert!(matches!(
            parse_chat_body(&missing).unwrap_err(),
            AdvisorError::Application(_)
        ));
    }
}
