//! Core data models for the savings advisor client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

//
// ================= Form Options =================
//

/// Currency codes accepted by the analysis service.
pub const CURRENCIES: &[&str] = &["MAD", "USD", "INR"];

pub const OCCUPATIONS: &[&str] = &["Professional", "Self_Employed", "Retired", "Student"];

pub const CITY_TIERS: &[&str] = &["Tier_1", "Tier_2", "Tier_3"];

//
// ================= Profile =================
//

/// Immutable financial profile snapshot, submitted as the `/predict/` body.
///
/// Field names match the wire contract exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub currency: String,
    pub age: f64,
    pub income: f64,
    pub occupation: String,
    pub city_tier: String,
    pub desired_savings_pct: f64,
    pub groceries: f64,
    pub transport: f64,
    pub eating_out: f64,
    pub entertainment: f64,
    pub utilities: f64,
    pub misc: f64,
}

//
// ================= Analysis Result =================
//

fn new_result_id() -> Uuid {
    Uuid::new_v4()
}

/// Server-computed financial summary tied to one Profile snapshot.
///
/// Immutable once received. `result_id` is assigned locally on receipt and
/// never sent over the wire; it is the identity the chat session uses to
/// recognize stale turns after the result has been replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(skip, default = "new_result_id")]
    pub result_id: Uuid,
    pub currency: String,
    pub total_saved: f64,
    /// Saved minus the user's target, signed. Older backends omit it.
    #[serde(default)]
    pub goal_diff: Option<f64>,
    pub efficiency: f64,
    pub top_cat: String,
    /// AI-generated narrative. Opaque formatted text; may carry lightweight
    /// markup which only the render layer interprets.
    pub ai_insight: String,
    pub chart_data: Vec<f64>,
    pub chart_labels: Vec<String>,
}

//
// ================= Chat =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageRole::User => "You",
            MessageRole::Assistant => "Advisor",
        };
        write!(f, "{}", s)
    }
}

/// A single message in the chat history. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, text: String) -> Self {
        Self {
            role,
            text,
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text.into())
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_wire_field_names() {
        let profile = Profile {
            currency: "MAD".to_string(),
            age: 30.0,
            income: 15000.0,
            occupation: "Professional".to_string(),
            city_tier: "Tier_1".to_string(),
            desired_savings_pct: 20.0,
            groceries: 3000.0,
            transport: 1000.0,
            eating_out: 1500.0,
            entertainment: 800.0,
            utilities: 1200.0,
            misc: 1000.0,
        };

        let value = serde_json::to_value(&profile).unwrap();
        for key in [
            "currency",
            "age",
            "income",
            "occupation",
            "city_tier",
            "desired_savings_pct",
            "groceries",
            "transport",
            "eating_out",
            "entertainment",
            "utilities",
            "misc",
        ] {
            assert!(value.get(key).is_some(), "missing wire field {}", key);
        }
    }

    #[test]
    fn test_analysis_result_deserializes_without_goal_diff() {
        let body = serde_json::json!({
            "currency": "MAD",
            "total_saved": 2000.0,
            "efficiency": 13.0,
            "top_cat": "Eating Out",
            "ai_insight": "You overspend on dining.",
            "chart_data": [1.0, 2.0],
            "chart_labels": ["Groceries", "Transport"],
        });

        let result: AnalysisResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.goal_diff, None);
        assert_eq!(result.top_cat, "Eating Out");
    }

    #[test]
    fn test_each_received_result_gets_fresh_identity() {
        let body = serde_json::json!({
            "currency": "USD",
            "total_saved": 100.0,
            "efficiency": 5.0,
            "top_cat": "Misc",
            "ai_insight": "ok",
            "chart_data": [],
            "chart_labels": [],
        });

        let a: AnalysisResult = serde_json::from_value(body.clone()).unwrap();
        let b: AnalysisResult = serde_json::from_value(body).unwrap();
        assert_ne!(a.result_id, b.result_id);
        // Clones of one result keep its identity.
        assert_eq!(a.clone().result_id, a.result_id);
    }

    #[test]
    fn test_result_id_never_serialized() {
        let body = serde_json::json!({
            "currency": "USD",
            "total_saved": 100.0,
            "efficiency": 5.0,
            "top_cat": "Misc",
            "ai_insight": "ok",
            "chart_data": [],
            "chart_labels": [],
        });
        let result: AnalysisResult = serde_json::from_value(body).unwrap();
        let out = serde_json::to_value(&result).unwrap();
        assert!(out.get("result_id").is_none());
    }
}
