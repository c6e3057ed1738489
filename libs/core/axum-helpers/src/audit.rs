//! Structured audit events for entity mutations.
//!
//! Events go to the `audit` tracing target so the subscriber can route them
//! separately from application logs. Successes log at `info`, failures at
//! `warn`.
//!
//! ```ignore
//! use axum_helpers::audit::{AuditAction, AuditEvent, AuditOutcome};
//!
//! AuditEvent::entity("process", AuditAction::Delete, Some(7), AuditOutcome::Success)
//!     .with_request_headers(&headers)
//!     .log();
//! ```

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    /// Rejected input or failed write
    Failure,
}

#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// Dotted action name, e.g. `process.delete`
    pub action: String,
    /// Affected resource, e.g. `process:7`
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: impl Into<String>, resource: Option<String>, outcome: AuditOutcome) -> Self {
        Self {
            action: action.into(),
            resource,
            outcome,
            ip_address: None,
            user_agent: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    /// `<entity>.<action>` on `<entity>:<id>`; no resource when the id is unknown.
    pub fn entity(entity_name: &str, action: AuditAction, id: Option<i64>, outcome: AuditOutcome) -> Self {
        Self::new(
            format!("{entity_name}.{action}"),
            id.map(|id| format!("{entity_name}:{id}")),
            outcome,
        )
    }

    /// Attach serializable details; values that fail to serialize are dropped.
    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Attach client IP and user agent taken from request headers.
    pub fn with_request_headers(mut self, headers: &HeaderMap) -> Self {
        self.ip_address = extract_ip_from_headers(headers);
        self.user_agent = extract_user_agent(headers);
        self
    }

    pub fn log(self) {
        let details = self.details.as_ref().map(|d| d.to_string());
        match self.outcome {
            AuditOutcome::Success => tracing::info!(
                target: "audit",
                action = %self.action,
                resource = self.resource,
                outcome = %self.outcome,
                ip = self.ip_address,
                user_agent = self.user_agent,
                timestamp = self.timestamp.timestamp(),
                details,
                "audit event"
            ),
            AuditOutcome::Failure => tracing::warn!(
                target: "audit",
                action = %self.action,
                resource = self.resource,
                outcome = %self.outcome,
                ip = self.ip_address,
                user_agent = self.user_agent,
                timestamp = self.timestamp.timestamp(),
                details,
                "audit event"
            ),
        }
    }
}

/// First `X-Forwarded-For` hop, falling back to `X-Real-IP`.
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
}

pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "10.0.0.1, 10.0.0.2".parse().unwrap());
        headers.insert("x-real-ip", "10.0.0.9".parse().unwrap());

        assert_eq!(extract_ip_from_headers(&headers).as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "10.0.0.9".parse().unwrap());

        assert_eq!(extract_ip_from_headers(&headers).as_deref(), Some("10.0.0.9"));
        assert_eq!(extract_ip_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_event_serializes_outcome_lowercase() {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", "curl/8.0".parse().unwrap());

        let event = AuditEvent::entity("process", AuditAction::Delete, Some(3), AuditOutcome::Success)
            .with_request_headers(&headers)
            .with_details(serde_json::json!({ "existed": true }));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["action"], "process.delete");
        assert_eq!(json["resource"], "process:3");
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["user_agent"], "curl/8.0");
        assert_eq!(json["details"]["existed"], true);
        assert!(json["timestamp"].is_i64());
    }

    #[test]
    fn test_entity_event_without_id_has_no_resource() {
        let event = AuditEvent::entity("process", AuditAction::Create, None, AuditOutcome::Failure);

        assert_eq!(event.action, "process.create");
        assert!(event.resource.is_none());
    }
}
