//! Audit logging for account and document changes.
//!
//! Events are emitted on the `audit` tracing target so they can be routed
//! separately, e.g. `RUST_LOG=info,audit=info`.
//!
//! ```ignore
//! use axum_helpers::audit::{AuditEvent, AuditOutcome};
//!
//! AuditEvent::new(Some(claims.sub.clone()), "user.status_update", Some("user:EMP001".into()), AuditOutcome::Success)
//!     .with_request(&headers)
//!     .with_details(json!({"status": "accepted"}))
//!     .log();
//! ```

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    /// Rejected input, e.g. a duplicate registration
    Failure,
    /// Caller lacked the required role
    Denied,
}

/// Structured audit event. Build it, then call [`AuditEvent::log`].
#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// hrms_id of the caller; `None` for anonymous actions such as registration
    pub actor: Option<String>,
    /// Dotted action name, e.g. "user.register" or "document.save"
    pub action: String,
    /// Affected resource, e.g. "user:EMP001" or "document:HR-POL-7"
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        actor: Option<String>,
        action: impl Into<String>,
        resource: Option<String>,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            actor,
            action: action.into(),
            resource,
            outcome,
            ip_address: None,
            user_agent: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Shorthand for [`with_ip`](Self::with_ip) plus
    /// [`with_user_agent`](Self::with_user_agent) from request headers.
    pub fn with_request(self, headers: &HeaderMap) -> Self {
        self.with_ip(extract_ip_from_headers(headers))
            .with_user_agent(extract_user_agent(headers))
    }

    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Emit the event on the `audit` target.
    pub fn log(self) {
        tracing::info!(
            target: "audit",
            actor = self.actor.as_deref(),
            action = %self.action,
            resource = self.resource.as_deref(),
            outcome = ?self.outcome,
            ip = self.ip_address.as_deref(),
            user_agent = self.user_agent.as_deref(),
            details = ?self.details,
            "{}",
            serde_json::to_string(&self).unwrap_or_else(|_| "Failed to serialize audit event".to_string())
        );
    }
}

/// Client IP from `X-Forwarded-For` (first hop) or `X-Real-IP`.
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.trim().to_string())
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
    use axum::http::HeaderValue;
    use serde_json::json;

    #[test]
    fn test_extract_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(
            extract_ip_from_headers(&headers).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn test_extract_ip_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(extract_ip_from_headers(&headers).as_deref(), Some("10.0.0.2"));
        assert_eq!(extract_ip_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_event_builder_and_serialization() {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", HeaderValue::from_static("curl/8.5"));
        headers.insert("x-real-ip", HeaderValue::from_static("192.0.2.1"));

        let event = AuditEvent::new(
            Some("ADMIN".to_string()),
            "user.status_update",
            Some("user:EMP001".to_string()),
            AuditOutcome::Success,
        )
        .with_request(&headers)
        .with_details(json!({"status": "accepted"}));

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["actor"], "ADMIN");
        assert_eq!(value["outcome"], "success");
        assert_eq!(value["ip_address"], "192.0.2.1");
        assert_eq!(value["user_agent"], "curl/8.5");
        assert_eq!(value["details"]["status"], "accepted");
        assert!(value["timestamp"].is_i64());

        event.log();
    }
}
