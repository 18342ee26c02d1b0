//! Activity auditing for catalog mutations and notable reads.
//!
//! Provides [`AuditContext`] (inserted by the audit middleware into request
//! extensions) and [`audit_event`], which emits a structured log entry with
//! `target: "audit"` and appends the same event to the activity log file.
//! Operators can filter/route audit events via `RUST_LOG=audit=info`.

use herbdb_core::storage::ActivityLog;
use serde_json::{Map, Value};

/// Request context for audit logging.
#[derive(Clone, Debug)]
pub struct AuditContext {
    /// Client IP from `X-Forwarded-For` / `X-Real-IP` headers, or "-".
    pub client_ip: String,
}

impl Default for AuditContext {
    fn default() -> Self {
        Self {
            client_ip: "-".to_string(),
        }
    }
}

/// Extract client IP from request headers (X-Forwarded-For → X-Real-IP → "-").
pub fn extract_client_ip(req: &axum::http::Request<axum::body::Body>) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(',').next().unwrap_or("-").trim().to_string())
        .or_else(|| {
            req.headers()
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Record an activity: one `audit` tracing event plus one activity-log entry.
///
/// The request has already succeeded by the time this runs, so a failed log
/// append is reported but not returned.
pub fn audit_event(
    log: &ActivityLog,
    ctx: Option<&AuditContext>,
    action: &str,
    user: Option<&str>,
    details: Map<String, Value>,
) {
    let client_ip = ctx.map(|c| c.client_ip.as_str()).unwrap_or("-");
    tracing::info!(
        target: "audit",
        client_ip = %client_ip,
        action = %action,
        user = user.unwrap_or("-"),
        details = %serde_json::Value::Object(details.clone()),
        "audit"
    );
    if let Err(e) = log.append(action, user, details) {
        tracing::warn!(action = %action, error = %e, "Failed to append activity log entry");
    }
}

/// Build a details map from `(key, value)` pairs.
pub fn details<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use herbdb_core::storage::ReadPolicy;
    use serde_json::json;

    #[test]
    fn test_extract_ip_x_forwarded_for_chain() {
        // First IP in the chain is the original client
        let req = axum::http::Request::builder()
            .header("x-forwarded-for", "10.0.0.1, 172.16.0.1, 192.168.1.1")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(extract_client_ip(&req), "10.0.0.1");
    }

    #[test]
    fn test_extract_ip_x_real_ip_fallback() {
        let req = axum::http::Request::builder()
            .header("x-real-ip", "172.16.0.5")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(extract_client_ip(&req), "172.16.0.5");
    }

    #[test]
    fn test_extract_ip_no_headers_returns_dash() {
        let req = axum::http::Request::builder()
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(extract_client_ip(&req), "-");
    }

    #[test]
    fn test_details_builder() {
        let map = details([("plant_id", json!("4")), ("count", json!(2))]);
        assert_eq!(map.len(), 2);
        assert_eq!(map["plant_id"], "4");
    }

    #[test]
    fn test_audit_event_appends_to_log() {
        let tmp = tempfile::TempDir::new().unwrap();
        let log = ActivityLog::new(tmp.path().join("logs.json"), ReadPolicy::FailOpen);
        let ctx = AuditContext {
            client_ip: "127.0.0.1".into(),
        };
        audit_event(
            &log,
            Some(&ctx),
            "delete_plant",
            None,
            details([("plant_id", json!("3"))]),
        );
        let entries = log.list(None).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "delete_plant");
        assert_eq!(entries[0].details["plant_id"], "3");
    }

    #[test]
    fn test_audit_event_survives_unwritable_log() {
        let tmp = tempfile::TempDir::new().unwrap();
        // A directory where the log file should be makes every write fail.
        let path = tmp.path().join("logs.json");
        std::fs::create_dir(&path).unwrap();
        let log = ActivityLog::new(path, ReadPolicy::FailOpen);
        audit_event(&log, None, "search", None, Map::new());
    }
}
