use chrono::Utc;
use serde_json::Value;

const RAW_DATA_LIMIT: usize = 500;
const DEFAULT_DESCRIPTION: &str = "Suspicious activity detected in AutoPot honeypot";
const DEFAULT_TITLE: &str = "AutoPot Security Alert";

/// Canonical incident record. Every required field carries a placeholder
/// default, so normalization is total over arbitrary JSON input.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRecord {
    pub title: String,
    pub severity: String,
    pub status: String,
    pub description: String,
    pub fired_time: String,
    pub workspace_id: Option<String>,
    pub incident_id: Option<String>,
    pub resource_group: Option<String>,
    pub subscription_id: Option<String>,
    pub raw_data: Option<String>,
}

/// Resolves the inbound payload against the three known webhook shapes in
/// order; anything else takes the generic fallback. Never fails.
pub fn normalize_incident(payload: &Value) -> IncidentRecord {
    if let Some(essentials) = payload.get("data").and_then(|data| data.get("essentials")) {
        return from_monitor_alert(essentials);
    }

    if payload.get("WorkspaceId").is_some() {
        return from_direct_incident(payload);
    }

    from_generic(payload)
}

// Common alert schema: fields nested under data.essentials.
fn from_monitor_alert(essentials: &Value) -> IncidentRecord {
    let nested = essentials.get("essentials");

    IncidentRecord {
        title: field_or(essentials, "alertRule", "Unknown Alert"),
        severity: field_or(essentials, "severity", "Unknown"),
        status: field_or(essentials, "monitorCondition", "Unknown"),
        description: field_or(essentials, "description", "No description available"),
        fired_time: field_string(essentials, "firedDateTime").unwrap_or_else(now_rfc3339),
        workspace_id: None,
        incident_id: None,
        resource_group: Some(nested_or_unknown(nested, "resourceGroupName")),
        subscription_id: Some(nested_or_unknown(nested, "subscriptionId")),
        raw_data: None,
    }
}

// Direct incident export: flat record keyed by WorkspaceId.
fn from_direct_incident(payload: &Value) -> IncidentRecord {
    IncidentRecord {
        title: field_or(payload, "DisplayName", DEFAULT_TITLE),
        severity: field_or(payload, "Severity", "Unknown"),
        status: field_or(payload, "Status", "New"),
        description: field_or(payload, "Description", DEFAULT_DESCRIPTION),
        fired_time: field_string(payload, "TimeGenerated").unwrap_or_else(now_rfc3339),
        workspace_id: Some(field_or(payload, "WorkspaceId", "")),
        incident_id: Some(field_or(payload, "IncidentNumber", "Unknown")),
        resource_group: None,
        subscription_id: None,
        raw_data: None,
    }
}

fn from_generic(payload: &Value) -> IncidentRecord {
    let title = field_string(payload, "title")
        .or_else(|| field_string(payload, "alertRule"))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    IncidentRecord {
        title,
        severity: field_or(payload, "severity", "Medium"),
        status: field_or(payload, "status", "New"),
        description: field_or(payload, "description", DEFAULT_DESCRIPTION),
        fired_time: field_string(payload, "timestamp").unwrap_or_else(now_rfc3339),
        workspace_id: None,
        incident_id: None,
        resource_group: None,
        subscription_id: None,
        raw_data: Some(truncate_chars(&pretty_payload(payload), RAW_DATA_LIMIT)),
    }
}

/// A field rendered as text: strings verbatim, other non-null values via
/// their JSON form. Missing and null both count as absent.
fn field_string(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn field_or(value: &Value, key: &str, default: &str) -> String {
    field_string(value, key).unwrap_or_else(|| default.to_string())
}

fn nested_or_unknown(nested: Option<&Value>, key: &str) -> String {
    nested
        .and_then(|value| field_string(value, key))
        .unwrap_or_else(|| "Unknown".to_string())
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

fn pretty_payload(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_default()
}

pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn monitor_alert_shape_is_detected_first() {
        let payload = json!({
            "data": {
                "essentials": {
                    "alertRule": "Honeypot sign-in burst",
                    "severity": "Sev1",
                    "monitorCondition": "Fired",
                    "description": "Multiple sign-ins against honey account",
                    "firedDateTime": "2026-08-06T09:15:00Z",
                    "essentials": {
                        "resourceGroupName": "rg-autopot",
                        "subscriptionId": "sub-42"
                    }
                }
            },
            "WorkspaceId": "should-not-win"
        });

        let record = normalize_incident(&payload);

        assert_eq!(record.title, "Honeypot sign-in burst");
        assert_eq!(record.severity, "Sev1");
        assert_eq!(record.status, "Fired");
        assert_eq!(record.fired_time, "2026-08-06T09:15:00Z");
        assert_eq!(record.resource_group.as_deref(), Some("rg-autopot"));
        assert_eq!(record.subscription_id.as_deref(), Some("sub-42"));
        assert_eq!(record.workspace_id, None);
        assert_eq!(record.raw_data, None);
    }

    #[test]
    fn monitor_alert_missing_nested_values_default_to_unknown() {
        let payload = json!({ "data": { "essentials": {} } });

        let record = normalize_incident(&payload);

        assert_eq!(record.title, "Unknown Alert");
        assert_eq!(record.severity, "Unknown");
        assert_eq!(record.status, "Unknown");
        assert_eq!(record.description, "No description available");
        assert_eq!(record.resource_group.as_deref(), Some("Unknown"));
        assert_eq!(record.subscription_id.as_deref(), Some("Unknown"));
    }

    #[test]
    fn direct_incident_shape_stringifies_incident_number() {
        let payload = json!({
            "WorkspaceId": "abc123def456ghi",
            "DisplayName": "Test",
            "Severity": "High",
            "IncidentNumber": 42
        });

        let record = normalize_incident(&payload);

        assert_eq!(record.title, "Test");
        assert_eq!(record.severity, "High");
        assert_eq!(record.status, "New");
        assert_eq!(record.workspace_id.as_deref(), Some("abc123def456ghi"));
        assert_eq!(record.incident_id.as_deref(), Some("42"));
    }

    #[test]
    fn direct_incident_defaults_fill_every_gap() {
        let payload = json!({ "WorkspaceId": "ws" });

        let record = normalize_incident(&payload);

        assert_eq!(record.title, "AutoPot Security Alert");
        assert_eq!(record.severity, "Unknown");
        assert_eq!(record.status, "New");
        assert_eq!(record.description, "Suspicious activity detected in AutoPot honeypot");
        assert_eq!(record.incident_id.as_deref(), Some("Unknown"));
        assert!(!record.fired_time.is_empty());
    }

    #[test]
    fn arbitrary_payload_takes_generic_fallback() {
        let payload = json!({ "something": "else", "severity": "weird" });

        let record = normalize_incident(&payload);

        assert_eq!(record.title, "AutoPot Security Alert");
        assert_eq!(record.severity, "weird");
        assert_eq!(record.status, "New");
        let raw = record.raw_data.expect("generic shape attaches raw data");
        assert!(raw.contains("something"));
    }

    #[test]
    fn generic_fallback_prefers_title_over_alert_rule() {
        let payload = json!({ "title": "T", "alertRule": "R" });
        assert_eq!(normalize_incident(&payload).title, "T");

        let payload = json!({ "alertRule": "R" });
        assert_eq!(normalize_incident(&payload).title, "R");
    }

    #[test]
    fn raw_data_is_bounded_at_five_hundred_chars() {
        let payload = json!({ "blob": "x".repeat(600) });

        let record = normalize_incident(&payload);

        assert_eq!(record.raw_data.expect("raw data").chars().count(), 500);
    }

    #[test]
    fn truncation_boundary_at_exactly_five_hundred() {
        let exact: String = "a".repeat(500);
        assert_eq!(truncate_chars(&exact, 500), exact);

        let over: String = "a".repeat(501);
        assert_eq!(truncate_chars(&over, 500).chars().count(), 500);
    }

    #[test]
    fn null_fields_count_as_absent() {
        let payload = json!({ "WorkspaceId": "ws", "Severity": null });

        let record = normalize_incident(&payload);

        assert_eq!(record.severity, "Unknown");
    }
}
