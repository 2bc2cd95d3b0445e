use chrono::{DateTime, NaiveDateTime, Utc};

use crate::incident::IncidentRecord;
use crate::monitor::{EventDetail, EventSummary};

use super::message::{Attachment, ChatMessage, Field};

const EVENT_FOOTER: &str = "AutoPot Security Monitor";
const INCIDENT_FOOTER: &str = "AutoPot Honeypot Monitoring";

// Free-text section shows fewer entries than the summary carries.
const MAX_EVENTS_SHOWN: usize = 3;
const MAX_CELLS_SHOWN: usize = 3;

const WORKSPACE_ID_SHOWN: usize = 8;

pub fn severity_color(severity: &str) -> &'static str {
    match severity.to_ascii_uppercase().as_str() {
        "CRITICAL" => "#FF0000",
        "HIGH" => "#FF6600",
        "MEDIUM" => "#FFCC00",
        "LOW" => "#00FF00",
        "INFORMATIONAL" => "#0099FF",
        _ => "#808080",
    }
}

pub fn severity_emoji(severity: &str) -> &'static str {
    match severity.to_ascii_uppercase().as_str() {
        "CRITICAL" => "🚨",
        "HIGH" => "⚠️",
        "MEDIUM" => "⚡",
        "LOW" => "ℹ️",
        "INFORMATIONAL" => "📊",
        _ => "🔔",
    }
}

/// Builds the notification for a batch of query matches.
pub fn event_message(summary: &EventSummary) -> ChatMessage {
    let severity = summary.severity.as_str();
    let display_name = display_event_type(&summary.event_type);
    let now = Utc::now();

    let mut fields = vec![
        Field::short("Event Type", display_name.clone()),
        Field::short("Severity", severity),
        Field::short("Event Count", summary.count.to_string()),
        Field::short("Detection Time", now.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
    ];

    if !summary.events.is_empty() {
        fields.push(Field::long("Recent Events", recent_events_text(&summary.events)));
    }

    ChatMessage {
        text: format!(
            "{} AutoPot Security Alert: {}",
            severity_emoji(severity),
            display_name
        ),
        attachments: vec![Attachment {
            color: severity_color(severity).to_string(),
            fields,
            footer: EVENT_FOOTER.to_string(),
            ts: now.timestamp(),
        }],
    }
}

/// Builds the notification for a normalized incident.
pub fn incident_message(record: &IncidentRecord) -> ChatMessage {
    let severity = record.severity.to_uppercase();
    let now = Utc::now();

    let mut fields = vec![
        Field::long("Alert Title", record.title.clone()),
        Field::short("Severity", severity.clone()),
        Field::short("Status", record.status.clone()),
        Field::short("Time Detected", format_fired_time(&record.fired_time)),
        Field::long("Description", record.description.clone()),
    ];

    if let Some(workspace_id) = &record.workspace_id {
        let shown: String = workspace_id.chars().take(WORKSPACE_ID_SHOWN).collect();
        fields.push(Field::short("Workspace ID", format!("{}...", shown)));
    }

    if let Some(incident_id) = &record.incident_id {
        fields.push(Field::short("Incident ID", incident_id.clone()));
    }

    ChatMessage {
        text: format!(
            "{} AutoPot Security Alert - {} Severity",
            severity_emoji(&severity),
            severity
        ),
        attachments: vec![Attachment {
            color: severity_color(&severity).to_string(),
            fields,
            footer: INCIDENT_FOOTER.to_string(),
            ts: now.timestamp(),
        }],
    }
}

fn display_event_type(name: &str) -> String {
    match name {
        "honey_user_activity" => "Honey User Sign-in Activity".to_string(),
        "sql_access_attempts" => "SQL Server Access Attempts".to_string(),
        "keyvault_access" => "Key Vault Access".to_string(),
        "web_portal_access" => "Web Portal Suspicious Activity".to_string(),
        "privilege_escalation" => "Privilege Escalation Attempts".to_string(),
        other => humanize(other),
    }
}

fn humanize(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn recent_events_text(events: &[EventDetail]) -> String {
    let mut text = String::new();

    for (index, event) in events.iter().take(MAX_EVENTS_SHOWN).enumerate() {
        text.push_str(&format!("Event {}: {}\n", index + 1, event.timestamp));
        let cells: Vec<&str> = event
            .details
            .iter()
            .take(MAX_CELLS_SHOWN)
            .map(String::as_str)
            .collect();
        text.push_str(&format!("Details: {}\n\n", cells.join(", ")));
    }

    if events.len() > MAX_EVENTS_SHOWN {
        text.push_str(&format!(
            "... and {} more events",
            events.len() - MAX_EVENTS_SHOWN
        ));
    }

    text.trim().to_string()
}

/// Renders the fired time for display. Tolerates a trailing `Z` UTC
/// designator and offset-less timestamps; anything unparseable degrades to
/// the literal "Unknown".
fn format_fired_time(fired_time: &str) -> String {
    let normalized = match fired_time.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => fired_time.to_string(),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return parsed
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string();
    }

    match NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => naive.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        Err(_) => "Unknown".to_string(),
    }
}
