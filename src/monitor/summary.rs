use chrono::Utc;

use super::provider::QueryResultRow;
use super::queries::Severity;

const MAX_EVENTS: usize = 5;
const MAX_DETAIL_CELLS: usize = 5;

/// Bounded digest of one query's matches: at most [`MAX_EVENTS`] detailed
/// entries regardless of row count.
#[derive(Debug, Clone)]
pub struct EventSummary {
    pub event_type: String,
    pub severity: Severity,
    pub count: usize,
    pub timestamp: String,
    pub events: Vec<EventDetail>,
}

#[derive(Debug, Clone)]
pub struct EventDetail {
    pub timestamp: String,
    pub details: Vec<String>,
}

pub fn summarize_events(
    event_type: &str,
    severity: Severity,
    rows: &[QueryResultRow],
) -> EventSummary {
    let events = rows
        .iter()
        .take(MAX_EVENTS)
        .map(|row| EventDetail {
            timestamp: row
                .first()
                .map(render_cell)
                .unwrap_or_else(|| "Unknown".to_string()),
            details: row
                .iter()
                .skip(1)
                .take(MAX_DETAIL_CELLS)
                .map(render_cell)
                .collect(),
        })
        .collect();

    EventSummary {
        event_type: event_type.to_string(),
        severity,
        count: rows.len(),
        timestamp: Utc::now().to_rfc3339(),
        events,
    }
}

fn render_cell(cell: &serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(cells: &[serde_json::Value]) -> QueryResultRow {
        cells.to_vec()
    }

    #[test]
    fn summary_counts_all_rows_but_details_five() {
        let rows: Vec<QueryResultRow> = (0..9)
            .map(|i| row(&[json!(format!("2026-08-06T10:0{}:00Z", i)), json!("10.0.0.1")]))
            .collect();

        let summary = summarize_events("honey_user_activity", Severity::Critical, &rows);

        assert_eq!(summary.count, 9);
        assert_eq!(summary.events.len(), 5);
        assert_eq!(summary.events[0].timestamp, "2026-08-06T10:00:00Z");
        assert!(summary.timestamp.contains('T'));
    }

    #[test]
    fn detail_cells_are_capped_at_five() {
        let rows = vec![row(&[
            json!("2026-08-06T10:00:00Z"),
            json!("a"),
            json!("b"),
            json!("c"),
            json!("d"),
            json!("e"),
            json!("dropped"),
        ])];

        let summary = summarize_events("keyvault_access", Severity::Medium, &rows);

        assert_eq!(summary.events[0].details, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn non_string_cells_are_stringified() {
        let rows = vec![row(&[json!("2026-08-06T10:00:00Z"), json!(42), json!(true)])];

        let summary = summarize_events("web_portal_access", Severity::Medium, &rows);

        assert_eq!(summary.events[0].details, vec!["42", "true"]);
    }

    #[test]
    fn empty_row_gets_unknown_timestamp() {
        let rows = vec![QueryResultRow::new()];

        let summary = summarize_events("sql_access_attempts", Severity::High, &rows);

        assert_eq!(summary.events[0].timestamp, "Unknown");
        assert!(summary.events[0].details.is_empty());
    }
}
