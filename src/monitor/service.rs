use std::time::Duration;

use crate::alert::{event_message, ChatMessage};
use crate::config::Config;
use crate::notify::AlertDispatcher;

use super::{
    provider::LogsProvider,
    queries::{QueryDefinition, MONITORING_QUERIES},
    summary::summarize_events,
};

/// One sweep over the monitoring queries. Aborts silently when the
/// workspace id is not configured; a failing query never aborts the batch.
pub async fn run_security_sweep<P: LogsProvider>(
    config: &Config,
    dispatcher: &AlertDispatcher,
    provider: &mut P,
) {
    let Some(workspace_id) = config.workspace_id.as_deref() else {
        log::error!("sweep_aborted reason=workspace_id_not_configured");
        return;
    };

    let window = Duration::from_secs(config.monitor_interval);
    let alerts = collect_alerts(provider, workspace_id, &MONITORING_QUERIES, window).await;

    tracing::info!(
        target: "monitor",
        module = "monitor",
        queries = MONITORING_QUERIES.len(),
        alerts = alerts.len(),
        "sweep_evaluated"
    );

    if alerts.is_empty() {
        log::info!("security_sweep_completed alerts=0");
        return;
    }

    let Some(webhook_url) = config.webhook_url.as_deref() else {
        log::warn!(
            "sweep_alerts_dropped reason=webhook_url_not_configured count={}",
            alerts.len()
        );
        return;
    };

    for (event_type, message) in &alerts {
        match dispatcher.send(webhook_url, message).await {
            Ok(delivery) if delivery.is_success() => {
                log::info!("alert_sent event_type={}", event_type);
            }
            Ok(delivery) => {
                log::error!(
                    "alert_send_failed event_type={} status={} body={}",
                    event_type,
                    delivery.status,
                    delivery.body
                );
            }
            Err(error) => {
                log::error!("alert_send_failed event_type={} error={}", event_type, error);
            }
        }
    }

    log::info!("security_sweep_completed alerts={}", alerts.len());
}

/// Runs each query and builds at most one alert per query with matches.
/// Per-query failures are logged and skipped.
pub(super) async fn collect_alerts<P: LogsProvider>(
    provider: &mut P,
    workspace_id: &str,
    queries: &[QueryDefinition],
    window: Duration,
) -> Vec<(&'static str, ChatMessage)> {
    let mut alerts = Vec::new();

    for definition in queries {
        log::info!("query_executing name={}", definition.name);

        let rows = match provider
            .query_rows(workspace_id, definition.query, window)
            .await
        {
            Ok(rows) => rows,
            Err(error) => {
                log::error!("query_failed name={} error={}", definition.name, error);
                continue;
            }
        };

        if rows.is_empty() {
            log::info!("query_clean name={}", definition.name);
            continue;
        }

        log::info!("query_matched name={} rows={}", definition.name, rows.len());
        let summary = summarize_events(definition.name, definition.severity, &rows);
        alerts.push((definition.name, event_message(&summary)));
    }

    alerts
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use crate::monitor::provider::{MockLogsProvider, QueryError, QueryResultRow};
    use crate::monitor::queries::{QueryDefinition, Severity};

    use super::collect_alerts;

    const WINDOW: Duration = Duration::from_secs(300);

    fn definition(name: &'static str, severity: Severity) -> QueryDefinition {
        QueryDefinition {
            name,
            severity,
            query: "AuditLogs | take 1",
        }
    }

    fn sample_row(timestamp: &str) -> QueryResultRow {
        vec![json!(timestamp), json!("Activate role"), json!("10.0.0.1")]
    }

    #[tokio::test]
    async fn queries_without_rows_produce_no_alerts() {
        let mut provider = MockLogsProvider::new(vec![Ok(vec![]), Ok(vec![])]);
        let queries = [
            definition("honey_user_activity", Severity::Critical),
            definition("keyvault_access", Severity::Medium),
        ];

        let alerts = collect_alerts(&mut provider, "ws-1", &queries, WINDOW).await;

        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn failing_query_does_not_abort_the_batch() {
        let mut provider = MockLogsProvider::new(vec![
            Err(QueryError::Api {
                status: 503,
                body: "backend unavailable".to_string(),
            }),
            Ok(vec![sample_row("2026-08-06T10:00:00Z")]),
        ]);
        let queries = [
            definition("sql_access_attempts", Severity::High),
            definition("privilege_escalation", Severity::Critical),
        ];

        let alerts = collect_alerts(&mut provider, "ws-1", &queries, WINDOW).await;

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].0, "privilege_escalation");
    }

    #[tokio::test]
    async fn matching_query_yields_one_critical_alert() {
        let mut provider = MockLogsProvider::new(vec![Ok(vec![
            sample_row("2026-08-06T10:00:00Z"),
            sample_row("2026-08-06T10:01:00Z"),
        ])]);
        let queries = [definition("privilege_escalation", Severity::Critical)];

        let alerts = collect_alerts(&mut provider, "ws-1", &queries, WINDOW).await;

        assert_eq!(alerts.len(), 1);
        let message = &alerts[0].1;
        assert!(message.text.starts_with("🚨"));
        assert!(message.text.contains("Privilege Escalation Attempts"));

        let fields = &message.attachments[0].fields;
        let severity = fields
            .iter()
            .find(|field| field.title == "Severity")
            .expect("severity field");
        assert_eq!(severity.value, "CRITICAL");
        let count = fields
            .iter()
            .find(|field| field.title == "Event Count")
            .expect("count field");
        assert_eq!(count.value, "2");
    }
}
