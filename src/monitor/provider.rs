use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// One result row: heterogeneous cells, first cell conventionally the
/// record timestamp. Columns vary per query; no schema is enforced.
pub type QueryResultRow = Vec<serde_json::Value>;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("query API returned {status}: {body}")]
    Api { status: u16, body: String },
}

pub trait LogsProvider {
    async fn query_rows(
        &mut self,
        workspace_id: &str,
        query: &str,
        window: Duration,
    ) -> Result<Vec<QueryResultRow>, QueryError>;
}

const QUERY_API_BASE: &str = "https://api.loganalytics.io/v1";

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    tables: Vec<QueryTable>,
}

#[derive(Deserialize)]
struct QueryTable {
    #[serde(default)]
    rows: Vec<QueryResultRow>,
}

/// Queries the Log Analytics REST API. The client carries no explicit
/// timeout; the query backend enforces its own limits.
pub struct HttpLogsProvider {
    client: reqwest::Client,
    api_token: Option<String>,
}

impl HttpLogsProvider {
    pub fn new(api_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_token,
        }
    }
}

impl LogsProvider for HttpLogsProvider {
    async fn query_rows(
        &mut self,
        workspace_id: &str,
        query: &str,
        window: Duration,
    ) -> Result<Vec<QueryResultRow>, QueryError> {
        let url = format!("{}/workspaces/{}/query", QUERY_API_BASE, workspace_id);
        let body = serde_json::json!({
            "query": query,
            "timespan": format!("PT{}S", window.as_secs()),
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable>".to_string());
            return Err(QueryError::Api { status, body });
        }

        let parsed: QueryResponse = response.json().await?;
        Ok(parsed
            .tables
            .into_iter()
            .next()
            .map(|table| table.rows)
            .unwrap_or_default())
    }
}

#[cfg(test)]
pub(crate) struct MockLogsProvider {
    responses: Vec<Result<Vec<QueryResultRow>, QueryError>>,
}

#[cfg(test)]
impl MockLogsProvider {
    pub(crate) fn new(responses: Vec<Result<Vec<QueryResultRow>, QueryError>>) -> Self {
        Self { responses }
    }
}

#[cfg(test)]
impl LogsProvider for MockLogsProvider {
    async fn query_rows(
        &mut self,
        _workspace_id: &str,
        _query: &str,
        _window: Duration,
    ) -> Result<Vec<QueryResultRow>, QueryError> {
        if self.responses.is_empty() {
            return Err(QueryError::Api {
                status: 0,
                body: "mock responses exhausted".to_string(),
            });
        }

        self.responses.remove(0)
    }
}
