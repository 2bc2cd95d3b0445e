mod provider;
mod queries;
mod service;
mod summary;

pub use provider::{HttpLogsProvider, LogsProvider, QueryError, QueryResultRow};
pub use queries::{QueryDefinition, Severity, MONITORING_QUERIES};
pub use service::run_security_sweep;
pub use summary::{summarize_events, EventDetail, EventSummary};
