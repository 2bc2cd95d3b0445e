/// Runtime configuration, read once at startup from the process
/// environment and passed explicitly to every component.
///
/// The two values the alerting paths depend on stay optional: a missing
/// workspace id or webhook URL degrades the affected path at invocation
/// time instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub workspace_id: Option<String>,
    pub webhook_url: Option<String>,
    pub api_token: Option<String>,
    pub monitor_interval: u64,
    pub listen_port: u16,
}
