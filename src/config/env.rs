use super::defaults::{default_listen_port, default_monitor_interval};
use super::schema::Config;
use super::validate::ConfigError;

pub const WORKSPACE_ID_VAR: &str = "LOG_ANALYTICS_WORKSPACE_ID";
pub const WEBHOOK_URL_VAR: &str = "SLACK_WEBHOOK_URL";
pub const API_TOKEN_VAR: &str = "LOG_ANALYTICS_API_TOKEN";
pub const MONITOR_INTERVAL_VAR: &str = "MONITOR_INTERVAL_SECS";
pub const LISTEN_PORT_VAR: &str = "LISTEN_PORT";

pub fn load_config() -> Result<Config, ConfigError> {
    let config = Config::from_lookup(|name| std::env::var(name).ok())?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Builds a config from an arbitrary variable lookup. Missing or blank
    /// workspace/webhook/token values stay `None`; only malformed numeric
    /// values are an error.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let monitor_interval = parse_var(
            MONITOR_INTERVAL_VAR,
            lookup(MONITOR_INTERVAL_VAR),
            default_monitor_interval(),
        )?;
        let listen_port = parse_var(
            LISTEN_PORT_VAR,
            lookup(LISTEN_PORT_VAR),
            default_listen_port(),
        )?;

        Ok(Self {
            workspace_id: non_blank(lookup(WORKSPACE_ID_VAR)),
            webhook_url: non_blank(lookup(WEBHOOK_URL_VAR)),
            api_token: non_blank(lookup(API_TOKEN_VAR)),
            monitor_interval,
            listen_port,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match non_blank(raw) {
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(ConfigError::Parse { name, value }),
        },
        None => Ok(default),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
