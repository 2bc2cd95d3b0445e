use thiserror::Error;

use super::schema::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Parse { name: &'static str, value: String },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor_interval == 0 {
            return Err(ConfigError::Validation(
                "MONITOR_INTERVAL_SECS must be greater than 0".to_string(),
            ));
        }
        if self.listen_port == 0 {
            return Err(ConfigError::Validation(
                "LISTEN_PORT must be greater than 0".to_string(),
            ));
        }
        if let Some(url) = &self.webhook_url {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ConfigError::Validation(
                    "SLACK_WEBHOOK_URL must be an http(s) URL".to_string(),
                ));
            }
        }
        Ok(())
    }
}
