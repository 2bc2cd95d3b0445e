mod alert;
mod app_context;
mod config;
mod incident;
mod jobs;
mod monitor;
mod notify;
mod server;

use tracing_subscriber::EnvFilter;

use crate::app_context::AppContext;
use crate::config::{load_config, Config};
use crate::jobs::start_background_jobs;
use crate::notify::AlertDispatcher;

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

fn log_config_warnings(config: &Config) {
    if config.workspace_id.is_none() {
        log::warn!("config_degraded feature=security_sweep reason=LOG_ANALYTICS_WORKSPACE_ID_unset");
    }

    if config.webhook_url.is_none() {
        log::warn!("config_degraded feature=notifications reason=SLACK_WEBHOOK_URL_unset");
    }

    if config.api_token.is_none() {
        log::warn!("config_degraded feature=query_auth reason=LOG_ANALYTICS_API_TOKEN_unset");
    }
}

// Main
#[tokio::main]
async fn main() {
    init_json_logging();

    let config: Config = match load_config() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return;
        }
    };

    log::info!("AutoPot Sentry is starting...");
    log_config_warnings(&config);

    let dispatcher = match AlertDispatcher::new() {
        Ok(dispatcher) => dispatcher,
        Err(error) => {
            log::error!("Webhook dispatcher initialization failed: {}", error);
            return;
        }
    };

    let app_context = AppContext::new(config, dispatcher);

    start_background_jobs(app_context.clone());

    if let Err(error) = server::serve(app_context).await {
        log::error!("incident receiver terminated: {}", error);
    }
}
