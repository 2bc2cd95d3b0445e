use tokio::time::{interval, Duration};

use crate::app_context::AppContext;
use crate::monitor::{run_security_sweep, HttpLogsProvider};

pub fn start_background_jobs(app_context: AppContext) {
    start_monitor_job(app_context);
}

fn start_monitor_job(app_context: AppContext) {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(app_context.config.monitor_interval));
        let mut provider = HttpLogsProvider::new(app_context.config.api_token.clone());

        loop {
            ticker.tick().await;
            run_security_sweep(&app_context.config, &app_context.dispatcher, &mut provider)
                .await;
        }
    });
}
