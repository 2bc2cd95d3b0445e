use crate::{config::Config, notify::AlertDispatcher};

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub dispatcher: AlertDispatcher,
}

impl AppContext {
    pub fn new(config: Config, dispatcher: AlertDispatcher) -> Self {
        Self { config, dispatcher }
    }
}
