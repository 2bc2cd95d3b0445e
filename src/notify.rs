use std::time::Duration;

use thiserror::Error;

use crate::alert::ChatMessage;

const DISPATCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to build webhook client: {0}")]
    Client(reqwest::Error),
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Outcome of a delivery attempt that reached the endpoint. Non-2xx is
/// reported here, not as an error; the caller decides how to log it.
#[derive(Debug)]
pub struct Delivery {
    pub status: u16,
    pub body: String,
}

impl Delivery {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fire-and-forget webhook sender: one JSON POST per alert, fixed timeout,
/// no retry or backoff.
#[derive(Clone)]
pub struct AlertDispatcher {
    client: reqwest::Client,
}

impl AlertDispatcher {
    pub fn new() -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(DISPATCH_TIMEOUT)
            .build()
            .map_err(DispatchError::Client)?;
        Ok(Self { client })
    }

    pub async fn send(
        &self,
        webhook_url: &str,
        message: &ChatMessage,
    ) -> Result<Delivery, DispatchError> {
        let response = self.client.post(webhook_url).json(message).send().await?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable>".to_string());

        Ok(Delivery { status, body })
    }
}
