// MockGateway — queued replies for facade, controller and route tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{GatewayError, ModelGateway, RawReply, RequestOptions};

/// Returns pre-configured replies or errors in the order they were queued.
/// Every submitted prompt/options pair is recorded for later assertions.
#[derive(Default)]
pub struct MockGateway {
    actions: Mutex<VecDeque<Result<RawReply, GatewayError>>>,
    recorded: Mutex<Vec<(String, RequestOptions)>>,
    call_count: AtomicUsize,
    delay: Option<Duration>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: RawReply) -> Self {
        self.push(Ok(reply));
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_reply(RawReply::text(text))
    }

    pub fn with_error(self, error: GatewayError) -> Self {
        self.push(Err(error));
        self
    }

    /// Sleeps before answering, so tests can observe in-flight state.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push(&self, action: Result<RawReply, GatewayError>) {
        self.actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(action);
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn recorded(&self) -> Vec<(String, RequestOptions)> {
        self.recorded
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl ModelGateway for MockGateway {
    async fn submit(
        &self,
        prompt: &str,
        options: &RequestOptions,
    ) -> Result<RawReply, GatewayError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.recorded
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((prompt.to_string(), options.clone()));
        options.validate()?;

        // Claim the reply before sleeping so concurrent callers consume the queue in call order.
        let action = self
            .actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Envelope("MockGateway: no reply queued".to_string())));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        action
    }
}

/// A genuine transport failure: connecting to a port that was just released.
pub async fn transport_error() -> GatewayError {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("bind an ephemeral port");
    match reqwest::Client::new()
        .post(format!("http://{addr}/unreachable"))
        .send()
        .await
    {
        Err(e) => GatewayError::Http(e),
        Ok(_) => panic!("expected a connection failure on released port {addr}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transport_error_is_retryable_http() {
        let error = transport_error().await;
        assert!(matches!(error, GatewayError::Http(_)));
        assert!(error.is_retryable());
    }
}
