//! Per-view state controller: Idle → Pending → (Success | Failed), re-entering Pending on
//! the next submit.
//!
//! At most one call is in flight per controller. Each call gets a ticket and a
//! cancellation token; a resolution whose ticket is no longer current (torn down or
//! superseded) is dropped without touching state.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::mediation::MediationError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState<T> {
    Idle,
    Pending,
    Success { result: T },
    Failed { code: &'static str, message: String },
}

impl<T> ViewState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, ViewState::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// A call was started; its result will land under this ticket.
    Started { ticket: Uuid },
    /// A call is already in flight. Nothing was started.
    Busy,
    /// The input was blank. Nothing was started and state is unchanged.
    Blank,
}

struct Inner<T> {
    state: ViewState<T>,
    ticket: Option<Uuid>,
    cancel: Option<CancellationToken>,
}

pub struct FeatureController<T> {
    name: &'static str,
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> FeatureController<T>
where
    T: Send + 'static,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Arc::new(Mutex::new(Inner {
                state: ViewState::Idle,
                ticket: None,
                cancel: None,
            })),
        }
    }

    /// Starts one call to `run` with the trimmed input, unless the input is blank or a call
    /// is already pending. Must be called from within a tokio runtime.
    pub fn submit<F, Fut>(&self, input: &str, run: F) -> SubmitOutcome
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T, MediationError>> + Send + 'static,
    {
        let input = input.trim();
        if input.is_empty() {
            debug!("{}: blank input ignored", self.name);
            return SubmitOutcome::Blank;
        }

        let ticket = Uuid::new_v4();
        let token = CancellationToken::new();
        {
            let mut inner = lock(&self.inner);
            if inner.state.is_pending() {
                debug!("{}: submit ignored, a request is already pending", self.name);
                return SubmitOutcome::Busy;
            }
            inner.state = ViewState::Pending;
            inner.ticket = Some(ticket);
            inner.cancel = Some(token.clone());
        }

        info!("{}: request {} started", self.name, ticket);
        let call = run(input.to_string());
        let shared = Arc::clone(&self.inner);
        let name = self.name;
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    debug!("{}: request {} cancelled", name, ticket);
                    return;
                }
                outcome = call => outcome,
            };
            resolve(&shared, name, ticket, outcome);
        });

        SubmitOutcome::Started { ticket }
    }

    /// Cancels any in-flight call and resets to Idle. Late results are ignored.
    pub fn teardown(&self) {
        let mut inner = lock(&self.inner);
        if let Some(token) = inner.cancel.take() {
            info!("{}: tearing down with a request in flight", self.name);
            token.cancel();
        }
        inner.ticket = None;
        inner.state = ViewState::Idle;
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        lock(&self.inner).state.is_pending()
    }
}

impl<T: Clone> FeatureController<T> {
    pub fn snapshot(&self) -> ViewState<T> {
        lock(&self.inner).state.clone()
    }
}

impl<T> Drop for FeatureController<T> {
    fn drop(&mut self) {
        if let Some(token) = lock(&self.inner).cancel.take() {
            token.cancel();
        }
    }
}

fn lock<T>(inner: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    inner.lock().unwrap_or_else(|e| e.into_inner())
}

fn resolve<T>(
    inner: &Mutex<Inner<T>>,
    name: &str,
    ticket: Uuid,
    outcome: Result<T, MediationError>,
) {
    let mut inner = lock(inner);
    if inner.ticket != Some(ticket) {
        debug!("{}: dropping stale result for request {}", name, ticket);
        return;
    }
    inner.ticket = None;
    inner.cancel = None;
    inner.state = match outcome {
        Ok(result) => {
            info!("{}: request {} succeeded", name, ticket);
            ViewState::Success { result }
        }
        Err(e) => {
            warn!("{}: request {} failed: {}", name, ticket, e);
            ViewState::Failed {
                code: e.kind(),
                message: e.to_string(),
            }
        }
    };
}
