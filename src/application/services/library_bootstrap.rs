use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use crate::application::ports::{Capability, CapabilityLoader};

pub const BOOTSTRAP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, thiserror::Error)]
pub enum BootstrapError {
    #[error("{0} did not load within {1:?}")]
    LoadTimeout(Capability, Duration),
    #[error("{0} failed to load: {1}")]
    LoadFailure(Capability, String),
    #[error("{0} load reported success but the capability is not available")]
    CapabilityNotFound(Capability),
}

type PendingLoad<H> = Shared<BoxFuture<'static, Result<Arc<H>, BootstrapError>>>;

enum Slot<H: ?Sized> {
    Empty,
    Loading(PendingLoad<H>),
    Ready(Arc<H>),
}

/// Lazily loads one external capability and memoizes the handle.
///
/// Concurrent callers that arrive while a load is in flight await that same
/// load. Failures are not cached: the next `acquire` after a failed load
/// starts a new attempt.
pub struct LibraryBootstrap<H: ?Sized + Send + Sync + 'static> {
    loader: Arc<dyn CapabilityLoader<H>>,
    timeout: Duration,
    slot: Arc<Mutex<Slot<H>>>,
}

impl<H: ?Sized + Send + Sync + 'static> LibraryBootstrap<H> {
    pub fn new(loader: Arc<dyn CapabilityLoader<H>>) -> Self {
        Self::with_timeout(loader, BOOTSTRAP_TIMEOUT)
    }

    pub fn with_timeout(loader: Arc<dyn CapabilityLoader<H>>, timeout: Duration) -> Self {
        Self {
            loader,
            timeout,
            slot: Arc::new(Mutex::new(Slot::Empty)),
        }
    }

    pub fn capability(&self) -> Capability {
        self.loader.capability()
    }

    pub fn is_loaded(&self) -> bool {
        matches!(
            *self.slot.lock().unwrap_or_else(PoisonError::into_inner),
            Slot::Ready(_)
        )
    }

    pub async fn acquire(&self) -> Result<Arc<H>, BootstrapError> {
        let pending = {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            match &*slot {
                Slot::Ready(handle) => return Ok(Arc::clone(handle)),
                Slot::Loading(pending) => pending.clone(),
                Slot::Empty => {
                    let pending = self.start_load();
                    *slot = Slot::Loading(pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    // The load runs on its own task so that a caller giving up does not
    // strand the others waiting on the same attempt.
    fn start_load(&self) -> PendingLoad<H> {
        let loader = Arc::clone(&self.loader);
        let slot = Arc::clone(&self.slot);
        let timeout = self.timeout;
        let capability = loader.capability();

        let task = tokio::spawn({
            let slot = Arc::clone(&slot);
            async move {
                let outcome = AssertUnwindSafe(load_capability(loader.as_ref(), timeout))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| {
                        Err(BootstrapError::LoadFailure(
                            capability,
                            "loader panicked".to_string(),
                        ))
                    });

                let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
                *guard = match &outcome {
                    Ok(handle) => Slot::Ready(Arc::clone(handle)),
                    Err(_) => Slot::Empty,
                };
                outcome
            }
        });

        async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    *slot.lock().unwrap_or_else(PoisonError::into_inner) = Slot::Empty;
                    Err(BootstrapError::LoadFailure(
                        capability,
                        format!("load task aborted: {e}"),
                    ))
                }
            }
        }
        .boxed()
        .shared()
    }
}

async fn load_capability<H: ?Sized + Send + Sync>(
    loader: &dyn CapabilityLoader<H>,
    timeout: Duration,
) -> Result<Arc<H>, BootstrapError> {
    let capability = loader.capability();
    tracing::info!(%capability, timeout_ms = timeout.as_millis() as u64, "Loading capability");

    let handle = tokio::time::timeout(timeout, loader.load())
        .await
        .map_err(|_| BootstrapError::LoadTimeout(capability, timeout))?
        .map_err(|reason| BootstrapError::LoadFailure(capability, reason))?
        .ok_or(BootstrapError::CapabilityNotFound(capability))?;

    loader.configure(&handle).await.map_err(|reason| {
        BootstrapError::LoadFailure(capability, format!("post-load configuration: {reason}"))
    })?;

    tracing::info!(%capability, "Capability ready");
    Ok(handle)
}
