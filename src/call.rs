//! Per-request call context carrying a deadline and a cancellation signal.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::{AdapterError, PortError};

/// Deadline and cancellation state shared by every upstream call made on
/// behalf of one request.
///
/// Clones observe the same cancellation flag, so a front-end can keep one
/// clone to call [`CallContext::cancel`] while another is passed down.
#[derive(Debug, Clone)]
pub struct CallContext {
    deadline: Option<(Instant, Duration)>,
    cancel: Arc<watch::Sender<bool>>,
}

impl CallContext {
    /// A context with no deadline that is only interrupted by [`cancel`](Self::cancel).
    #[must_use]
    pub fn background() -> Self {
        let (cancel, _) = watch::channel(false);
        Self { deadline: None, cancel: Arc::new(cancel) }
    }

    /// A context whose upstream calls fail once `timeout` has elapsed from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let mut ctx = Self::background();
        ctx.deadline = Some((Instant::now() + timeout, timeout));
        ctx
    }

    /// Signals cancellation to every clone of this context.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Drives an upstream call, returning early on cancellation or deadline.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Cancelled`] or [`AdapterError::DeadlineExceeded`]
    /// when interrupted, or [`AdapterError::Upstream`] when the call itself fails.
    pub async fn run<T, F>(&self, operation: &'static str, call: F) -> Result<T, AdapterError>
    where
        F: Future<Output = Result<T, PortError>>,
    {
        if self.is_cancelled() {
            return Err(AdapterError::Cancelled { operation });
        }

        let mut cancelled = self.cancel.subscribe();
        let deadline = async {
            match self.deadline {
                Some((at, _)) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            result = call => result.map_err(AdapterError::upstream(operation)),
            _ = cancelled.wait_for(|c| *c) => Err(AdapterError::Cancelled { operation }),
            () = deadline => Err(AdapterError::DeadlineExceeded {
                operation,
                timeout: self.deadline.map_or(Duration::ZERO, |(_, t)| t),
            }),
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::background()
    }
}
