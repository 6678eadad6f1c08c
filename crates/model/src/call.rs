//! Context-cancellable call adapter.
//!
//! Provider transports do not observe cancellation themselves, so it is
//! enforced at the call boundary: the call runs on its own task and the
//! caller races its outcome against the context.

use crate::{Error, ProviderError, Result};
use std::{future::Future, time::Duration};
use tokio::{sync::oneshot, time::Instant};
use tokio_util::sync::CancellationToken;

/// Cancellation signal plus an optional deadline.
///
/// Clones share the same token, so cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never done unless cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().timeout(timeout)
    }

    /// Derive a context that also expires after `timeout`, keeping the
    /// earlier of the two deadlines.
    pub fn timeout(&self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        Self {
            token: self.token.clone(),
            deadline: Some(self.deadline.map_or(deadline, |d| d.min(deadline))),
        }
    }

    /// Derive a context cancelled with this one but cancellable on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancel this context and every clone and child of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether this context (or a parent) has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The error describing why the context is done, if it is.
    pub fn err(&self) -> Option<Error> {
        if self.token.is_cancelled() {
            Some(Error::Cancelled)
        } else if self.deadline.is_some_and(|d| d <= Instant::now()) {
            Some(Error::DeadlineExceeded)
        } else {
            None
        }
    }

    /// Whether the context is cancelled or past its deadline.
    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Resolve once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> Error {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => Error::Cancelled,
                _ = tokio::time::sleep_until(deadline) => Error::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                Error::Cancelled
            }
        }
    }
}

/// Run `f` on a background task and return its outcome, or the context's
/// error if the context finishes first.
///
/// An already-done context returns immediately without spawning. If the
/// context wins the race the task is abandoned; its write lands in a
/// one-shot channel nobody reads, which never blocks.
pub async fn call_with_context<T, F, Fut>(ctx: &Context, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(Context) -> Fut,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    if let Some(err) = ctx.err() {
        return Err(err);
    }

    let (ok_tx, ok_rx) = oneshot::channel::<T>();
    let (err_tx, err_rx) = oneshot::channel::<Error>();
    let fut = f(ctx.clone());
    tokio::spawn(async move {
        match fut.await {
            Ok(value) => {
                let _ = ok_tx.send(value);
            }
            Err(err) => {
                let _ = err_tx.send(err);
            }
        }
    });

    race(ctx, ok_rx, err_rx).await
}

/// Like [`call_with_context`], for a synchronous call run on the blocking
/// thread pool.
pub async fn call_blocking_with_context<T, F>(ctx: &Context, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(Context) -> Result<T> + Send + 'static,
{
    if let Some(err) = ctx.err() {
        return Err(err);
    }

    let (ok_tx, ok_rx) = oneshot::channel::<T>();
    let (err_tx, err_rx) = oneshot::channel::<Error>();
    let task_ctx = ctx.clone();
    tokio::task::spawn_blocking(move || match f(task_ctx) {
        Ok(value) => {
            let _ = ok_tx.send(value);
        }
        Err(err) => {
            let _ = err_tx.send(err);
        }
    });

    race(ctx, ok_rx, err_rx).await
}

async fn race<T>(
    ctx: &Context,
    mut ok_rx: oneshot::Receiver<T>,
    mut err_rx: oneshot::Receiver<Error>,
) -> Result<T> {
    // Each arm is disabled once its channel closes, so a task that finished
    // on the other channel (or panicked) does not end the select early.
    let mut ok_open = true;
    let mut err_open = true;
    loop {
        tokio::select! {
            biased;
            err = ctx.done() => return Err(err),
            res = &mut ok_rx, if ok_open => match res {
                Ok(value) => return Ok(value),
                Err(_) => ok_open = false,
            },
            res = &mut err_rx, if err_open => match res {
                Ok(err) => return Err(err),
                Err(_) => err_open = false,
            },
        }
        if !ok_open && !err_open {
            return Err(ProviderError::Task("task ended without a result".into()).into());
        }
    }
}
