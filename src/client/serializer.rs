//! One-at-a-time request execution with a minimum spacing
//!
//! A single worker task owns the HTTP client and runs requests strictly in sequence. Callers
//! hand a request over only once the worker is ready to take it, so there is never a
//! queue of accepted-but-unstarted requests: at most one request is in flight and at most
//! one more is parked at the hand-off point.
//!
//! ```text
//!  submit() ──(wait for ready permit)──► intake ──► worker ──► reqwest::Client
//!     ▲                                                │
//!     └──────────────── oneshot reply ◄───────────────┘
//! ```
//!
//! After each request the worker waits until `interval` has passed since that request
//! started before it offers the next permit.

use crate::error::{Error, Result};
use reqwest::{Request, Response};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{Semaphore, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Minimum spacing between request starts unless configured otherwise
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(100);

/// A request waiting for the worker together with its reply slot
struct PendingRequest {
    request: Request,
    response_tx: oneshot::Sender<Result<Response>>,
}

/// Serializes and throttles HTTP requests through one background worker
///
/// Safe to share between tasks; every [`submit`](Self::submit) competes for the same worker.
/// Dropping the serializer shuts it down.
pub struct RequestSerializer {
    intake_tx: mpsc::UnboundedSender<PendingRequest>,
    /// One permit is added each time the worker is ready to accept a request
    ready: Arc<Semaphore>,
    cancel_token: CancellationToken,
    closed: AtomicBool,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl RequestSerializer {
    /// Spawn the worker around `client`
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(client: reqwest::Client, interval: Duration) -> Self {
        let (intake_tx, intake_rx) = mpsc::unbounded_channel();
        let ready = Arc::new(Semaphore::new(0));
        let cancel_token = CancellationToken::new();

        let worker = tokio::spawn(run_worker(
            client,
            interval,
            intake_rx,
            Arc::clone(&ready),
            cancel_token.clone(),
        ));

        Self {
            intake_tx,
            ready,
            cancel_token,
            closed: AtomicBool::new(false),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Execute `request` once the worker is free and return its response
    ///
    /// Blocks until the worker accepts the request, then until the response arrives.
    /// Dropping the returned future while it is still waiting to be accepted withdraws
    /// the request; once accepted it runs to completion regardless.
    ///
    /// # Errors
    ///
    /// - [`Error::ClientClosed`] if the serializer is, or becomes, shut down before a
    ///   response is delivered
    /// - [`Error::Network`] if the request itself fails
    pub async fn submit(&self, request: Request) -> Result<Response> {
        if self.is_closed() {
            return Err(Error::ClientClosed);
        }

        let permit = tokio::select! {
            permit = self.ready.acquire() => permit.map_err(|_| Error::ClientClosed)?,
            _ = self.cancel_token.cancelled() => return Err(Error::ClientClosed),
        };
        permit.forget();

        let (response_tx, response_rx) = oneshot::channel();
        self.intake_tx
            .send(PendingRequest {
                request,
                response_tx,
            })
            .map_err(|_| Error::ClientClosed)?;

        response_rx.await.map_err(|_| Error::ClientClosed)?
    }

    /// Stop accepting requests and signal the worker to exit
    ///
    /// Idempotent. Callers blocked in [`submit`](Self::submit) waiting for acceptance are
    /// released with [`Error::ClientClosed`]. A request already in flight finishes and its
    /// caller still receives the response.
    pub fn shutdown(&self) {
        if self
            .closed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }
        tracing::debug!("shutting down request serializer");
        self.ready.close();
        self.cancel_token.cancel();
    }

    /// Shut down and wait for the worker task to exit
    pub async fn shutdown_and_wait(&self) {
        self.shutdown();
        let worker = self.worker.lock().ok().and_then(|mut guard| guard.take());
        if let Some(worker) = worker
            && let Err(e) = worker.await
        {
            tracing::warn!(error = %e, "request worker ended abnormally");
        }
    }

    /// True once [`shutdown`](Self::shutdown) has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Drop for RequestSerializer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_worker(
    client: reqwest::Client,
    interval: Duration,
    mut intake_rx: mpsc::UnboundedReceiver<PendingRequest>,
    ready: Arc<Semaphore>,
    cancel_token: CancellationToken,
) {
    loop {
        ready.add_permits(1);

        let pending = tokio::select! {
            biased;
            _ = cancel_token.cancelled() => break,
            pending = intake_rx.recv() => match pending {
                Some(pending) => pending,
                None => break,
            },
        };

        let started = Instant::now();
        let url = pending.request.url().clone();
        tracing::debug!(method = %pending.request.method(), url = %url, "sending request");

        let result = client.execute(pending.request).await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "request failed");
            Error::Network(e)
        });
        if pending.response_tx.send(result).is_err() {
            tracing::debug!(url = %url, "caller went away before the response arrived");
        }

        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => break,
            _ = tokio::time::sleep_until(started + interval) => {}
        }
    }

    intake_rx.close();
    while let Ok(pending) = intake_rx.try_recv() {
        let _ = pending.response_tx.send(Err(Error::ClientClosed));
    }
    tracing::debug!("request worker stopped");
}
