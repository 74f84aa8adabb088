use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::{JoinError, JoinSet};

use crate::error::{AppError, AppResult};
use crate::event::Transition;

use super::Observer;

enum DispatchRequest {
    Notify {
        observer: Observer,
        transition: Transition,
    },
    Flush(flume::Sender<()>),
    Shutdown,
}

struct DispatcherRuntime {
    owned: Option<Runtime>,
    handle: Handle,
}

impl DispatcherRuntime {
    fn new() -> AppResult<Self> {
        if let Ok(handle) = Handle::try_current() {
            return Ok(Self {
                owned: None,
                handle,
            });
        }

        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .thread_name("rel8-observers")
            .build()
            .map_err(|source| {
                AppError::io_with_context(source, "failed to start observer runtime")
            })?;
        let handle = runtime.handle().clone();
        Ok(Self {
            owned: Some(runtime),
            handle,
        })
    }
}

impl Drop for DispatcherRuntime {
    fn drop(&mut self) {
        if let Some(runtime) = self.owned.take() {
            runtime.shutdown_background();
        }
    }
}

/// Queue feeding asynchronous observers.
///
/// Every queued call runs as its own blocking task; calls have no ordering
/// guarantee among themselves. `flush` waits until everything queued so far
/// has finished.
pub(crate) struct AsyncDispatcher {
    request_tx: flume::Sender<DispatchRequest>,
    _runtime: DispatcherRuntime,
}

impl AsyncDispatcher {
    pub(crate) fn spawn() -> AppResult<Self> {
        let runtime = DispatcherRuntime::new()?;
        let (request_tx, request_rx) = flume::unbounded();
        runtime.handle.spawn(dispatch_loop(request_rx));
        Ok(Self {
            request_tx,
            _runtime: runtime,
        })
    }

    pub(crate) fn dispatch(&self, observer: Observer, transition: Transition) {
        if self
            .request_tx
            .send(DispatchRequest::Notify {
                observer,
                transition,
            })
            .is_err()
        {
            tracing::debug!("observer dispatcher stopped; dropping async notification");
        }
    }

    pub(crate) async fn flush(&self) {
        let (done_tx, done_rx) = flume::bounded(1);
        if self.request_tx.send(DispatchRequest::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.recv_async().await;
    }

    /// Blocks the calling thread; must not run on a thread driving the
    /// dispatcher's own runtime.
    pub(crate) fn flush_blocking(&self) {
        let (done_tx, done_rx) = flume::bounded(1);
        if self.request_tx.send(DispatchRequest::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.recv();
    }

    pub(crate) fn shutdown(&self) {
        let _ = self.request_tx.send(DispatchRequest::Shutdown);
    }
}

impl Drop for AsyncDispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn dispatch_loop(request_rx: flume::Receiver<DispatchRequest>) {
    let mut in_flight = JoinSet::new();
    while let Ok(request) = request_rx.recv_async().await {
        match request {
            DispatchRequest::Notify {
                observer,
                transition,
            } => {
                in_flight.spawn_blocking(move || observer(&transition));
            }
            DispatchRequest::Flush(done) => {
                while let Some(joined) = in_flight.join_next().await {
                    report_join(joined);
                }
                let _ = done.send(());
            }
            DispatchRequest::Shutdown => break,
        }
        while let Some(joined) = in_flight.try_join_next() {
            report_join(joined);
        }
    }
    for pending in request_rx.drain() {
        if let DispatchRequest::Flush(done) = pending {
            let _ = done.send(());
        }
    }
    in_flight.detach_all();
}

fn report_join(joined: Result<(), JoinError>) {
    if let Err(err) = joined {
        tracing::warn!(error = %err, "async observer failed");
    }
}
