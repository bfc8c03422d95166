//! Resilient image load supervisor.
//!
//! Drives the domain state machine against a fetch port: one attempt at a
//! time, a single cancellable retry timer, and an event per transition.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::events::LoadEvent;
use crate::domain::entities::{FailureAction, LoadStateMachine, RetryPolicy, SourceSet};
use crate::domain::ports::ImageFetchPort;

/// Caller-side callbacks for load outcomes.
///
/// `on_load` fires once when an image resolves; `on_error` fires on every
/// individual failed attempt, including ones that are later recovered.
#[derive(Default)]
pub struct LoadHooks {
    on_load: Option<Box<dyn Fn() + Send + Sync>>,
    on_error: Option<Box<dyn Fn() + Send + Sync>>,
}

impl LoadHooks {
    /// Creates empty hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the success callback.
    #[must_use]
    pub fn on_load(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_load = Some(Box::new(hook));
        self
    }

    /// Sets the per-attempt failure callback.
    #[must_use]
    pub fn on_error(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    fn notify_load(&self) {
        if let Some(hook) = &self.on_load {
            hook();
        }
    }

    fn notify_error(&self) {
        if let Some(hook) = &self.on_error {
            hook();
        }
    }
}

impl std::fmt::Debug for LoadHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadHooks")
            .field("has_on_load", &self.on_load.is_some())
            .field("has_on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Handle owning one in-flight load.
///
/// Dropping or cancelling the handle tears the load down, discarding any
/// pending retry timer so it can never fire against a stale instance.
#[derive(Debug)]
pub struct LoadHandle {
    join: JoinHandle<()>,
    cancel_tx: Option<oneshot::Sender<()>>,
}

impl LoadHandle {
    /// Cancels the load and any pending retry timer.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
        self.join.abort();
    }

    /// Returns true once the load task has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawns and supervises loads for one image view.
///
/// Each [`spawn`](Self::spawn) call builds a fresh state machine for its
/// source pair, so retry counts never carry over between pairs.
#[derive(Clone)]
pub struct ImageLoadSupervisor {
    fetcher: Arc<dyn ImageFetchPort>,
    event_tx: mpsc::UnboundedSender<LoadEvent>,
}

impl ImageLoadSupervisor {
    /// Creates a supervisor emitting events on `event_tx`.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetchPort>, event_tx: mpsc::UnboundedSender<LoadEvent>) -> Self {
        Self { fetcher, event_tx }
    }

    /// Starts loading `sources`, returning the owning handle.
    #[must_use]
    pub fn spawn(&self, sources: SourceSet, policy: RetryPolicy, hooks: LoadHooks) -> LoadHandle {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let task = LoadTask {
            machine: LoadStateMachine::new(sources, policy),
            fetcher: self.fetcher.clone(),
            event_tx: self.event_tx.clone(),
            hooks,
        };
        let join = tokio::spawn(task.run(cancel_rx));
        LoadHandle {
            join,
            cancel_tx: Some(cancel_tx),
        }
    }
}

impl std::fmt::Debug for ImageLoadSupervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoadSupervisor").finish_non_exhaustive()
    }
}

struct LoadTask {
    machine: LoadStateMachine,
    fetcher: Arc<dyn ImageFetchPort>,
    event_tx: mpsc::UnboundedSender<LoadEvent>,
    hooks: LoadHooks,
}

impl LoadTask {
    async fn run(mut self, mut cancel_rx: oneshot::Receiver<()>) {
        loop {
            let kind = self.machine.current_kind();
            let url = self.machine.current_url().to_string();
            let _ = self.event_tx.send(LoadEvent::AttemptStarted {
                kind,
                url: url.clone(),
            });

            let outcome = tokio::select! {
                _ = &mut cancel_rx => return,
                outcome = self.fetcher.fetch(&url) => outcome,
            };

            match outcome {
                Ok(image) => {
                    self.machine.record_success();
                    debug!(url = %url, source = %kind, "Image loaded");
                    let _ = self.event_tx.send(LoadEvent::Loaded { kind, url, image });
                    self.hooks.notify_load();
                    return;
                }
                Err(error) => {
                    warn!(url = %url, source = %kind, error = %error, "Image attempt failed");
                    let _ = self.event_tx.send(LoadEvent::AttemptFailed {
                        kind,
                        url,
                        error,
                    });
                    self.hooks.notify_error();

                    match self.machine.record_failure() {
                        FailureAction::RetryAfter(delay) => {
                            let _ = self.event_tx.send(LoadEvent::RetryScheduled { delay });
                            tokio::select! {
                                _ = &mut cancel_rx => return,
                                () = tokio::time::sleep(delay) => {}
                            }
                            self.machine.begin_retry();
                        }
                        FailureAction::UseFallback => {
                            let _ = self.event_tx.send(LoadEvent::FallbackEngaged {
                                url: self.machine.current_url().to_string(),
                            });
                        }
                        FailureAction::GiveUp => {
                            let _ = self.event_tx.send(LoadEvent::Failed);
                            return;
                        }
                    }
                }
            }
        }
    }
}
