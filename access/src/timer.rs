use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

/// Transient "invalid code" flag as published to observers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorFlag {
    pub raised: bool,
    /// Bumped on every raise; a clear task only acts on its own generation.
    pub generation: u64,
}

/// Owns the error flag and at most one pending clear task.
#[derive(Debug)]
pub(crate) struct ErrorTimer {
    flag: Arc<watch::Sender<ErrorFlag>>,
    pending: Option<JoinHandle<()>>,
}

impl ErrorTimer {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(ErrorFlag::default());
        Self {
            flag: Arc::new(tx),
            pending: None,
        }
    }

    pub(crate) fn is_raised(&self) -> bool {
        self.flag.borrow().raised
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ErrorFlag> {
        self.flag.subscribe()
    }

    /// Raise the flag and schedule it to clear after `after`, replacing any
    /// previously scheduled clear.
    pub(crate) fn raise(&mut self, after: Duration) {
        self.cancel();
        let mut generation = 0;
        self.flag.send_modify(|f| {
            f.generation += 1;
            f.raised = true;
            generation = f.generation;
        });

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No async runtime available; error flag will not auto-clear");
                return;
            }
        };
        let flag = Arc::clone(&self.flag);
        self.pending = Some(handle.spawn(async move {
            sleep(after).await;
            flag.send_if_modified(|f| {
                if f.generation == generation && f.raised {
                    f.raised = false;
                    true
                } else {
                    false
                }
            });
        }));
    }

    pub(crate) fn clear(&mut self) {
        self.cancel();
        self.flag.send_if_modified(|f| std::mem::replace(&mut f.raised, false));
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for ErrorTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
