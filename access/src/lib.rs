//! Access gate for the portfolio.
//!
//! Content stays hidden until a shared access code is supplied, either via the
//! `access` query parameter, a previously persisted session flag, or the
//! unlock form. Once unlocked the gate stays open for the rest of the session.

pub mod guard;
pub mod query;
pub mod store;
mod timer;

pub use guard::{should_suppress, suppress_context_menu, KeyChord};
pub use query::{MemoryQuery, QueryParams, UrlQuery};
#[cfg(feature = "file-store")]
pub use store::FileSessionStore;
pub use store::{MemorySessionStore, SessionStore, StoreError};
pub use timer::ErrorFlag;

use thiserror::Error;
use tokio::sync::watch;
use tokio::time::Duration;
use timer::ErrorTimer;

pub const ACCESS_QUERY_PARAM: &str = "access";
pub const SESSION_KEY: &str = "portfolio_access";
pub const DEFAULT_ACCESS_CODE: &str = "pixel01";
pub const ERROR_DISPLAY_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Invalid Access Code")]
    InvalidCode,
    #[error("Session Store Error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Locked,
    Unlocked,
}

/// Proof of a successful unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unlocked;

pub struct AccessController<S, Q> {
    secret: String,
    store: S,
    query: Q,
    state: GateState,
    pending_code: String,
    error: ErrorTimer,
}

impl<S: SessionStore, Q: QueryParams> AccessController<S, Q> {
    pub fn new(store: S, query: Q) -> Self {
        Self::with_secret(DEFAULT_ACCESS_CODE, store, query)
    }

    pub fn with_secret(secret: impl Into<String>, store: S, query: Q) -> Self {
        Self {
            secret: secret.into(),
            store,
            query,
            state: GateState::Locked,
            pending_code: String::new(),
            error: ErrorTimer::new(),
        }
    }

    /// True iff either value is exactly the access code.
    pub fn check_access(&self, url_param: Option<&str>, session_flag: Option<&str>) -> bool {
        url_param == Some(self.secret.as_str()) || session_flag == Some(self.secret.as_str())
    }

    /// Consult the query parameter and the session flag. Call on startup and
    /// whenever the query changes.
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self)))]
    pub fn mount(&mut self) -> bool {
        if self.state == GateState::Unlocked {
            return true;
        }
        let url_param = self.query.get(ACCESS_QUERY_PARAM);
        let session_flag = self.store.get(SESSION_KEY);
        if self.check_access(url_param.as_deref(), session_flag.as_deref()) {
            let source = if url_param.as_deref() == Some(self.secret.as_str()) {
                "query"
            } else {
                "session"
            };
            tracing::info!(source, "Portfolio unlocked");
            self.open_gate();
        } else {
            tracing::debug!("Gate locked at mount");
        }
        self.is_unlocked()
    }

    pub fn on_query_changed(&mut self) -> bool {
        self.mount()
    }

    /// Change the page query in place, then re-check access.
    pub fn navigate(&mut self, f: impl FnOnce(&mut Q)) -> bool {
        f(&mut self.query);
        self.on_query_changed()
    }

    pub fn set_pending_code(&mut self, input: impl Into<String>) {
        self.pending_code = input.into();
    }

    pub fn submit_pending(&mut self) -> Result<Unlocked, AccessError> {
        let input = std::mem::take(&mut self.pending_code);
        self.submit_code(&input)
    }

    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self, input)))]
    pub fn submit_code(&mut self, input: &str) -> Result<Unlocked, AccessError> {
        self.pending_code.clear();

        if input != self.secret {
            tracing::debug!("Invalid access code");
            // Unlocked is terminal; only the lock screen shows the error.
            if self.state == GateState::Locked {
                self.error.raise(ERROR_DISPLAY_DURATION);
            }
            return Err(AccessError::InvalidCode);
        }

        if self.state == GateState::Locked {
            tracing::info!(source = "code", "Portfolio unlocked");
        }
        self.open_gate();
        self.query.set(ACCESS_QUERY_PARAM, &self.secret);
        self.store.set(SESSION_KEY, &self.secret)?;
        Ok(Unlocked)
    }

    fn open_gate(&mut self) {
        self.state = GateState::Unlocked;
        self.error.clear();
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    pub fn last_error(&self) -> bool {
        self.error.is_raised()
    }

    pub fn pending_code(&self) -> &str {
        &self.pending_code
    }

    pub fn has_pending_timer(&self) -> bool {
        self.error.has_pending()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<ErrorFlag> {
        self.error.subscribe()
    }

    /// Cancel the pending error-clear task. Also happens on drop.
    pub fn dispose(&mut self) {
        self.error.cancel();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct access to the persistence boundary, e.g. to clear the session.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub fn into_parts(self) -> (S, Q) {
        (self.store, self.query)
    }
}

impl<S, Q> std::fmt::Debug for AccessController<S, Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessController")
            .field("state", &self.state)
            .field("pending_code", &!self.pending_code.is_empty())
            .field("last_error", &self.error.is_raised())
            .finish()
    }
}
