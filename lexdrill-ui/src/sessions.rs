//! Quiz session registry
//!
//! One [`SessionEngine`] per opaque token. Engines are owned by exactly one
//! token; there is no process-global session state. Sessions idle past the
//! configured timeout are purged on every registry access, and a session is
//! removed as soon as it completes (its summary has been delivered).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use lexdrill_core::{Error, Result, SessionEngine};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

struct Entry {
    engine: SessionEngine,
    last_touched: Instant,
}

/// Token-addressed store of live quiz sessions.
pub struct SessionRegistry {
    timeout: Duration,
    inner: RwLock<HashMap<Uuid, Entry>>,
}

impl SessionRegistry {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register a freshly started engine and hand out its token.
    pub async fn insert(&self, engine: SessionEngine) -> Uuid {
        let token = Uuid::new_v4();
        let mut sessions = self.inner.write().await;
        Self::purge(&mut sessions, self.timeout);
        sessions.insert(
            token,
            Entry {
                engine,
                last_touched: Instant::now(),
            },
        );
        debug!(%token, live = sessions.len(), "quiz session registered");
        token
    }

    /// Run a closure against the engine behind `token`, refreshing its idle
    /// clock. The entry is dropped when the engine comes out completed.
    pub async fn with<F, R>(&self, token: Uuid, f: F) -> Result<R>
    where
        F: FnOnce(&mut SessionEngine) -> Result<R>,
    {
        let mut sessions = self.inner.write().await;
        Self::purge(&mut sessions, self.timeout);
        let entry = sessions
            .get_mut(&token)
            .ok_or_else(|| Error::UnknownSession(token.to_string()))?;
        let result = f(&mut entry.engine);
        entry.last_touched = Instant::now();
        if entry.engine.is_completed() {
            sessions.remove(&token);
            debug!(%token, "quiz session completed and evicted");
        }
        result
    }

    /// Take the engine behind `token` out of the registry.
    pub async fn remove(&self, token: Uuid) -> Result<SessionEngine> {
        let mut sessions = self.inner.write().await;
        Self::purge(&mut sessions, self.timeout);
        sessions
            .remove(&token)
            .map(|entry| entry.engine)
            .ok_or_else(|| Error::UnknownSession(token.to_string()))
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    fn purge(sessions: &mut HashMap<Uuid, Entry>, timeout: Duration) {
        sessions.retain(|_, entry| entry.last_touched.elapsed() < timeout);
    }
}
