use crate::sessions::session::Session;
use crate::storage::interface::{ISessionStorage, SessionAccess, SessionRepo};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

#[derive(Clone, Default)]
pub struct HashMapSessionsStorage {
    storage: Arc<RwLock<HashMap<String, Arc<Mutex<Session>>>>>,
}

impl HashMapSessionsStorage {
    async fn session(&self, session_id: &str) -> Option<Arc<Mutex<Session>>> {
        self.storage.read().await.get(session_id).cloned()
    }

    /// Evicts idle sessions every `period` until the runtime shuts down.
    pub fn spawn_eviction(&self, max_idle: Duration, period: Duration) {
        let storage = self.clone();
        tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            loop {
                ticks.tick().await;
                let evicted_count = storage.evict_idle(max_idle).await;
                if evicted_count > 0 {
                    let live_sessions = storage.count().await;
                    tracing::info!(
                        task = "sessions_evicted",
                        evicted_count,
                        live_sessions,
                    );
                }
            }
        });
    }
}

impl ISessionStorage for HashMapSessionsStorage {}

impl SessionRepo for HashMapSessionsStorage {
    async fn insert(&self, session_id: &str, session: Session) {
        self.storage
            .write()
            .await
            .insert(session_id.to_string(), Arc::new(Mutex::new(session)));
    }

    async fn exists(&self, session_id: &str) -> bool {
        self.storage.read().await.contains_key(session_id)
    }

    async fn count(&self) -> usize {
        self.storage.read().await.len()
    }

    async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut storage = self.storage.write().await;
        let before = storage.len();
        storage.retain(|_, session| match session.try_lock() {
            Ok(session) => session.idle_for() < max_idle,
            Err(_) => true,
        });
        before - storage.len()
    }
}

impl SessionAccess for HashMapSessionsStorage {
    async fn read<T, F>(&self, session_id: &str, f: F) -> Option<T>
    where
        T: Send,
        F: FnOnce(&Session) -> T + Send,
    {
        let session = self.session(session_id).await?;
        let session = session.lock().await;
        Some(f(&session))
    }

    async fn update<T, F>(&self, session_id: &str, f: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Session) -> T + Send + 'static,
    {
        let mut session = self.session(session_id).await?.lock_owned().await;
        match tokio::task::spawn_blocking(move || f(&mut session)).await {
            Ok(value) => Some(value),
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => {
                tracing::error!(error = %err, session_id, "Session update was cancelled.");
                None
            }
        }
    }
}
