use crate::sessions::session::Session;
use std::future::Future;
use std::time::Duration;

pub trait ISessionStorage: SessionRepo + SessionAccess + Clone + Send + Sync + 'static {}

pub trait SessionRepo {
    fn insert(&self, session_id: &str, session: Session) -> impl Future<Output = ()> + Send;

    fn exists(&self, session_id: &str) -> impl Future<Output = bool> + Send;

    fn count(&self) -> impl Future<Output = usize> + Send;

    /// Drops sessions with no guess or advance for at least `max_idle`. Returns how many were
    /// dropped. Sessions busy with an update are kept.
    fn evict_idle(&self, max_idle: Duration) -> impl Future<Output = usize> + Send;
}

/// Runs closures against a stored session while holding that session's lock. `None` if there
/// is no session with such id.
pub trait SessionAccess {
    fn read<T, F>(&self, session_id: &str, f: F) -> impl Future<Output = Option<T>> + Send
    where
        T: Send,
        F: FnOnce(&Session) -> T + Send;

    /// Runs `f` on the blocking thread pool, so it may do file I/O. Other sessions stay
    /// available meanwhile.
    fn update<T, F>(&self, session_id: &str, f: F) -> impl Future<Output = Option<T>> + Send
    where
        T: Send + 'static,
        F: FnOnce(&mut Session) -> T + Send + 'static;
}
