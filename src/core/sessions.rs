//! In-memory conversation store.
//!
//! Sessions are keyed by an opaque id. Requests that carry no id share the
//! [`DEFAULT_SESSION_ID`] session. Entries expire after an idle period and
//! the cache is bounded; evicted listeners simply start at the intro again.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::core::story::StoryState;

pub const DEFAULT_SESSION_ID: &str = "default";

/// Longest session id accepted from clients.
const MAX_SESSION_ID_LEN: usize = 128;

/// A session's story, locked for the duration of a turn.
pub type SharedStory = Arc<Mutex<StoryState>>;

#[derive(Clone)]
pub struct SessionStore {
    cache: Cache<String, SharedStory>,
}

impl SessionStore {
    pub fn new(max_sessions: u64, idle_timeout: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle_timeout)
            .build();
        Self { cache }
    }

    pub fn new_session_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Accept a client supplied id if it is short and printable.
    pub fn normalize_id(raw: &str) -> Option<String> {
        let id = raw.trim();
        if id.is_empty()
            || id.len() > MAX_SESSION_ID_LEN
            || !id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        {
            return None;
        }
        Some(id.to_string())
    }

    /// Fetch a session, creating it at the intro step on a miss.
    pub async fn get_or_create(&self, id: &str) -> SharedStory {
        self.cache
            .get_with(id.to_string(), async {
                debug!("Creating story session {}", id);
                Arc::new(Mutex::new(StoryState::new()))
            })
            .await
    }

    /// Approximate number of live sessions.
    pub fn active_sessions(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::story::{KeywordJudge, StoryStep};

    fn store() -> SessionStore {
        SessionStore::new(100, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_get_or_create_returns_same_state() {
        let sessions = store();
        let first = sessions.get_or_create("abc").await;
        first.lock().await.advance(None, &KeywordJudge).await.unwrap();

        let again = sessions.get_or_create("abc").await;
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(again.lock().await.step(), StoryStep::AwaitingJudgment);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let sessions = store();
        let a = sessions.get_or_create("a").await;
        a.lock().await.advance(None, &KeywordJudge).await.unwrap();

        let b = sessions.get_or_create("b").await;
        assert_eq!(b.lock().await.step(), StoryStep::Intro);
    }

    #[tokio::test]
    async fn test_active_sessions_counts_created() {
        let sessions = store();
        sessions.get_or_create(DEFAULT_SESSION_ID).await;
        sessions.get_or_create("other").await;
        sessions.cache.run_pending_tasks().await;
        assert_eq!(sessions.active_sessions(), 2);
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(SessionStore::normalize_id(" abc-123 ").as_deref(), Some("abc-123"));
        assert!(SessionStore::normalize_id("").is_none());
        assert!(SessionStore::normalize_id("../etc").is_none());
        assert!(SessionStore::normalize_id(&"x".repeat(129)).is_none());
        assert!(SessionStore::normalize_id(&SessionStore::new_session_id()).is_some());
    }
}
