use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::models::{ConversationState, SessionId};

/// Storage for per-session dialog state
///
/// Telegram delivers updates of one chat in order, so a get/put pair for the same
/// session never interleaves with another.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Current state, or the default idle state for unknown sessions
    async fn get(&self, session: SessionId) -> ConversationState;

    async fn put(&self, session: SessionId, state: ConversationState);
}

/// Single-process session store
#[derive(Default)]
pub struct InMemorySessionStore {
    states: RwLock<HashMap<SessionId, ConversationState>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently away from the idle state
    #[cfg(test)]
    async fn active_sessions(&self) -> usize {
        self.states.read().await.len()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session: SessionId) -> ConversationState {
        self.states
            .read()
            .await
            .get(&session)
            .cloned()
            .unwrap_or_default()
    }

    async fn put(&self, session: SessionId, state: ConversationState) {
        let mut states = self.states.write().await;
        // Idle sessions are the default, no need to keep them
        if state.is_idle() {
            states.remove(&session);
        } else {
            states.insert(session, state);
        }
    }
}
