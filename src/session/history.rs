//! Per-user transcript persistence with a retention cap.

use std::sync::Arc;
use tracing::warn;

use super::message::Message;
use crate::store::{KeyValueStore, StoreError};

/// The most messages kept per user.
pub const MAX_HISTORY: usize = 100;

/// Store key holding one user's transcript.
pub fn history_key(username: &str) -> String {
    format!("sxudo_history_{username}")
}

/// Drops the oldest messages so at most `cap` remain.
pub fn prune(messages: &mut Vec<Message>, cap: usize) {
    if messages.len() > cap {
        let excess = messages.len() - cap;
        messages.drain(..excess);
    }
}

/// Reads and writes per-user transcripts as JSON arrays in a
/// [`KeyValueStore`].
#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    cap: usize,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            cap: MAX_HISTORY,
        }
    }

    /// Loads a user's transcript, oldest first.
    ///
    /// A corrupt entry is logged and treated as empty so the session
    /// stays usable.
    pub fn load(&self, username: &str) -> Result<Vec<Message>, StoreError> {
        let key = history_key(username);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Message>>(&raw) {
            Ok(mut messages) => {
                prune(&mut messages, self.cap);
                Ok(messages)
            }
            Err(e) => {
                warn!(%key, error = %e, "discarding unreadable history");
                Ok(Vec::new())
            }
        }
    }

    /// Appends one message, evicting the oldest beyond the cap.
    pub fn append(&self, username: &str, message: &Message) -> Result<(), StoreError> {
        self.extend(username, std::slice::from_ref(message))
    }

    /// Appends several messages in order, evicting the oldest beyond the cap.
    pub fn extend(&self, username: &str, new_messages: &[Message]) -> Result<(), StoreError> {
        let mut messages = self.load(username)?;
        messages.extend_from_slice(new_messages);
        prune(&mut messages, self.cap);
        self.save(username, &messages)
    }

    /// Removes one user's transcript; other users are untouched.
    pub fn clear(&self, username: &str) -> Result<(), StoreError> {
        self.store.remove(&history_key(username))
    }

    fn save(&self, username: &str, messages: &[Message]) -> Result<(), StoreError> {
        let key = history_key(username);
        let json = serde_json::to_string(messages).map_err(|e| StoreError::Corrupt {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.store.set(&key, &json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn history() -> (Arc<MemoryStore>, HistoryStore) {
        let store = Arc::new(MemoryStore::new());
        let history = HistoryStore::new(store.clone());
        (store, history)
    }

    #[test]
    fn test_load_empty() {
        let (_, history) = history();
        assert!(history.load("alice").unwrap().is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let (_, history) = history();
        history.append("alice", &Message::user("one", "😊")).unwrap();
        history.append("alice", &Message::assistant("two", "😊")).unwrap();

        let texts: Vec<_> = history
            .load("alice")
            .unwrap()
            .into_iter()
            .map(|m| m.text)
            .collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[test]
    fn test_retention_evicts_oldest() {
        let (_, history) = history();
        for i in 0..=MAX_HISTORY {
            history
                .append("alice", &Message::user(format!("msg {i}"), "😊"))
                .unwrap();
        }

        let messages = history.load("alice").unwrap();
        assert_eq!(messages.len(), MAX_HISTORY);
        assert_eq!(messages[0].text, "msg 1");
        assert_eq!(messages[MAX_HISTORY - 1].text, format!("msg {MAX_HISTORY}"));
    }

    #[test]
    fn test_clear_only_affects_one_user() {
        let (_, history) = history();
        history.append("alice", &Message::user("hi", "😊")).unwrap();
        history.append("bob", &Message::user("yo", "😊")).unwrap();

        history.clear("alice").unwrap();

        assert!(history.load("alice").unwrap().is_empty());
        assert_eq!(history.load("bob").unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_history_treated_as_empty() {
        let (store, history) = history();
        store.set(&history_key("alice"), "{not json").unwrap();

        assert!(history.load("alice").unwrap().is_empty());

        history.append("alice", &Message::user("fresh", "😊")).unwrap();
        assert_eq!(history.load("alice").unwrap().len(), 1);
    }

    #[test]
    fn test_prune_under_cap_is_noop() {
        let mut messages = vec![Message::user("a", "😊"), Message::user("b", "😊")];
        prune(&mut messages, 5);
        assert_eq!(messages.len(), 2);
    }
}
