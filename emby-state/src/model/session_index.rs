//! Client-indexed view of the sessions payload

use std::collections::BTreeMap;

use emby_api::Session;
use tracing::debug;

/// Sessions keyed by client identifier
///
/// Built from one `/emby/Sessions` response. Sessions without an identifier
/// are dropped; when two sessions share an identifier the later one wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionIndex {
    sessions: BTreeMap<String, Session>,
}

impl SessionIndex {
    pub fn from_sessions(sessions: impl IntoIterator<Item = Session>) -> Self {
        let mut index = BTreeMap::new();
        for session in sessions {
            match session.client_id().map(str::to_string) {
                Some(client_id) => {
                    debug!(client_id = %client_id, "Session received");
                    index.insert(client_id, session);
                }
                None => debug!("Dropping session without a client identifier"),
            }
        }
        Self { sessions: index }
    }

    pub fn get(&self, client_id: &str) -> Option<&Session> {
        self.sessions.get(client_id)
    }

    pub fn contains(&self, client_id: &str) -> bool {
        self.sessions.contains_key(client_id)
    }

    pub fn client_ids(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Session)> {
        self.sessions.iter().map(|(id, s)| (id.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
