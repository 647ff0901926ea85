use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::editor::session::EditorSession;

pub type SharedSession = Arc<Mutex<EditorSession>>;

/// In-memory registry of live editing sessions.
///
/// The map lock is held only to look a session up. Each session has its own
/// mutex, so a hover and a drop on one document are serialized while other
/// documents proceed independently.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: EditorSession) -> SharedSession {
        let id = session.id();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, shared.clone());
        shared
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }
}
