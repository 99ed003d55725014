use std::collections::HashMap;

use parking_lot::RwLock;

use crate::errors::Error;

use super::{CredentialPair, SessionKey, SessionStore};

#[derive(Default)]
pub struct InMemorySessionStore {
    slots: RwLock<HashMap<SessionKey, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(access: impl Into<String>, refresh: Option<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(SessionKey::Access, access.into());
        if let Some(refresh) = refresh {
            slots.insert(SessionKey::Refresh, refresh);
        }
        Self {
            slots: RwLock::new(slots),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        self.slots.read().get(&key).cloned()
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), Error> {
        self.slots.write().insert(key, value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        self.slots.write().clear();
        Ok(())
    }

    fn save(&self, pair: &CredentialPair) -> Result<(), Error> {
        let mut slots = self.slots.write();
        slots.insert(SessionKey::Access, pair.access_token.clone());
        match &pair.refresh_token {
            Some(refresh) => slots.insert(SessionKey::Refresh, refresh.clone()),
            None => slots.remove(&SessionKey::Refresh),
        };
        Ok(())
    }
}
