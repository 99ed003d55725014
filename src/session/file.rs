use std::collections::BTreeMap;
use std::path::PathBuf;

use parking_lot::RwLock;
use tracing::debug;

use crate::errors::Error;

use super::{CredentialPair, SessionKey, SessionStore};

/// Session store persisted as a JSON object `{"token": ..., "refresh": ...}`.
///
/// Every write builds the next state, rewrites the whole file through a
/// temporary sibling and a rename, and only then swaps the state in. A failed
/// write leaves both the file and the in-memory slots as they were.
pub struct FileSessionStore {
    path: PathBuf,
    slots: RwLock<BTreeMap<String, String>>,
}

impl FileSessionStore {
    /// Opens the store, loading existing credentials if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let slots = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|e| {
                    Error::Config(format!(
                        "Malformed session file '{}': {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), keys = slots.len(), "session.file.open");
        Ok(Self {
            path,
            slots: RwLock::new(slots),
        })
    }

    /// Applies `change` to a copy of the slots, persists it, then commits it.
    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), Error> {
        let mut slots = self.slots.write();
        let mut next = slots.clone();
        change(&mut next);

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(&next)?)?;
        std::fs::rename(&tmp, &self.path)?;

        *slots = next;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: SessionKey) -> Option<String> {
        self.slots.read().get(key.as_str()).cloned()
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), Error> {
        self.update(|slots| {
            slots.insert(key.as_str().to_string(), value.to_string());
        })
    }

    fn clear(&self) -> Result<(), Error> {
        self.update(|slots| {
            slots.remove(SessionKey::Access.as_str());
            slots.remove(SessionKey::Refresh.as_str());
        })
    }

    fn save(&self, pair: &CredentialPair) -> Result<(), Error> {
        self.update(|slots| {
            slots.insert(
                SessionKey::Access.as_str().to_string(),
                pair.access_token.clone(),
            );
            match &pair.refresh_token {
                Some(refresh) => {
                    slots.insert(SessionKey::Refresh.as_str().to_string(), refresh.clone());
                }
                None => {
                    slots.remove(SessionKey::Refresh.as_str());
                }
            }
        })
    }
}
