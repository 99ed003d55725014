use std::fmt;

use crate::errors::Error;

/// The two persisted slots of a client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionKey {
    Access,
    Refresh,
}

impl SessionKey {
    /// Storage key as persisted on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::Access => "token",
            SessionKey::Refresh => "refresh",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Key-value storage for the session credentials.
///
/// Implementations must make `save` and `clear` atomic with respect to
/// `get`, so a reader never observes half of a pair update.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: SessionKey) -> Option<String>;

    fn set(&self, key: SessionKey, value: &str) -> Result<(), Error>;

    /// Removes both credentials.
    fn clear(&self) -> Result<(), Error>;

    /// Replaces both slots at once; a pair without a refresh token removes
    /// any stored one.
    fn save(&self, pair: &CredentialPair) -> Result<(), Error>;

    fn credentials(&self) -> Option<CredentialPair> {
        let access_token = self.get(SessionKey::Access)?;
        Some(CredentialPair {
            access_token,
            refresh_token: self.get(SessionKey::Refresh),
        })
    }
}
