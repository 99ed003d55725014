mod file;
mod guard;
mod memory;
mod store;

pub use file::FileSessionStore;
pub use guard::{SessionGuard, SessionGuardResult};
pub use memory::InMemorySessionStore;
pub use store::{CredentialPair, SessionKey, SessionStore};
