use std::sync::RwLock;
use tracing::debug;

/// Storage for the bearer token issued at login.
///
/// Network services read the token at the start of every request rather than
/// caching it, so a logout or refresh mid-session is picked up on the next
/// call.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str);
    fn clear(&self);
}

/// Process-local session store.
#[derive(Default)]
pub struct MemorySession {
    token: RwLock<Option<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn set_token(&self, token: &str) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.to_string());
        }
    }

    fn clear(&self) {
        debug!("Clearing stored session token");
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}
