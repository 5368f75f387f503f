pub mod error;
pub mod session;

pub use error::ApiError;
pub use session::{MemorySession, SessionStore};
