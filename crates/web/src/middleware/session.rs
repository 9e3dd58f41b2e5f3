//! Session layer construction.
//!
//! Sessions hold only the cart and the admin flag, neither of which must
//! survive a restart, so the in-memory store is sufficient - there is
//! deliberately no offline persistence of cart state across sessions.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Create the tower-sessions layer backed by the in-memory store.
#[must_use]
pub fn create_session_layer() -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name("gung_corner_session")
        // Session cookie, dropped when the browser closes
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(false)
}
