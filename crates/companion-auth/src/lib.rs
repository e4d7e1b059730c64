//! API-key authentication for Weather Companion.
//!
//! Callers present an API key; an [`Authenticator`] resolves it to the
//! [`AuthorId`](companion_journal::AuthorId) that owns journal entries and
//! bookmarks.

pub mod registry;

pub use registry::{ApiKeyRegistry, AuthError, Authenticator};

