use std::collections::HashMap;

use companion_core::{UserConfig, ValidationError};
use companion_journal::AuthorId;
use parking_lot::RwLock;
use thiserror::Error;

/// Authentication errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// The presented key belongs to no user.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("User already registered: {0}")]
    DuplicateUser(String),

    /// The key is already assigned to another user.
    #[error("API key already in use")]
    DuplicateApiKey,

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Invalid user id: {0}")]
    InvalidUserId(#[from] ValidationError),
}

impl AuthError {
    /// Returns a user-friendly message suitable for an API response.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::Unauthorized => "Missing or invalid API key.",
            AuthError::DuplicateUser(_) => "That user is already registered.",
            AuthError::DuplicateApiKey => "That API key is already in use.",
            AuthError::UnknownUser(_) => "That user is not registered.",
            AuthError::InvalidUserId(_) => "Invalid user identifier.",
        }
    }
}

/// Resolves a presented API key to the author it belongs to.
pub trait Authenticator: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthorized`] if the key is unknown.
    fn resolve(&self, api_key: &str) -> Result<AuthorId, AuthError>;
}

#[derive(Debug, Default)]
struct Users {
    by_key: HashMap<String, AuthorId>,
    keys: HashMap<AuthorId, String>,
}

/// In-memory table of (user, API key) pairs.
///
/// Both user ids and keys are unique.
#[derive(Debug, Default)]
pub struct ApiKeyRegistry {
    users: RwLock<Users>,
}

impl ApiKeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the `[[users]]` configuration table.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid user id or duplicate user or key.
    pub fn from_config(users: &[UserConfig]) -> Result<Self, AuthError> {
        let registry = Self::new();
        for user in users {
            let author = AuthorId::new(user.user_id.as_str())?;
            registry.add_user(author, user.api_key.as_str())?;
        }
        tracing::info!("Loaded {} API users", registry.len());
        Ok(registry)
    }

    /// Register a user with their API key.
    ///
    /// # Errors
    ///
    /// [`AuthError::DuplicateUser`] if the user is already registered,
    /// [`AuthError::DuplicateApiKey`] if the key is taken.
    pub fn add_user(&self, user: AuthorId, api_key: impl Into<String>) -> Result<(), AuthError> {
        let api_key = api_key.into();
        let mut users = self.users.write();

        if users.keys.contains_key(&user) {
            return Err(AuthError::DuplicateUser(user.to_string()));
        }
        if users.by_key.contains_key(&api_key) {
            return Err(AuthError::DuplicateApiKey);
        }

        tracing::debug!("Registered API user: {}", user);
        users.by_key.insert(api_key.clone(), user.clone());
        users.keys.insert(user, api_key);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AuthError::UnknownUser`] if the user is not registered.
    pub fn get_api_key(&self, user: &AuthorId) -> Result<String, AuthError> {
        self.users
            .read()
            .keys
            .get(user)
            .cloned()
            .ok_or_else(|| AuthError::UnknownUser(user.to_string()))
    }

    pub fn len(&self) -> usize {
        self.users.read().keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().keys.is_empty()
    }
}

impl Authenticator for ApiKeyRegistry {
    fn resolve(&self, api_key: &str) -> Result<AuthorId, AuthError> {
        let resolved = self.users.read().by_key.get(api_key).cloned();
        match resolved {
            Some(author) => Ok(author),
            None => {
                tracing::warn!("Rejected unknown API key");
                Err(AuthError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn author(id: &str) -> AuthorId {
        AuthorId::new(id).unwrap()
    }

    fn user(id: &str, key: &str) -> UserConfig {
        UserConfig {
            user_id: id.to_string(),
            api_key: key.to_string(),
        }
    }

    #[test]
    fn test_resolve_known_key() {
        let registry = ApiKeyRegistry::new();
        registry.add_user(author("alice"), "key-a").unwrap();

        assert_eq!(registry.resolve("key-a").unwrap(), author("alice"));
        assert_eq!(registry.get_api_key(&author("alice")).unwrap(), "key-a");
    }

    #[test]
    fn test_resolve_unknown_key() {
        let registry = ApiKeyRegistry::new();
        registry.add_user(author("alice"), "key-a").unwrap();

        assert_eq!(registry.resolve("key-b"), Err(AuthError::Unauthorized));
        assert_eq!(registry.resolve(""), Err(AuthError::Unauthorized));
    }

    #[test]
    fn test_duplicates_rejected() {
        let registry = ApiKeyRegistry::new();
        registry.add_user(author("alice"), "key-a").unwrap();

        assert_eq!(
            registry.add_user(author("alice"), "key-other"),
            Err(AuthError::DuplicateUser("alice".to_string()))
        );
        assert_eq!(
            registry.add_user(author("bob"), "key-a"),
            Err(AuthError::DuplicateApiKey)
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_user_key() {
        let registry = ApiKeyRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.get_api_key(&author("nobody")),
            Err(AuthError::UnknownUser(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let registry =
            ApiKeyRegistry::from_config(&[user("alice", "key-a"), user("bob", "key-b")]).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve("key-b").unwrap(), author("bob"));
    }

    #[test]
    fn test_from_config_invalid_user_id() {
        let result = ApiKeyRegistry::from_config(&[user("not valid", "key")]);
        assert!(matches!(
            result,
            Err(AuthError::InvalidUserId(
                ValidationError::AuthorIdContainsWhitespace
            ))
        ));
    }

    #[test]
    fn test_from_config_duplicate_key() {
        let result = ApiKeyRegistry::from_config(&[user("alice", "same"), user("bob", "same")]);
        assert!(matches!(result, Err(AuthError::DuplicateApiKey)));
    }
}
