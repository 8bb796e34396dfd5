use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// User entity - an account that can author posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Usernames are 3 to 20 ASCII letters or digits.
    pub fn validate_username(username: &str) -> Result<(), DomainError> {
        let len = username.len();
        if !(3..=20).contains(&len) || !username.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::Validation(
                "Username must be 3-20 letters or digits".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(User::validate_username("velo").is_ok());
        assert!(User::validate_username("ab").is_err());
        assert!(User::validate_username("has space").is_err());
        assert!(User::validate_username(&"x".repeat(21)).is_err());
    }
}
