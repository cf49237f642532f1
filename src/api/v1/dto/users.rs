/*
 * Responsibility
 * - Users の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use serde::{Deserialize, Serialize};

use crate::repos::user_repo::User;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub id: i64,
    // Optional so a missing field is reported by validate(), not the JSON extractor.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_name_and_email(self.name.as_deref(), self.email.as_deref())
    }

    /// Call after `validate()`.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    // When present it must equal the path id.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_name_and_email(self.name.as_deref(), self.email.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

fn validate_name_and_email(name: Option<&str>, email: Option<&str>) -> Result<(), &'static str> {
    if name.is_none_or(|n| n.trim().is_empty()) {
        return Err("Invalid input: Name is required.");
    }
    if !email.is_some_and(is_valid_email) {
        return Err("Invalid input: A valid email is required.");
    }
    Ok(())
}

/// Shape check only: `local@domain`, one `@`, no whitespace.
///
/// A single-label host such as `localhost` is a valid domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain.split('.').all(|l| {
        !l.is_empty()
            && !l.starts_with('-')
            && !l.ends_with('-')
            && l.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
