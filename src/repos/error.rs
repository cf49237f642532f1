/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Id,
    Email,
}

impl fmt::Display for ConflictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictField::Id => f.write_str("Id"),
            ConflictField::Email => f.write_str("Email"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoError {
    #[error("not found")]
    NotFound,
    #[error("conflict on {field} {value}")]
    Conflict { field: ConflictField, value: String },
    #[error("id {current} cannot be changed")]
    IdChanged { current: i64 },
}

impl RepoError {
    pub fn conflict_id(id: i64) -> Self {
        RepoError::Conflict {
            field: ConflictField::Id,
            value: id.to_string(),
        }
    }

    pub fn conflict_email(email: &str) -> Self {
        RepoError::Conflict {
            field: ConflictField::Email,
            value: email.to_string(),
        }
    }
}
