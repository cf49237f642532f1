/*
 * Responsibility
 * - users の in-memory ストア (永続化なし)
 * - RwLock で所有権を明示 (writer は常に 1 つ)
 * - id / email の一意性を保証し、違反は RepoError::Conflict で返す
 * - update の判定順: 存在 → email 重複 → id 変更
 */
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Process-local user table. Cheap to clone; clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Users in insertion order.
    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn get(&self, id: i64) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    pub async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;

        // Id takes precedence when both collide with the same existing user.
        if let Some(existing) = users
            .iter()
            .find(|u| u.id == user.id || u.email == user.email)
        {
            return Err(if existing.id == user.id {
                RepoError::conflict_id(user.id)
            } else {
                RepoError::conflict_email(&user.email)
            });
        }

        users.push(user.clone());
        Ok(user)
    }

    /// `new_id` is the id the caller asked for, if any; it must equal `id`.
    pub async fn update(
        &self,
        id: i64,
        new_id: Option<i64>,
        name: &str,
        email: &str,
    ) -> Result<User, RepoError> {
        let mut users = self.users.write().await;

        let idx = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(RepoError::NotFound)?;

        if users.iter().any(|u| u.id != id && u.email == email) {
            return Err(RepoError::conflict_email(email));
        }
        if new_id.is_some_and(|new_id| new_id != id) {
            return Err(RepoError::IdChanged { current: id });
        }

        let user = &mut users[idx];
        user.name = name.to_string();
        user.email = email.to_string();

        Ok(user.clone())
    }

    pub async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut users = self.users.write().await;

        let idx = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(RepoError::NotFound)?;
        users.remove(idx);

        Ok(())
    }
}
