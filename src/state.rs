/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: AuthService (起動後は read-only), users: UserStore
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::user_repo::UserStore;
use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: UserStore,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, users: UserStore) -> Self {
        Self { auth, users }
    }
}
