/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /users を束ねる。ここにある route は全て access token gate の内側に置かれる
 * - 公開 route (/health) は app.rs 側で gate の外に置く
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::users::{
    create_user, delete_user, get_user, list_users, update_user,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
