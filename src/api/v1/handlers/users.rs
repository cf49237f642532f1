/*
 * Responsibility
 * - /users 系 CRUD handler
 * - Path/Json を extractor で受け、DTO validation → UserStore 呼び出し
 * - 認証は middleware 済み。ここでは AuthCtx を監査ログにだけ使う
 * - update の判定順: 404 → 400 (入力) → 409 (email) → 400 (id 変更)
 */
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    api::v1::{
        dto::users::{CreateUserRequest, UpdateUserRequest, UserResponse},
        extractors::{ApiJson, ApiPath, AuthCtxExtractor},
    },
    error::AppError,
    state::AppState,
};

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserResponse>> {
    let users = state.users.list().await;

    Json(users.into_iter().map(UserResponse::from).collect())
}

pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .users
        .get(user_id)
        .await
        .ok_or(AppError::not_found("User"))?;

    Ok(Json(user.into()))
}

pub async fn create_user(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<Response, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_INPUT", msg))?;

    let user = state.users.create(req.into_user()).await?;
    tracing::info!(
        user_id = user.id,
        actor = auth.subject_or_dash(),
        token_exp = ?auth.claims.exp,
        "user created"
    );

    let location = format!("/api/v1/users/{}", user.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(UserResponse::from(user)),
    )
        .into_response())
}

pub async fn update_user(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<StatusCode, AppError> {
    state
        .users
        .get(user_id)
        .await
        .ok_or(AppError::not_found("User"))?;

    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_INPUT", msg))?;

    let name = req.name.as_deref().unwrap_or_default();
    let email = req.email.as_deref().unwrap_or_default();
    state.users.update(user_id, req.id, name, email).await?;
    tracing::info!(
        user_id,
        actor = auth.subject_or_dash(),
        token_exp = ?auth.claims.exp,
        "user updated"
    );

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_user(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    state.users.delete(user_id).await?;
    tracing::info!(
        user_id,
        actor = auth.subject_or_dash(),
        token_exp = ?auth.claims.exp,
        "user deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
