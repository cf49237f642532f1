/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::AuthService;

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    tracing::info!(
        algorithm = ?crate::services::auth::access_jwt::ACCESS_TOKEN_ALGORITHM,
        leeway_seconds = config.access_token_leeway_seconds,
        "access token verification configured"
    );

    Arc::new(AuthService::new(
        config.access_jwt_secret.clone(),
        config.access_token_leeway_seconds,
    ))
}
