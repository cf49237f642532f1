//! access token（HS256 JWT）検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` 以外は全て「token なし」として扱う
//! - scheme は大文字小文字を区別する (`bearer` は不可)
//! - 拒否理由はログにだけ残し、client には常に同じ 401 を返す
//! - route ごとの除外はしない。公開 route は routing 側で gate の外に置く

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{Rejection, Verification};
use crate::state::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// `/api/v1/*` に認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let verification = match bearer_token(req.headers()) {
        Some(token) => state.auth.verify(token),
        None => Verification::Rejected(Rejection::Missing),
    };

    let claims = match verification {
        Verification::Valid(claims) => claims,
        Verification::Rejected(reason) => {
            tracing::warn!(
                %reason,
                method = %req.method(),
                path = %req.uri().path(),
                "access token verification failed"
            );
            return Err(AppError::Unauthorized);
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(claims));

    Ok(next.run(req).await)
}

/// `Authorization` の最初の値から token 部分を取り出す。
///
/// 最初の空白で scheme と token に分ける。token 側は trim しない。
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    (scheme == BEARER_SCHEME).then_some(token)
}
