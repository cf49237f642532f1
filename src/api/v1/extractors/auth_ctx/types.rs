/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - claims の業務的な意味はここでは解釈しない
 */

use crate::services::auth::AccessTokenClaims;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `subject` は token の `sub` (無い token もある)
/// - `claims` は検証済み payload をそのまま保持する
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub subject: Option<String>,
    pub claims: AccessTokenClaims,
}

impl AuthCtx {
    pub fn new(claims: AccessTokenClaims) -> Self {
        Self {
            subject: claims.sub.clone(),
            claims,
        }
    }

    /// Subject for log fields; `-` when the token carries none.
    pub fn subject_or_dash(&self) -> &str {
        self.subject.as_deref().unwrap_or("-")
    }
}
