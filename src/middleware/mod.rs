/*
 * Responsibility
 * - middleware の公開インターフェース
 * - http: 全 route 共通 (request id / access log / timeout / panic → 500)
 * - auth: access token gate (保護対象の router にだけ掛ける)
 */
pub mod auth;
pub mod http;
