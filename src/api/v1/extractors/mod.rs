mod auth_ctx;
mod json;
mod path;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use json::ApiJson;
pub use path::ApiPath;
