/*
 * Responsibility
 * - axum::Json の rejection を AppError (JSON envelope の 400) に揃える
 * - 本文の意味チェックは DTO の validate() 側
 */
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// `Json<T>` whose failures come back as `AppError::BadRequest`.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err: JsonRejection| {
                let message = match err {
                    JsonRejection::JsonDataError(e) => format!("Invalid input: {}", e.body_text()),
                    JsonRejection::JsonSyntaxError(e) => {
                        format!("Malformed JSON: {}", e.body_text())
                    }
                    JsonRejection::MissingJsonContentType(_) => {
                        "Expected request with `Content-Type: application/json`".to_string()
                    }
                    other => other.body_text(),
                };
                AppError::bad_request("INVALID_BODY", message)
            })?;

        Ok(ApiJson(value))
    }
}
