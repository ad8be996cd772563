//! Axum extractor that validates JSON bodies against a schema
//!
//! ```ignore
//! async fn register(Validated(user): Validated<UserCreate>) -> impl IntoResponse { ... }
//! ```

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

use crate::error::AppError;
use crate::schemas::Schema;

/// A request body that passed validation for `T`
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Schema + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

        tracing::debug!(schema = T::NAME, "validating request body");
        let record = T::parse_value(body)?;
        Ok(Validated(record))
    }
}
