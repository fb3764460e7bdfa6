//! `ValidatedJson<T>`: a `Json<T>` replacement that validates and sanitizes
//! the body against the rule set of `T` before the handler runs.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::validators::{validate_language_code, validate_language_code_optional, validate_text};
use crate::error::{ApiError, FieldError};
use crate::utils::{sanitize, sanitize_optional};

/// Request types built from a raw JSON body
///
/// Implementations read every field through a [`FieldValidator`] so that all
/// violations are collected before failing.
pub trait Validatable: Sized {
    fn from_body(body: &Value) -> Result<Self, Vec<FieldError>>;
}

pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: Validatable,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Rejected(rejection.status(), rejection.body_text()))?;

        // An absent body is validated as `{}` so each missing field is reported
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(&bytes).map_err(|e| {
                ApiError::Validation(vec![FieldError::new(
                    "body",
                    format!("Request body must be valid JSON: {}", e),
                )])
            })?
        };

        T::from_body(&body).map(ValidatedJson).map_err(ApiError::Validation)
    }
}

/// `Path<T>` whose rejection is reported through [`ApiError`]
pub struct PathParam<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| PathParam(value))
            .map_err(|rejection| ApiError::Rejected(rejection.status(), rejection.body_text()))
    }
}

/// Accumulates field errors while reading a JSON body
///
/// Each accessor validates its field, records a violation if there is one,
/// and returns the sanitized value (empty when the field was rejected).
pub struct FieldValidator<'a> {
    body: &'a Value,
    errors: Vec<FieldError>,
}

impl<'a> FieldValidator<'a> {
    pub fn new(body: &'a Value) -> Self {
        Self {
            body,
            errors: Vec::new(),
        }
    }

    /// Blank after sanitizing counts as missing
    pub fn text(&mut self, field: &str) -> String {
        let value = match validate_text(self.body.get(field), field) {
            Ok(value) => sanitize(value),
            Err(message) => return self.reject(field, message),
        };
        if value.is_empty() {
            return self.reject(field, format!("{} is required", field));
        }
        value
    }

    pub fn language_code(&mut self, field: &str) -> String {
        match validate_language_code(self.body.get(field), field) {
            Ok(value) => sanitize(value),
            Err(message) => self.reject(field, message),
        }
    }

    pub fn optional_language_code(&mut self, field: &str) -> Option<String> {
        match validate_language_code_optional(self.body.get(field), field) {
            Ok(value) => sanitize_optional(value),
            Err(message) => {
                self.reject(field, message);
                None
            }
        }
    }

    /// Finish reading; `Err` carries every violation in field order
    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    fn reject(&mut self, field: &str, message: String) -> String {
        self.errors.push(FieldError::new(field, message));
        String::new()
    }
}
