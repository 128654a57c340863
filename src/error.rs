//! HTTP-facing error type.
//!
//! Every handler returns `Result<_, AppError>`. The error renders as
//! `{"code": "...", "message": "..."}` with a matching status code; internal
//! failures are logged here and never expose their cause to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::domain::storage::StorageError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: Value::Null,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Builds a mapper that logs a storage failure and replaces it with a
    /// generic 500 carrying `message`.
    ///
    /// ```rust,ignore
    /// let cards = state.storage.get_all_gift_cards().await
    ///     .map_err(AppError::storage("Failed to fetch gift cards"))?;
    /// ```
    pub fn storage(message: &'static str) -> impl FnOnce(StorageError) -> AppError {
        move |e| {
            tracing::error!(error = %e, "{}", message);
            AppError::internal(message)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { message, .. }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation { message, details } => ErrorBody {
                code: "validation_error",
                message,
                details,
            },
            AppError::NotFound { message } => ErrorBody {
                code: "not_found",
                message,
                details: Value::Null,
            },
            AppError::Internal { message } => ErrorBody {
                code: "internal_error",
                message,
                details: Value::Null,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        AppError::Validation {
            message: format!("Validation error: {}", describe_validation(&errors)),
            details,
        }
    }
}

/// Flattens validator output into `field: message` pairs joined by `"; "`.
///
/// Nested structs are reported with dotted paths (`urls.email`).
pub fn describe_validation(errors: &ValidationErrors) -> String {
    let mut parts = Vec::new();
    collect_validation(errors, "", &mut parts);
    parts.sort();
    parts.join("; ")
}

fn collect_validation(errors: &ValidationErrors, prefix: &str, parts: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let text = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", error.code));
                    parts.push(format!("{path}: {text}"));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_validation(nested, &path, parts),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation(nested, &format!("{path}[{index}]"), parts);
                }
            }
        }
    }
}
