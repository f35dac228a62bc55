//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for the error response body.
///
/// `detail` is a string, or an array of [`FieldViolationSchema`] entries for
/// 422 responses.
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message or list of field violations.
    #[schema(value_type = Object, example = "Could not create user")]
    detail: serde_json::Value,
}

/// OpenAPI schema for one entry of a validation failure `detail` array.
#[derive(ToSchema)]
#[schema(as = FieldViolation)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldViolationSchema {
    /// Request field that failed validation.
    #[schema(example = "email")]
    field: String,
    /// Human-readable explanation.
    #[schema(example = "email must be a valid email address")]
    message: String,
    /// Stable machine-readable violation code.
    #[schema(example = "invalid_email")]
    code: String,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-assigned identifier.
    #[schema(example = 1, minimum = 1)]
    id: i32,
    /// Unique email address.
    #[schema(example = "ada@example.com")]
    email: String,
    /// User name.
    #[schema(example = "Ada Lovelace")]
    name: String,
}
