//! Users API handlers.
//!
//! ```text
//! POST /users {"email":"ada@example.com","name":"Ada Lovelace"}
//! GET /users
//! ```

use std::fmt;
use std::str::FromStr;

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::domain::ports::UserPersistenceError;
use crate::domain::{EmailAddress, Error, NewUser, User, UserName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, FieldViolation, missing_field, unprocessable,
};

/// Message returned for any repository failure in collapsed mode.
pub const CREATE_USER_FAILED: &str = "Could not create user";

const USER_STORE_UNAVAILABLE: &str = "User store unavailable";
const EMAIL: FieldName = FieldName::new("email");
const NAME: FieldName = FieldName::new("name");

/// How repository failures on `POST /users` are reported to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CreateUserErrorMode {
    /// Every repository failure, duplicates included, is a 400.
    #[default]
    Collapsed,
    /// Duplicates are 409, an unreachable store is 503, anything else 500.
    Distinct,
}

/// Error returned when parsing an unknown [`CreateUserErrorMode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown create-user error mode {0:?}; expected \"collapsed\" or \"distinct\"")]
pub struct ParseCreateUserErrorModeError(String);

impl FromStr for CreateUserErrorMode {
    type Err = ParseCreateUserErrorModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collapsed" => Ok(Self::Collapsed),
            "distinct" => Ok(Self::Distinct),
            _ => Err(ParseCreateUserErrorModeError(s.to_owned())),
        }
    }
}

impl fmt::Display for CreateUserErrorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Collapsed => "collapsed",
            Self::Distinct => "distinct",
        })
    }
}

/// Request body for `POST /users`.
///
/// Both fields are optional at the serde level so a missing field is reported
/// alongside other violations rather than aborting extraction.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
}

impl CreateUserRequest {
    /// Validate the payload into a [`NewUser`], reporting every violation.
    pub(crate) fn validate(self) -> Result<NewUser, Error> {
        let Self { email, name } = self;
        match (email, name) {
            (Some(email), Some(name)) => NewUser::try_from_parts(email, name).map_err(|errs| {
                unprocessable(errs.into_iter().map(FieldViolation::from).collect())
            }),
            (email, name) => {
                let mut violations = Vec::new();
                match email {
                    Some(email) => {
                        violations.extend(EmailAddress::new(email).err().map(FieldViolation::from));
                    }
                    None => violations.push(missing_field(EMAIL)),
                }
                match name {
                    Some(name) => {
                        violations.extend(UserName::new(name).err().map(FieldViolation::from));
                    }
                    None => violations.push(missing_field(NAME)),
                }
                Err(unprocessable(violations))
            }
        }
    }
}

/// Translate a repository failure on create according to `mode`.
pub(crate) fn map_create_error(err: UserPersistenceError, mode: CreateUserErrorMode) -> Error {
    match (&err, mode) {
        (UserPersistenceError::DuplicateEmail { .. }, CreateUserErrorMode::Collapsed) => {
            debug!(error = %err, "create user rejected");
            Error::invalid_request(CREATE_USER_FAILED)
        }
        (_, CreateUserErrorMode::Collapsed) => {
            warn!(error = %err, "create user failed");
            Error::invalid_request(CREATE_USER_FAILED)
        }
        (UserPersistenceError::DuplicateEmail { .. }, CreateUserErrorMode::Distinct) => {
            debug!(error = %err, "create user rejected");
            Error::conflict("A user with this email already exists")
        }
        (UserPersistenceError::Connection { .. }, CreateUserErrorMode::Distinct) => {
            error!(error = %err, "user store unreachable");
            Error::service_unavailable(USER_STORE_UNAVAILABLE)
        }
        (UserPersistenceError::Query { .. }, CreateUserErrorMode::Distinct) => {
            error!(error = %err, "create user failed");
            Error::internal(err.to_string())
        }
    }
}

pub(crate) fn map_list_error(err: UserPersistenceError) -> Error {
    error!(error = %err, "list users failed");
    match err {
        UserPersistenceError::Connection { .. } => {
            Error::service_unavailable(USER_STORE_UNAVAILABLE)
        }
        other => Error::internal(other.to_string()),
    }
}

/// Create a user.
///
/// The body is validated before the repository is touched. Uniqueness of the
/// email is left to the store.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Could not create user", body = ErrorSchema),
        (
            status = 409,
            description = "Email already registered (distinct mode)",
            body = ErrorSchema
        ),
        (status = 422, description = "Request validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "User store unavailable (distinct mode)", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = payload.into_inner().validate()?;
    let user = state
        .users
        .create(&new_user)
        .await
        .map_err(|err| map_create_error(err, state.create_user_errors))?;
    Ok(HttpResponse::Created().json(user))
}

/// List every user in store order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list().await.map_err(map_list_error)?;
    Ok(web::Json(users))
}

#[cfg(test)]
mod tests;
