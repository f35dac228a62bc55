//! HTTP inbound adapter exposing REST endpoints.

pub mod counter;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::{HttpResponse, web};

pub use error::ApiResult;

use crate::domain::Error;

/// JSON extractor configuration shared by every route: body extraction
/// failures become 422 responses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(validation::json_error_handler)
}

/// Fallback for unmatched routes, answering 404 `{"detail":"Not Found"}`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::not_found;
///
/// let app = App::new().default_service(web::to(not_found));
/// ```
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("Not Found"))
}
