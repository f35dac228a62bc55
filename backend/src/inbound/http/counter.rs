//! Counter API handler.
//!
//! ```text
//! POST /counter  -> {"hits": 1}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::ports::CounterCacheError;
use crate::domain::{CounterKey, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Response body for `POST /counter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HitsResponse {
    /// Counter value after this increment.
    #[schema(example = 1)]
    pub hits: i64,
}

pub(crate) fn map_counter_error(err: CounterCacheError) -> Error {
    error!(error = %err, "counter increment failed");
    match err {
        CounterCacheError::Connection { .. } => {
            Error::service_unavailable("Counter cache unavailable")
        }
        other => Error::internal(other.to_string()),
    }
}

/// Increment the `hits` counter and return its new value.
///
/// Accepts and ignores any request body.
#[utoipa::path(
    post,
    path = "/counter",
    responses(
        (status = 200, description = "Counter incremented", body = HitsResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Counter cache unavailable", body = ErrorSchema)
    ),
    tags = ["counter"],
    operation_id = "incrementCounter"
)]
#[post("/counter")]
pub async fn increment_counter(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<HitsResponse>> {
    let hits = state
        .counter
        .increment(&CounterKey::hits())
        .await
        .map_err(map_counter_error)?;
    Ok(web::Json(HitsResponse { hits }))
}
