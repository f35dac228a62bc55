//! Shared helpers for the end-to-end suite.
//!
//! The suite talks to a running service at `API_URL` (for example
//! `http://localhost:8000`). When the variable is unset the tests print a
//! `SKIP-E2E` marker and return, so `cargo test` stays green on machines
//! without the compose stack.

use std::time::Duration;

use reqwest::{Client, StatusCode};

/// Number of `/health` polls before the service is declared unavailable.
pub const READINESS_ATTEMPTS: u32 = 30;
/// Delay between `/health` polls.
pub const READINESS_DELAY: Duration = Duration::from_secs(1);

/// Handle on a ready service.
pub struct Api {
    pub client: Client,
    base: String,
}

impl Api {
    /// Absolute URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

/// Returns the base URL from `API_URL`, trimmed of any trailing slash.
fn api_url() -> Option<String> {
    std::env::var("API_URL")
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_owned())
        .filter(|value| !value.is_empty())
}

/// Connect to the service, or return `None` after printing a skip marker.
///
/// Panics when `API_URL` is set but the service never becomes healthy, so CI
/// breakage is not masked.
pub async fn connect(test_name: &str) -> Option<Api> {
    let Some(base) = api_url() else {
        eprintln!("SKIP-E2E: {test_name}: API_URL is not set");
        return None;
    };
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("reqwest client builds");
    let api = Api { client, base };
    wait_until_ready(&api).await;
    Some(api)
}

async fn wait_until_ready(api: &Api) {
    let url = api.url("/health");
    for _ in 0..READINESS_ATTEMPTS {
        if let Ok(response) = api.client.get(&url).send().await {
            if response.status() == StatusCode::OK {
                return;
            }
        }
        tokio::time::sleep(READINESS_DELAY).await;
    }
    panic!(
        "service at {url} did not become healthy after {READINESS_ATTEMPTS} attempts"
    );
}

/// Status the service answers with for a duplicate email, following the
/// `APP_CREATE_USER_ERRORS` value the stack was started with.
pub fn expected_duplicate_status() -> StatusCode {
    match std::env::var("APP_CREATE_USER_ERRORS").as_deref() {
        Ok("distinct") => StatusCode::CONFLICT,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// An email address no earlier run has used.
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", uuid::Uuid::new_v4().simple())
}
