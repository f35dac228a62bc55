//! Service settings loaded via OrthoConfig.
//!
//! Every value may come from `APP_*` environment variables or the command
//! line. The unprefixed `DATABASE_URL` and `REDIS_HOST` used by older
//! deployments are honoured when the prefixed variables are absent.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::inbound::http::users::{CreateUserErrorMode, ParseCreateUserErrorModeError};

pub(crate) const DEFAULT_DATABASE_URL: &str = "postgres://postgres:postgres@db:5432/postgres";
pub(crate) const DEFAULT_REDIS_HOST: &str = "redis";
pub(crate) const DEFAULT_REDIS_PORT: u16 = 6379;
pub(crate) const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub(crate) const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

/// Errors raised while loading or interpreting settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(String),
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    ErrorMode(#[from] ParseCreateUserErrorModeError),
}

/// Configuration values controlling the service at start-up.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APP")]
pub struct ServerSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Full Redis URL; takes precedence over host and port.
    pub redis_url: Option<String>,
    /// Redis host name.
    pub redis_host: Option<String>,
    /// Redis port.
    pub redis_port: Option<u16>,
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// `collapsed` or `distinct`.
    pub create_user_errors: Option<String>,
    /// Upper bound on pooled PostgreSQL connections.
    pub db_max_connections: Option<u32>,
    /// Idle PostgreSQL connections the pool keeps open.
    pub db_min_idle: Option<u32>,
    /// Upper bound on pooled Redis connections.
    pub cache_max_connections: Option<u32>,
    /// Seconds `/health/live` reports 503 before the listener stops.
    pub shutdown_grace_secs: Option<u64>,
    /// Serve from process memory instead of PostgreSQL and Redis.
    #[ortho_config(default = false)]
    pub in_memory: bool,
}

fn legacy_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl ServerSettings {
    /// Load settings from the process environment and arguments.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::load().map_err(|err| SettingsError::Load(err.to_string()))
    }

    /// Database URL, falling back to `DATABASE_URL` and then the default.
    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .or_else(|| legacy_var("DATABASE_URL"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned())
    }

    /// Redis URL, built from host and port unless given explicitly.
    pub fn redis_url(&self) -> String {
        if let Some(url) = &self.redis_url {
            return url.clone();
        }
        let host = self
            .redis_host
            .clone()
            .or_else(|| legacy_var("REDIS_HOST"))
            .unwrap_or_else(|| DEFAULT_REDIS_HOST.to_owned());
        let port = self.redis_port.unwrap_or(DEFAULT_REDIS_PORT);
        format!("redis://{host}:{port}/")
    }

    /// Parsed bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Parsed create-user error mode.
    pub fn create_user_errors(&self) -> Result<CreateUserErrorMode, SettingsError> {
        match self.create_user_errors.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(CreateUserErrorMode::default()),
        }
    }

    /// Delay between failing liveness and stopping the listener on shutdown.
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs.unwrap_or(DEFAULT_SHUTDOWN_GRACE_SECS))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and legacy fallbacks.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 13] = [
        "APP_DATABASE_URL",
        "APP_REDIS_URL",
        "APP_REDIS_HOST",
        "APP_REDIS_PORT",
        "APP_BIND_ADDR",
        "APP_CREATE_USER_ERRORS",
        "APP_DB_MAX_CONNECTIONS",
        "APP_DB_MIN_IDLE",
        "APP_CACHE_MAX_CONNECTIONS",
        "APP_SHUTDOWN_GRACE_SECS",
        "APP_IN_MEMORY",
        "DATABASE_URL",
        "REDIS_HOST",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("e2e-backend")])
            .expect("config should load")
    }

    fn env_with(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(settings.redis_url(), "redis://redis:6379/");
        assert_eq!(
            settings.bind_addr().expect("default bind address parses"),
            "0.0.0.0:8000".parse::<SocketAddr>().expect("literal parses")
        );
        assert_eq!(
            settings.create_user_errors().expect("default mode"),
            CreateUserErrorMode::Collapsed
        );
        assert!(!settings.in_memory);
        assert_eq!(settings.db_min_idle, None);
        assert_eq!(settings.shutdown_grace(), Duration::from_secs(5));
    }

    #[rstest]
    fn prefixed_variables_are_respected() {
        let _guard = lock_env(env_with(&[
            ("APP_DATABASE_URL", "postgres://app@pg/app"),
            ("APP_REDIS_HOST", "cache"),
            ("APP_REDIS_PORT", "6380"),
            ("APP_BIND_ADDR", "127.0.0.1:9000"),
            ("APP_CREATE_USER_ERRORS", "distinct"),
            ("APP_DB_MAX_CONNECTIONS", "4"),
            ("APP_DB_MIN_IDLE", "2"),
            ("APP_SHUTDOWN_GRACE_SECS", "0"),
            ("APP_IN_MEMORY", "true"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url(), "postgres://app@pg/app");
        assert_eq!(settings.redis_url(), "redis://cache:6380/");
        assert_eq!(
            settings.bind_addr().expect("bind address parses").port(),
            9000
        );
        assert_eq!(
            settings.create_user_errors().expect("mode parses"),
            CreateUserErrorMode::Distinct
        );
        assert_eq!(settings.db_max_connections, Some(4));
        assert_eq!(settings.db_min_idle, Some(2));
        assert_eq!(settings.shutdown_grace(), Duration::ZERO);
        assert!(settings.in_memory);
    }

    #[rstest]
    fn legacy_variables_fill_gaps() {
        let _guard = lock_env(env_with(&[
            ("DATABASE_URL", "postgres://legacy@pg/legacy"),
            ("REDIS_HOST", "legacy-redis"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url(), "postgres://legacy@pg/legacy");
        assert_eq!(settings.redis_url(), "redis://legacy-redis:6379/");
    }

    #[rstest]
    fn prefixed_variables_win_over_legacy_ones() {
        let _guard = lock_env(env_with(&[
            ("APP_DATABASE_URL", "postgres://app@pg/app"),
            ("DATABASE_URL", "postgres://legacy@pg/legacy"),
            ("APP_REDIS_URL", "redis://explicit:1234/2"),
            ("REDIS_HOST", "legacy-redis"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url(), "postgres://app@pg/app");
        assert_eq!(settings.redis_url(), "redis://explicit:1234/2");
    }

    #[derive(Debug, Clone, Copy)]
    enum Accessor {
        BindAddr,
        CreateUserErrors,
    }

    #[rstest]
    #[case("APP_BIND_ADDR", "not-an-address", Accessor::BindAddr)]
    #[case("APP_CREATE_USER_ERRORS", "strict", Accessor::CreateUserErrors)]
    fn malformed_values_are_reported(
        #[case] name: &str,
        #[case] value: &str,
        #[case] rejected_by: Accessor,
    ) {
        let _guard = lock_env(env_with(&[(name, value)]));

        let settings = load_from_empty_args();
        let bind = settings.bind_addr();
        let mode = settings.create_user_errors();
        match rejected_by {
            Accessor::BindAddr => {
                assert!(matches!(
                    bind,
                    Err(SettingsError::BindAddr { value: ref raw, .. }) if raw == "not-an-address"
                ));
                assert!(mode.is_ok());
            }
            Accessor::CreateUserErrors => {
                assert!(matches!(mode, Err(SettingsError::ErrorMode(_))));
                assert!(bind.is_ok());
            }
        }
    }
}
