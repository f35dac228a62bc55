//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CounterCache, UserRepository};

use super::users::CreateUserErrorMode;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub counter: Arc<dyn CounterCache>,
    pub create_user_errors: CreateUserErrorMode,
}

impl HttpState {
    /// Construct state from the two ports using the default error mode.
    pub fn new(users: Arc<dyn UserRepository>, counter: Arc<dyn CounterCache>) -> Self {
        Self {
            users,
            counter,
            create_user_errors: CreateUserErrorMode::default(),
        }
    }

    /// Select how repository failures on `POST /users` reach clients.
    pub fn with_create_user_errors(mut self, mode: CreateUserErrorMode) -> Self {
        self.create_user_errors = mode;
        self
    }
}
