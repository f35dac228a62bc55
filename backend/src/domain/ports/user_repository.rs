//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established or was lost.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique email constraint rejected the insert.
        DuplicateEmail { email: String } => "a user with email {email} already exists",
    }
}

/// Insert and full-scan access to the `users` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with the store-assigned identifier.
    ///
    /// The insert commits immediately. Uniqueness of `email` is enforced by
    /// the store and surfaces as [`UserPersistenceError::DuplicateEmail`].
    async fn create(&self, new_user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Return every stored user in store-native order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;
}
