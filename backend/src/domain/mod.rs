//! Domain primitives and ports.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence layers, and the ports those layers meet at. Types are
//! immutable once constructed and document their invariants.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload and category.
//! - User, NewUser, UserId, EmailAddress, UserName: the single entity type.
//! - CounterKey: name of a cache-held counter.
//! - TraceId: request correlation identifier.
//! - ports: `UserRepository` and `CounterCache` traits.

pub mod counter;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::counter::{CounterKey, CounterKeyValidationError, HITS_COUNTER_KEY};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{
    EMAIL_MAX, EmailAddress, NewUser, User, UserId, UserName, UserValidationError,
};

/// Convenient result alias for domain and adapter code.
///
/// # Examples
/// ```
/// use backend::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<u32> {
///     Err(Error::not_found("nothing here"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
