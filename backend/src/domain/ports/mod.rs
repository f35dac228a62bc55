//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Inbound adapters depend on these traits only; outbound adapters in
//! [`crate::outbound`] implement them for PostgreSQL, Redis, and process
//! memory.

mod macros;
pub(crate) use macros::define_port_error;

mod counter_cache;
mod user_repository;

#[cfg(test)]
pub use counter_cache::MockCounterCache;
pub use counter_cache::{CounterCache, CounterCacheError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
