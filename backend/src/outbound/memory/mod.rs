//! Process-local adapters for both ports.
//!
//! The server uses these when started with `APP_IN_MEMORY=true`, and handler
//! tests use them as realistic fakes. They mirror the store semantics: emails are unique and exact-match,
//! identifiers start at 1, and increments are atomic per key.

mod counter_cache;
mod user_repository;

pub use counter_cache::InMemoryCounterCache;
pub use user_repository::InMemoryUserRepository;
