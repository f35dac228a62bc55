//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. `email` carries a unique index.
    users (id) {
        /// Primary key assigned by the `SERIAL` sequence.
        id -> Int4,
        /// Unique email address.
        email -> Varchar,
        /// User name.
        name -> Varchar,
    }
}
