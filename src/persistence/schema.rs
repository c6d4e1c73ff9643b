//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the bootstrap DDL in
//! [`super::diesel_user_repository`] exactly. They are used by Diesel for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// User records table.
    ///
    /// The `id` column is a `SERIAL` primary key assigned by PostgreSQL.
    users (id) {
        /// Primary key assigned on insert.
        id -> Int4,
        /// Full name.
        name -> Text,
        /// Contact email address.
        email -> Text,
        /// City of residence.
        city -> Text,
    }
}
