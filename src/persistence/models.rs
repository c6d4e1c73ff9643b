//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the HTTP layer. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use diesel::prelude::*;

use crate::models::{User, UserDraft};

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub city: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            city: row.city,
        }
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub city: &'a str,
}

impl<'a> NewUserRow<'a> {
    pub(crate) fn from_draft(draft: &'a UserDraft) -> Self {
        Self {
            name: &draft.name,
            email: &draft.email,
            city: &draft.city,
        }
    }
}

/// Changeset struct for overwriting existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub city: &'a str,
}

impl<'a> UserChangeset<'a> {
    pub(crate) fn from_draft(draft: &'a UserDraft) -> Self {
        Self {
            name: &draft.name,
            email: &draft.email,
            city: &draft.city,
        }
    }
}
