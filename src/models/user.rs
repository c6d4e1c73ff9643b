//! User data model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored user record.
///
/// The identifier is assigned by the store (`SERIAL` primary key) and is
/// never accepted from clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: i32,
    /// Full name.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Contact email address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// City of residence.
    #[schema(example = "London")]
    pub city: String,
}

/// Client-supplied user fields carried by create and update requests.
///
/// An `id` present in the request body is ignored: identifiers come from the
/// store on create and from the request path on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDraft {
    /// Full name.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Contact email address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// City of residence.
    #[schema(example = "London")]
    pub city: String,
}

impl UserDraft {
    /// Combine the draft with an identifier into a full record.
    ///
    /// # Examples
    /// ```
    /// use user_directory::models::UserDraft;
    ///
    /// let draft = UserDraft {
    ///     name: "Ada Lovelace".into(),
    ///     email: "ada@example.com".into(),
    ///     city: "London".into(),
    /// };
    /// let user = draft.into_user(7);
    /// assert_eq!(user.id, 7);
    /// assert_eq!(user.name, "Ada Lovelace");
    /// ```
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            city: self.city,
        }
    }
}
