use std::fmt;

use sea_orm::FromQueryResult;

/// Opaque account handle, stable for the lifetime of the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored credentials of an account, as read back from the `users` table.
#[derive(Debug, Clone, FromQueryResult)]
pub struct User {
    /// SQLite `rowid` of the row.
    pub id: i64,
    pub name: String,
    pub password: String,
    pub salt: String,
}

impl User {
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId(self.id)
    }
}
