use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use rand::Rng;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set,
    SqlErr,
};
use sha2::Sha256;

use crate::entities::users;
use crate::models::User;

type HmacSha256 = Hmac<Sha256>;

const SALT_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Outcome of an account insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateUser {
    Created,
    AlreadyExists,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get user by name, including the `rowid` used as the account id
    pub async fn get_by_name(&self, name: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .select_only()
            .column_as(Expr::cust("rowid"), "id")
            .columns([
                users::Column::Name,
                users::Column::Password,
                users::Column::Salt,
            ])
            .filter(users::Column::Name.eq(name))
            .into_model::<User>()
            .one(&self.conn)
            .await
            .context("Failed to query user by name")?;

        Ok(user)
    }

    pub async fn count_by_name(&self, name: &str) -> Result<u64> {
        users::Entity::find()
            .filter(users::Column::Name.eq(name))
            .count(&self.conn)
            .await
            .context("Failed to count users by name")
    }

    /// Insert a new account with a fresh salt.
    ///
    /// The existence check and the insert are one statement
    /// (`INSERT .. ON CONFLICT(name) DO NOTHING`), so concurrent creations of
    /// the same name cannot both succeed. A primary key violation reported by
    /// the driver is treated the same way.
    pub async fn create(&self, name: &str, password: &str, salt_length: usize) -> Result<CreateUser> {
        let salt = generate_salt(salt_length);
        let digest = hash_password(password, &salt)?;

        let active = users::ActiveModel {
            name: Set(name.to_string()),
            password: Set(digest),
            salt: Set(salt),
        };

        let result = users::Entity::insert(active)
            .on_conflict(
                OnConflict::column(users::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await;

        match result {
            Ok(0) => Ok(CreateUser::AlreadyExists),
            Ok(_) => Ok(CreateUser::Created),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(CreateUser::AlreadyExists)
            }
            Err(err) => Err(err).context("Failed to insert user"),
        }
    }
}

/// `base64(HMAC-SHA256(key = salt, message = password))`
pub fn hash_password(password: &str, salt: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(salt.as_bytes())
        .map_err(|e| anyhow::anyhow!("Invalid HMAC key: {e}"))?;
    mac.update(password.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Recomputes the digest of `password` under `salt` and compares it with
/// `digest` in constant time.
#[must_use]
pub fn verify_password(password: &str, salt: &str, digest: &str) -> bool {
    let Ok(expected) = STANDARD.decode(digest) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(salt.as_bytes()) else {
        return false;
    };
    mac.update(password.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

/// Random lowercase alphanumeric salt of `len` characters.
#[must_use]
pub fn generate_salt(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(SALT_ALPHABET[rng.random_range(0..SALT_ALPHABET.len())]))
        .collect()
}
