/// Account model and database operations
///
/// This module provides the Account model and the operations the credential
/// and payment flows need.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE account_role AS ENUM ('user', 'admin');
///
/// CREATE TABLE accounts (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email TEXT NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     role account_role NOT NULL DEFAULT 'user',
///     payment BOOLEAN NOT NULL DEFAULT FALSE,
///     login BOOLEAN NOT NULL DEFAULT FALSE,
///     image VARCHAR(512),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use storefront_shared::models::account::{Account, CreateAccount};
/// use storefront_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let account = Account::create(
///     &pool,
///     CreateAccount {
///         email: "user@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
///
/// let found = Account::find_by_email(&pool, "user@example.com").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Account roles
///
/// The admin role gates the payment-data listing; everything else is open
/// to plain users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Regular user: register, login, submit payments
    User,

    /// Can additionally list stored payment methods
    Admin,
}

impl AccountRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::User => "user",
            AccountRole::Admin => "admin",
        }
    }

    /// Whether this role may read the payment-method store
    pub fn is_admin(&self) -> bool {
        matches!(self, AccountRole::Admin)
    }
}

/// Account model representing a registered user
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Unique account ID (UUID v4)
    pub id: Uuid,

    /// Email address, unique across all accounts
    pub email: String,

    /// Argon2id password hash
    ///
    /// Never serialized into API responses.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Account role
    pub role: AccountRole,

    /// Whether this account has submitted a payment
    ///
    /// Set to true only inside the payment transaction, together with the
    /// payment-method insert.
    pub payment: bool,

    /// Whether this account has re-entered through the registration flow
    pub login: bool,

    /// Optional profile/background image URL
    pub image: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,
}

impl Account {
    /// Creates a new account
    ///
    /// The account is created with `role = user`, `payment = false` and
    /// `login = false`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateAccount) -> Result<Self, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, role, payment, login, image,
                      created_at, updated_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(account)
    }

    /// Finds an account by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, role, payment, login, image,
                   created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Finds an account by email address
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, role, payment, login, image,
                   created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Sets the login flag for an existing account, returning the updated row
    ///
    /// Used by the registration flow when the email is already taken: the
    /// request is treated as a re-login rather than a conflict.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn mark_logged_in(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET login = TRUE, updated_at = NOW()
            WHERE email = $1
            RETURNING id, email, password_hash, role, payment, login, image,
                      created_at, updated_at
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Marks an account as paying, returning the post-update row
    ///
    /// Takes a plain connection so the caller can run it on an open
    /// transaction: this write must commit or abort together with the
    /// payment-method insert that follows it.
    ///
    /// Returns `None` when no account matches the email; the caller is
    /// expected to abort in that case.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn mark_paying(
        conn: &mut PgConnection,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts
            SET payment = TRUE, updated_at = NOW()
            WHERE email = $1
            RETURNING id, email, password_hash, role, payment, login, image,
                      created_at, updated_at
            "#,
        )
        .bind(email)
        .fetch_optional(conn)
        .await?;

        Ok(account)
    }

    /// Replaces the stored password hash
    ///
    /// Returns true if the account was found and updated.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn update_password(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2, updated_at = NOW()
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(AccountRole::User.as_str(), "user");
        assert_eq!(AccountRole::Admin.as_str(), "admin");
    }

    #[test]
    fn test_role_is_admin() {
        assert!(AccountRole::Admin.is_admin());
        assert!(!AccountRole::User.is_admin());
    }

    #[test]
    fn test_create_account_struct() {
        let create = CreateAccount {
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
        };

        assert_eq!(create.email, "test@example.com");
        assert_eq!(create.password_hash, "hash");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let account = Account {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: AccountRole::User,
            payment: false,
            login: false,
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("test@example.com"));
    }

    // Integration tests for database operations are in tests/payment_flow_tests.rs
}
