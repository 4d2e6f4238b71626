/// Database models
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `account`: User accounts with role, payment and login flags
/// - `payment_method`: Soft-deletable card records
/// - `background_image`: The singleton background-image setting
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
/// let new_account = CreateAccount {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let account = Account::create(&pool, new_account).await?;
/// # Ok(())
/// # }
/// ```

pub mod account;
pub mod background_image;
pub mod payment_method;
