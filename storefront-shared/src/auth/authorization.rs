/// Authorization helpers
///
/// Admin-gated handlers call [`require_admin`] at entry, so the capability
/// check is a single enumerated comparison instead of string matching
/// scattered across handlers.
///
/// # Example
///
/// ```no_run
/// use storefront_shared::auth::authorization::require_admin;
/// use storefront_shared::models::account::Account;
///
/// fn list_payment_data(requesting: &Account) -> Result<(), String> {
///     require_admin(requesting).map_err(|e| e.to_string())?;
///     // ... handler body
///     Ok(())
/// }
/// ```

use crate::models::account::Account;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// The account's role does not grant the admin capability
    #[error("Unauthorized access")]
    NotAdmin,
}

/// Checks that an account holds the admin role
///
/// Payment state and authentication do not matter here: a non-admin account
/// is rejected even when it exists and has paid.
///
/// # Errors
///
/// Returns `AuthzError::NotAdmin` for any non-admin role
pub fn require_admin(account: &Account) -> Result<(), AuthzError> {
    if !account.role.is_admin() {
        return Err(AuthzError::NotAdmin);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::AccountRole;
    use chrono::Utc;
    use uuid::Uuid;

    fn account_with_role(role: AccountRole, payment: bool) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
            role,
            payment,
            login: false,
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_passes() {
        let account = account_with_role(AccountRole::Admin, false);
        assert!(require_admin(&account).is_ok());
    }

    #[test]
    fn test_user_rejected_even_when_paying() {
        let account = account_with_role(AccountRole::User, true);
        assert!(matches!(require_admin(&account), Err(AuthzError::NotAdmin)));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(AuthzError::NotAdmin.to_string(), "Unauthorized access");
    }
}
