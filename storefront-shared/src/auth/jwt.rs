/// Session token generation and validation
///
/// Session tokens are JWTs signed with HS256 (HMAC-SHA256). A token is
/// issued after successful registration, login, or payment, and carries the
/// account's identity: id (`sub`), email, and role. Expiry is configured by
/// the caller.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: configured per deployment
/// - **Validation**: signature, expiration, and issuer checks
/// - **Secret Management**: secrets should be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use storefront_shared::auth::jwt::{create_token, validate_token, Claims};
/// use storefront_shared::models::account::{Account, AccountRole};
/// use chrono::{Duration, Utc};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let account = Account {
/// #     id: Uuid::new_v4(),
/// #     email: "user@example.com".to_string(),
/// #     password_hash: String::new(),
/// #     role: AccountRole::User,
/// #     payment: false,
/// #     login: false,
/// #     image: None,
/// #     created_at: Utc::now(),
/// #     updated_at: Utc::now(),
/// # };
/// let claims = Claims::for_account(&account, Duration::hours(24));
/// let token = create_token(&claims, "your-secret-key-at-least-32-bytes")?;
///
/// let validated = validate_token(&token, "your-secret-key-at-least-32-bytes")?;
/// assert_eq!(validated.sub, account.id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::account::{Account, AccountRole};

/// Issuer claim stamped into every token
const ISSUER: &str = "storefront";

/// Error type for session-token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },
}

/// Session token claims
///
/// # Standard Claims
///
/// - `sub`: Subject (account ID)
/// - `iss`: Issuer (always "storefront")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
/// - `nbf`: Not before timestamp
///
/// # Custom Claims
///
/// - `email`: Account email
/// - `role`: Account role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - account ID
    pub sub: Uuid,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Account email (custom claim)
    pub email: String,

    /// Account role (custom claim)
    pub role: AccountRole,
}

impl Claims {
    /// Creates claims bound to an account with the given expiry
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use storefront_shared::auth::jwt::Claims;
    /// # use storefront_shared::models::account::Account;
    /// use chrono::Duration;
    ///
    /// # fn example(account: &Account) {
    /// let claims = Claims::for_account(account, Duration::hours(24));
    /// # }
    /// ```
    pub fn for_account(account: &Account, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: account.id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            email: account.email.clone(),
            role: account.role,
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a session token from claims
///
/// Signs the token using HS256 with the provided secret.
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token creation fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a session token and extracts its claims
///
/// Verifies:
/// - Signature is valid
/// - Token hasn't expired
/// - Issuer is "storefront"
/// - Token is not used before its nbf time
///
/// # Errors
///
/// Returns an error if the signature is invalid, the token has expired,
/// the issuer doesn't match, or the token format is invalid
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer {
            expected: ISSUER.to_string(),
        },
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_account(role: AccountRole) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
            role,
            payment: false,
            login: false,
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_claims_creation() {
        let account = test_account(AccountRole::User);
        let claims = Claims::for_account(&account, Duration::hours(24));

        assert_eq!(claims.sub, account.id);
        assert_eq!(claims.email, account.email);
        assert_eq!(claims.role, AccountRole::User);
        assert_eq!(claims.iss, "storefront");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_create_and_validate_token() {
        let account = test_account(AccountRole::Admin);
        let secret = "test-secret-key-at-least-32-bytes-long";

        let claims = Claims::for_account(&account, Duration::hours(1));
        let token = create_token(&claims, secret).expect("Should create token");

        let validated = validate_token(&token, secret).expect("Should validate token");
        assert_eq!(validated.sub, account.id);
        assert_eq!(validated.email, account.email);
        assert_eq!(validated.role, AccountRole::Admin);
        assert_eq!(validated.iss, "storefront");
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let account = test_account(AccountRole::User);
        let claims = Claims::for_account(&account, Duration::hours(1));
        let token = create_token(&claims, "secret1").expect("Should create token");

        let result = validate_token(&token, "wrong-secret");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        let account = test_account(AccountRole::User);
        let secret = "test-secret";

        // Negative duration = already expired
        let claims = Claims::for_account(&account, Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, secret).expect("Should create token");
        let result = validate_token(&token, secret);

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), JwtError::Expired));
    }

    #[test]
    fn test_validate_tampered_token() {
        let account = test_account(AccountRole::User);
        let secret = "test-secret";

        let claims = Claims::for_account(&account, Duration::hours(1));
        let mut token = create_token(&claims, secret).expect("Should create token");

        // Flip a character in the payload segment
        let tampered = token.split_off(token.len() / 2);
        token.push_str(&tampered.to_uppercase());

        assert!(validate_token(&token, secret).is_err());
    }
}
