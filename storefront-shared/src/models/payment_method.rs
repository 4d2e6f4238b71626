/// PaymentMethod model and database operations
///
/// Card records are written only by the payment transaction and are never
/// hard-deleted: the admin flow marks them deleted instead.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE payment_methods (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email TEXT NOT NULL,
///     card_number TEXT,
///     expiry_date TEXT,
///     first_name TEXT,
///     last_name TEXT,
///     verification_code TEXT,
///     billing_address TEXT,
///     is_deleted BOOLEAN,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `email` points at `accounts.email` by convention only; the schema
/// intentionally carries no foreign-key constraint on it.
///
/// # The deletion flag is tri-state
///
/// `is_deleted` is nullable. Rows written before the soft-delete flow
/// existed carry `NULL`, and both `NULL` and `FALSE` mean "active". Every
/// read path goes through [`PaymentMethod::list_active`] or
/// [`PaymentMethod::is_active`], which encode that rule once instead of
/// re-deriving it per query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Stored card record
///
/// Serialized field names follow the deployed JSON contract (`number`,
/// `expiryDate`, `check`, ...). The deletion flag is excluded from every
/// serialized projection.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PaymentMethod {
    /// Unique record ID (UUID v4)
    pub id: Uuid,

    /// Owning account's email (no foreign-key constraint, see module docs)
    pub email: String,

    /// Card number, opaque and unvalidated
    #[serde(rename = "number")]
    pub card_number: Option<String>,

    /// Expiry date, opaque and unvalidated
    #[serde(rename = "expiryDate")]
    pub expiry_date: Option<String>,

    /// Cardholder first name
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,

    /// Cardholder last name
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,

    /// Card verification code; `check` on the wire
    #[serde(rename = "check")]
    pub verification_code: Option<String>,

    /// Billing address
    #[serde(rename = "billingAddress")]
    pub billing_address: Option<String>,

    /// Tri-state deletion flag: `None` means a legacy row, treated as active
    #[serde(skip_serializing)]
    pub is_deleted: Option<bool>,

    /// When the record was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Card fields as submitted with a payment
///
/// All fields are opaque strings; the payment flow stores them without
/// format validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    /// Card number
    #[serde(rename = "number")]
    pub card_number: Option<String>,

    /// Expiry date
    #[serde(rename = "expiryDate")]
    pub expiry_date: Option<String>,

    /// Cardholder first name
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,

    /// Cardholder last name
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,

    /// Card verification code
    #[serde(rename = "check")]
    pub verification_code: Option<String>,

    /// Billing address
    #[serde(rename = "billingAddress")]
    pub billing_address: Option<String>,
}

impl PaymentMethod {
    /// Inserts a card record for an account
    ///
    /// Takes a plain connection so the caller can run it on an open
    /// transaction: the payment flow must commit this insert together with
    /// the account's payment flag or not at all. New records always start
    /// with `is_deleted = false`.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn insert(
        conn: &mut PgConnection,
        email: &str,
        card: CardDetails,
    ) -> Result<Self, sqlx::Error> {
        let method = sqlx::query_as::<_, PaymentMethod>(
            r#"
            INSERT INTO payment_methods
                (email, card_number, expiry_date, first_name, last_name,
                 verification_code, billing_address, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE)
            RETURNING id, email, card_number, expiry_date, first_name, last_name,
                      verification_code, billing_address, is_deleted, created_at
            "#,
        )
        .bind(email)
        .bind(card.card_number)
        .bind(card.expiry_date)
        .bind(card.first_name)
        .bind(card.last_name)
        .bind(card.verification_code)
        .bind(card.billing_address)
        .fetch_one(conn)
        .await?;

        Ok(method)
    }

    /// Finds a card record by ID
    ///
    /// Returns the record whether or not it is soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let method = sqlx::query_as::<_, PaymentMethod>(
            r#"
            SELECT id, email, card_number, expiry_date, first_name, last_name,
                   verification_code, billing_address, is_deleted, created_at
            FROM payment_methods
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(method)
    }

    /// Lists all active card records
    ///
    /// A record is active when the deletion flag is false or absent;
    /// `IS DISTINCT FROM TRUE` covers both in one predicate.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let methods = sqlx::query_as::<_, PaymentMethod>(
            r#"
            SELECT id, email, card_number, expiry_date, first_name, last_name,
                   verification_code, billing_address, is_deleted, created_at
            FROM payment_methods
            WHERE is_deleted IS DISTINCT FROM TRUE
            ORDER BY created_at
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(methods)
    }

    /// Marks a card record as deleted
    ///
    /// Returns true if a record with the id exists. Re-deleting an
    /// already-deleted record succeeds; the operation is idempotent by
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE payment_methods
            SET is_deleted = TRUE
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether this record is active (deletion flag false or absent)
    pub fn is_active(&self) -> bool {
        !self.is_deleted.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(is_deleted: Option<bool>) -> PaymentMethod {
        PaymentMethod {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            card_number: Some("4111111111111111".to_string()),
            expiry_date: Some("12/26".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            verification_code: Some("123".to_string()),
            billing_address: Some("1 Analytical Way".to_string()),
            is_deleted,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_active_tri_state() {
        assert!(method(None).is_active());
        assert!(method(Some(false)).is_active());
        assert!(!method(Some(true)).is_active());
    }

    #[test]
    fn test_deletion_flag_never_serialized() {
        let json = serde_json::to_string(&method(Some(true))).unwrap();
        assert!(!json.contains("is_deleted"));
        assert!(!json.contains("isDeleted"));
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_string(&method(Some(false))).unwrap();
        assert!(json.contains("\"number\""));
        assert!(json.contains("\"expiryDate\""));
        assert!(json.contains("\"check\""));
        assert!(json.contains("\"billingAddress\""));
    }

    #[test]
    fn test_card_details_from_wire_json() {
        let card: CardDetails = serde_json::from_str(
            r#"{
                "number": "4111111111111111",
                "expiryDate": "12/26",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "check": "123",
                "billingAddress": "1 Analytical Way"
            }"#,
        )
        .unwrap();

        assert_eq!(card.card_number.as_deref(), Some("4111111111111111"));
        assert_eq!(card.verification_code.as_deref(), Some("123"));
    }

    #[test]
    fn test_card_details_fields_optional() {
        let card: CardDetails = serde_json::from_str("{}").unwrap();
        assert!(card.card_number.is_none());
        assert!(card.billing_address.is_none());
    }
}
