/// The transactional payment-submission flow
///
/// Submitting a payment performs two writes that must be atomic as a unit:
/// the account's payment flag is set and a payment-method record is
/// inserted. Both happen on one database transaction, so no concurrent
/// reader ever observes the pair partially applied (flag set without a
/// card record, or the reverse).
///
/// The transaction handle is a scoped resource: the happy path commits
/// explicitly, and every other exit path drops the handle, which rolls the
/// transaction back and releases the session.
///
/// # Example
///
/// ```no_run
/// use storefront_shared::models::payment_method::CardDetails;
/// use storefront_shared::payments::submit_payment;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, card: CardDetails) -> Result<(), Box<dyn std::error::Error>> {
/// let account = submit_payment(&pool, "user@example.com", card).await?;
/// assert!(account.payment);
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use tracing::debug;

use crate::models::account::Account;
use crate::models::payment_method::{CardDetails, PaymentMethod};

/// Error type for the payment flow
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// No account matches the submitted email; nothing was written
    #[error("user not found")]
    AccountNotFound,

    /// The store failed to begin, write, or commit the transaction
    #[error("transaction failed: {0}")]
    TransactionFailure(#[source] sqlx::Error),
}

/// Marks an account as paying and stores its card, atomically
///
/// # Algorithm
///
/// 1. Begin a transaction on the pool.
/// 2. Set `payment = TRUE` on the account matching `email`, retrieving the
///    post-update row.
/// 3. No matching account: return [`PaymentError::AccountNotFound`]. The
///    transaction rolls back on drop; no payment-method record is written.
/// 4. Insert the payment-method record for that email on the same
///    transaction, with the deletion flag unset.
/// 5. Commit.
///
/// The account update stays ordered before the insert: a reader on the same
/// transaction would otherwise see the writes in a different order than the
/// deployed contract.
///
/// # Errors
///
/// - [`PaymentError::AccountNotFound`]: client error, no retry expected
/// - [`PaymentError::TransactionFailure`]: store-level failure with the
///   underlying cause attached; retrying is the caller's decision
pub async fn submit_payment(
    pool: &PgPool,
    email: &str,
    card: CardDetails,
) -> Result<Account, PaymentError> {
    let mut tx = pool.begin().await.map_err(PaymentError::TransactionFailure)?;

    let account = Account::mark_paying(&mut *tx, email)
        .await
        .map_err(PaymentError::TransactionFailure)?;

    let Some(account) = account else {
        // tx drops here, which rolls back the (empty) update.
        return Err(PaymentError::AccountNotFound);
    };

    PaymentMethod::insert(&mut *tx, email, card)
        .await
        .map_err(PaymentError::TransactionFailure)?;

    tx.commit().await.map_err(PaymentError::TransactionFailure)?;

    debug!(email, account_id = %account.id, "payment recorded");
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PaymentError::AccountNotFound;
        assert_eq!(err.to_string(), "user not found");

        let err = PaymentError::TransactionFailure(sqlx::Error::PoolClosed);
        assert!(err.to_string().starts_with("transaction failed:"));
    }

    #[test]
    fn test_transaction_failure_keeps_source() {
        use std::error::Error as _;

        let err = PaymentError::TransactionFailure(sqlx::Error::PoolClosed);
        assert!(err.source().is_some());
    }

    // The atomicity properties are exercised against a real database in
    // tests/payment_flow_tests.rs.
}
