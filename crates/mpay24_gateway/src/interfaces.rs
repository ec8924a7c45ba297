//! Merchant-side collaborator contracts.
//!
//! The engine owns no persistence, no document templates, no secret
//! derivation and no log sink; the hosting application implements these
//! traits and hands them to [`crate::payments::Mpay24`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use hyperswitch_masking::Secret;
use time::OffsetDateTime;

use crate::mdxi::{MdxiOrder, PaymentOrder};
use crate::types::{CancelFlag, CustomResult, MinorUnit, Mpay24Error, Transaction};

/// Persistence of merchant transactions.
///
/// Implementations must serialize concurrent updates for the same `tid`
/// (the gateway may resend a confirmation) and keep updates idempotent:
/// applying the same normalized status twice leaves the record unchanged.
#[mockall::automock]
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Creates and persists the transaction for the current checkout
    /// attempt, with at least TID and PRICE set.
    async fn create_transaction(&self) -> CustomResult<Transaction, Mpay24Error>;

    /// Loads the transaction with the given merchant id.
    async fn get_transaction(&self, tid: &str) -> CustomResult<Transaction, Mpay24Error>;

    /// Applies a reconciled status to the stored transaction.
    async fn update_transaction(
        &self,
        tid: &str,
        fields: BTreeMap<String, String>,
        shipping_confirmed: bool,
    ) -> CustomResult<(), Mpay24Error>;
}

/// Construction of the order documents submitted to the gateway.
#[mockall::automock]
#[async_trait]
pub trait DocumentFactory: Send + Sync {
    /// Builds the MDXI for a redirect payment of `transaction`.
    async fn create_mdxi(&self, transaction: &Transaction)
        -> CustomResult<MdxiOrder, Mpay24Error>;

    /// Builds the order document for a stored-profile payment.
    async fn create_profile_order(&self, tid: &str) -> CustomResult<PaymentOrder, Mpay24Error>;

    /// Builds the order document initiating an Express Checkout payment.
    async fn create_express_checkout_order(
        &self,
        tid: &str,
    ) -> CustomResult<PaymentOrder, Mpay24Error>;

    /// Builds the order document finishing an Express Checkout payment,
    /// carrying the renegotiated shipping costs and total amount.
    async fn create_finish_express_checkout_order(
        &self,
        tid: &str,
        shipping_costs: MinorUnit,
        amount: MinorUnit,
        cancel: CancelFlag,
    ) -> CustomResult<PaymentOrder, Mpay24Error>;
}

/// Derivation and lookup of the per-transaction secret token.
///
/// The token is the sole authentication of confirmation callbacks: it must
/// be derivable only from `{tid, amount, currency, creation timestamp}` plus
/// merchant-private key material, never from public request parameters.
#[mockall::automock]
#[async_trait]
pub trait SecretTokenProvider: Send + Sync {
    /// Derives and stores the secret for a freshly created transaction.
    async fn create_secret(
        &self,
        tid: &str,
        amount: MinorUnit,
        currency: &str,
        created_at: OffsetDateTime,
    ) -> CustomResult<Secret<String>, Mpay24Error>;

    /// Looks up the stored secret for comparison at confirmation time.
    /// `None` when no transaction with that id is known.
    async fn get_secret(&self, tid: &str) -> CustomResult<Option<Secret<String>>, Mpay24Error>;
}

/// The merchant's payment log sink.
///
/// Called only in debug mode, twice per gateway call: first with the raw
/// request, then with the raw response. Write failures are a best-effort
/// concern and never alter the primary operation's outcome.
#[mockall::automock]
#[async_trait]
pub trait PaymentLogger: Send + Sync {
    /// Appends one log entry for `operation`.
    async fn write_log(&self, operation: &str, info: &str) -> CustomResult<(), Mpay24Error>;
}

/// Encryption collaborator for flexLINK pay links.
#[mockall::automock]
#[async_trait]
pub trait ParamCipher: Send + Sync {
    /// Encrypts the ordered parameter set into the opaque pay-link token.
    async fn encrypt(&self, params: &[(String, String)]) -> CustomResult<String, Mpay24Error>;
}
