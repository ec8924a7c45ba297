//! Contract of the gateway webservice client.
//!
//! The engine never speaks SOAP itself; the hosting application provides an
//! implementation of [`GatewayClient`] wrapping its transport of choice.
//! Every call is a synchronous round trip from the engine's point of view:
//! awaited to completion, at-most-once, with timeout and retry policy owned
//! entirely by the implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::types::{CustomResult, MinorUnit, Mpay24Error, ResponseStatus};

/// Identifier a transaction status query goes out with.
///
/// Exactly one of the two identifiers is used per call. Reconciliation
/// prefers the gateway id and degrades to the merchant id for transactions
/// the gateway has not been seen acknowledging yet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StatusQuery {
    /// Query by the gateway-assigned transaction id (`MPAYTID`).
    ByGatewayId(String),
    /// Query by the merchant-assigned transaction id (`TID`).
    ByMerchantTid(String),
}

/// Result of a payment or manual operation call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentResponse {
    /// Overall outcome reported by the gateway.
    pub status: ResponseStatus,
    /// Gateway return code (`OK`, `REDIRECT`, error identifiers).
    pub return_code: Option<String>,
    /// Redirect target for the customer, present on accepted redirect
    /// payments.
    pub location: Option<String>,
    /// Gateway transaction id, present once the gateway acknowledged the
    /// transaction.
    pub mpay_tid: Option<String>,
}

/// One payment method enabled for the merchant account.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentMethod {
    /// Payment type (`CC`, `ELV`, `PAYPAL`, ...).
    pub p_type: String,
    /// Brand within the payment type, where applicable.
    pub brand: Option<String>,
}

/// The payment methods enabled for the merchant account.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PaymentMethods {
    /// The enabled methods.
    pub methods: Vec<PaymentMethod>,
}

/// The gateway webservice operations the engine drives.
#[mockall::automock]
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Submits an MDXI document and starts a redirect payment.
    async fn select_payment(&self, mdxi: String) -> CustomResult<PaymentResponse, Mpay24Error>;

    /// Starts a payment against a stored customer profile.
    async fn profile_payment(&self, order: String) -> CustomResult<PaymentResponse, Mpay24Error>;

    /// Initiates an Express Checkout payment.
    async fn express_checkout_payment(
        &self,
        order: String,
    ) -> CustomResult<PaymentResponse, Mpay24Error>;

    /// Finishes an Express Checkout payment (reserve, bill or cancel).
    async fn callback_paypal(&self, order: String) -> CustomResult<PaymentResponse, Mpay24Error>;

    /// Queries the current transaction status by exactly one identifier.
    async fn transaction_status(
        &self,
        query: StatusQuery,
    ) -> CustomResult<BTreeMap<String, String>, Mpay24Error>;

    /// Clears an amount of an authorized transaction.
    async fn manual_clear(
        &self,
        mpay_tid: String,
        amount: MinorUnit,
        currency: String,
    ) -> CustomResult<PaymentResponse, Mpay24Error>;

    /// Credits an amount of a billed transaction.
    async fn manual_credit(
        &self,
        mpay_tid: String,
        amount: MinorUnit,
        currency: String,
        customer: Option<String>,
    ) -> CustomResult<PaymentResponse, Mpay24Error>;

    /// Cancels an authorized transaction.
    async fn manual_reverse(&self, mpay_tid: String)
        -> CustomResult<PaymentResponse, Mpay24Error>;

    /// Lists the payment methods enabled for the merchant account.
    async fn list_payment_methods(&self) -> CustomResult<PaymentMethods, Mpay24Error>;

    /// The webservice endpoint requests are sent to, for log lines.
    fn etp_url(&self) -> String;

    /// Raw outbound payload of the most recent call, when captured.
    fn last_request(&self) -> Option<String>;

    /// Raw inbound payload of the most recent call, when captured.
    fn last_response(&self) -> Option<String>;

    /// Whether requests travel through an intermediary proxy. With a proxy
    /// in place the engine skips its own document validation.
    fn proxy_in_use(&self) -> bool;
}

/// Expands adjacent tags onto separate lines for readable log output.
pub(crate) fn expand_tags(payload: &str) -> String {
    payload.replace("><", ">\n<")
}
