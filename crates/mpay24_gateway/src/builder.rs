//! Precondition checks and callback-URL defaulting for order documents.

use error_stack::report;

use crate::configs::CallbackConfig;
use crate::mdxi::{CallbackUrls, MdxiOrder, PaymentOrder};
use crate::types::{CustomResult, Mpay24Error, Transaction, TransactionField};

/// Prepares factory-built order documents for submission.
///
/// The builder owns the externally supplied callback configuration and fills
/// it into documents that do not set their own targets. An explicitly set
/// value always wins over the default.
#[derive(Clone, Debug)]
pub struct OrderDocumentBuilder {
    callbacks: CallbackConfig,
}

impl OrderDocumentBuilder {
    /// Creates a builder around the configured callback targets.
    pub fn new(callbacks: CallbackConfig) -> Self {
        Self { callbacks }
    }

    /// Checks the transaction invariants every gateway operation relies on:
    /// TID and PRICE must both be present.
    pub fn ensure_ready(&self, transaction: &Transaction) -> CustomResult<(), Mpay24Error> {
        transaction.require(TransactionField::Tid)?;
        transaction.require(TransactionField::Price)?;
        Ok(())
    }

    /// Prepares an MDXI document built for `transaction`.
    pub fn prepare_mdxi(
        &self,
        transaction: &Transaction,
        mut document: MdxiOrder,
    ) -> CustomResult<MdxiOrder, Mpay24Error> {
        self.ensure_ready(transaction)?;
        document.url = Some(self.fill_urls(document.url.take()));
        Ok(document)
    }

    /// Prepares an operation order built for `transaction`.
    pub fn prepare_order(
        &self,
        transaction: &Transaction,
        mut document: PaymentOrder,
    ) -> CustomResult<PaymentOrder, Mpay24Error> {
        self.ensure_ready(transaction)?;
        document.url = Some(self.fill_urls(document.url.take()));
        Ok(document)
    }

    /// Validates a caller-supplied amount before it reaches a document.
    pub fn ensure_positive_amount(
        &self,
        name: &'static str,
        amount: crate::types::MinorUnit,
    ) -> CustomResult<(), Mpay24Error> {
        if amount.is_positive() {
            Ok(())
        } else {
            Err(report!(Mpay24Error::InvalidArgument {
                name,
                message: format!("'{amount}' is not a payable amount"),
            }))
        }
    }

    fn fill_urls(&self, explicit: Option<CallbackUrls>) -> CallbackUrls {
        let mut urls = explicit.unwrap_or_default();
        urls.success
            .get_or_insert_with(|| self.callbacks.success_url.to_string());
        urls.error
            .get_or_insert_with(|| self.callbacks.error_url.to_string());
        urls.confirmation
            .get_or_insert_with(|| self.callbacks.confirmation_url.to_string());
        urls
    }
}
