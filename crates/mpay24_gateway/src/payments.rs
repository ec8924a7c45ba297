//! Payment flows, confirmation handling and status reconciliation.

use std::collections::BTreeMap;
use std::str::FromStr;

use error_stack::report;
use hyperswitch_masking::PeekInterface;
use tracing::instrument;

use crate::builder::OrderDocumentBuilder;
use crate::client::{expand_tags, GatewayClient, PaymentMethods, PaymentResponse, StatusQuery};
use crate::configs::{CallbackConfig, MerchantConfig};
use crate::consts;
use crate::interfaces::{DocumentFactory, PaymentLogger, SecretTokenProvider, TransactionStore};
use crate::mdxi::to_xml_string;
use crate::types::{
    errors::ConfigurationError, CancelFlag, CustomResult, MinorUnit, Mpay24Error, StatusResponse,
    TransactionField,
};
use crate::validator;

/// Progress of a confirmation callback through the handler.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfirmationState {
    /// Callback received, nothing verified yet.
    AwaitingConfirmation,
    /// Authoritative status is being fetched from the gateway.
    Reconciling,
    /// Reconciled, delivery address still unconfirmed.
    ShippingPending,
    /// Reconciled with a confirmed (or absent) delivery address.
    Confirmed,
    /// The local transaction was updated.
    Updated,
}

/// Caller-visible result of a confirmation callback.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfirmationOutcome {
    /// The token matched and the local transaction was updated.
    Updated {
        /// Whether the delivery address was confirmed at update time.
        shipping_confirmed: bool,
    },
    /// The token did not match the stored secret. The callback was dropped
    /// without any local state change; the endpoint's behavior must not
    /// reveal whether the transaction exists.
    Ignored,
}

/// The gateway engine.
///
/// One instance per merchant account, wired with the hosting application's
/// collaborators. Every operation is an independent unit of work; the
/// engine keeps no mutable state between calls.
pub struct Mpay24<C, S, F, K, L> {
    config: MerchantConfig,
    builder: OrderDocumentBuilder,
    client: C,
    store: S,
    factory: F,
    secrets: K,
    logger: L,
}

impl<C, S, F, K, L> Mpay24<C, S, F, K, L>
where
    C: GatewayClient,
    S: TransactionStore,
    F: DocumentFactory,
    K: SecretTokenProvider,
    L: PaymentLogger,
{
    /// Wires the engine. Fails on malformed merchant configuration;
    /// nothing is ever sent on behalf of a rejected config.
    pub fn new(
        config: MerchantConfig,
        callbacks: CallbackConfig,
        client: C,
        store: S,
        factory: F,
        secrets: K,
        logger: L,
    ) -> CustomResult<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            config,
            builder: OrderDocumentBuilder::new(callbacks),
            client,
            store,
            factory,
            secrets,
            logger,
        })
    }

    /// Starts a redirect payment for a freshly created transaction and
    /// returns the gateway response carrying the redirect location.
    #[instrument(skip_all)]
    pub async fn pay(&self) -> CustomResult<PaymentResponse, Mpay24Error> {
        let transaction = self.store.create_transaction().await?;
        self.builder.ensure_ready(&transaction)?;
        let document = self.factory.create_mdxi(&transaction).await?;
        let document = self.builder.prepare_mdxi(&transaction, document)?;
        let xml = to_xml_string(&document)?;

        // An intermediary proxy validates submitted documents itself;
        // double validation with a potentially different schema revision
        // would reject documents the proxy accepts.
        if !self.client.proxy_in_use() {
            validator::validate_mdxi(&document, &xml)?;
        }

        let result = self.client.select_payment(xml).await;
        self.log_exchange("Pay").await;
        result
    }

    /// Starts a payment against a stored customer profile.
    #[instrument(skip_all)]
    pub async fn pay_with_profile(&self) -> CustomResult<PaymentResponse, Mpay24Error> {
        let transaction = self.store.create_transaction().await?;
        self.builder.ensure_ready(&transaction)?;
        let tid = transaction.require(TransactionField::Tid)?.to_owned();
        let document = self.factory.create_profile_order(&tid).await?;
        let document = self.builder.prepare_order(&transaction, document)?;
        let xml = to_xml_string(&document)?;

        let result = self.client.profile_payment(xml).await;
        self.log_exchange("PayWithProfile").await;
        result
    }

    /// Initiates an Express Checkout payment.
    #[instrument(skip_all)]
    pub async fn pay_with_express_checkout(&self) -> CustomResult<PaymentResponse, Mpay24Error> {
        let transaction = self.store.create_transaction().await?;
        self.builder.ensure_ready(&transaction)?;
        let tid = transaction.require(TransactionField::Tid)?.to_owned();
        let document = self.factory.create_express_checkout_order(&tid).await?;
        let document = self.builder.prepare_order(&transaction, document)?;
        let xml = to_xml_string(&document)?;

        let result = self.client.express_checkout_payment(xml).await;
        self.log_exchange("PayWithExpressCheckout").await;
        result
    }

    /// Finishes an Express Checkout payment: reserve, bill or cancel it
    /// with the amounts renegotiated after the address change.
    ///
    /// `cancel` accepts exactly `"true"` or `"false"`; anything else is
    /// rejected before a transaction is even loaded.
    #[instrument(skip_all, fields(tid = %tid))]
    pub async fn finish_express_checkout_payment(
        &self,
        tid: &str,
        shipping_costs: MinorUnit,
        amount: MinorUnit,
        cancel: &str,
    ) -> CustomResult<PaymentResponse, Mpay24Error> {
        let cancel = CancelFlag::from_str(cancel)?;

        let transaction = self.store.get_transaction(tid).await?;
        self.builder.ensure_ready(&transaction)?;
        let mpay_tid = transaction.gateway_tid().ok_or_else(|| {
            report!(Mpay24Error::TransactionNotFound {
                tid: tid.to_owned(),
            })
        })?;
        let mpay_tid = mpay_tid.to_owned();

        self.builder.ensure_positive_amount("amount", amount)?;
        self.builder
            .ensure_positive_amount("shipping_costs", shipping_costs)?;

        let mut document = self
            .factory
            .create_finish_express_checkout_order(tid, shipping_costs, amount, cancel)
            .await?;
        document.mpay_tid.get_or_insert(mpay_tid);
        let document = self.builder.prepare_order(&transaction, document)?;
        let xml = to_xml_string(&document)?;

        let result = self.client.callback_paypal(xml).await;
        self.log_exchange("FinishExpressCheckoutResult").await;
        result
    }

    /// Handles an asynchronous confirmation callback from the gateway.
    ///
    /// The callback arguments are never trusted: the authoritative status
    /// comes from a fresh reconciliation round trip. The caller-supplied
    /// `token` is compared against the stored secret; on mismatch the
    /// callback is dropped without any local state change.
    #[instrument(skip_all, fields(tid = %tid))]
    pub async fn confirm(
        &self,
        tid: &str,
        args: &BTreeMap<String, String>,
    ) -> CustomResult<ConfirmationOutcome, Mpay24Error> {
        tracing::debug!(state = %ConfirmationState::AwaitingConfirmation, "confirmation received");
        if self.config.debug {
            let lines: String = args
                .iter()
                .map(|(name, value)| format!("{name} = {value}\n"))
                .collect();
            self.write_log_best_effort(&format!("Confirmation for transaction '{tid}'"), &lines)
                .await;
        }

        tracing::debug!(state = %ConfirmationState::Reconciling, "fetching authoritative status");
        let status = self.transaction_status(tid).await?;

        if self.config.debug {
            let lines: String = status
                .params
                .iter()
                .map(|(name, value)| format!("{name} = {value}\n"))
                .collect();
            self.write_log_best_effort(&format!("Status for transaction {tid}:"), &lines)
                .await;
        }

        let state = if status.shipping_confirmed {
            ConfirmationState::Confirmed
        } else {
            ConfirmationState::ShippingPending
        };
        tracing::debug!(state = %state, "status reconciled");

        let stored = self.secrets.get_secret(tid).await?;
        let supplied = args.get("token");
        let authentic = match (&stored, supplied) {
            (Some(secret), Some(token)) => secret.peek() == token,
            _ => false,
        };
        if !authentic {
            // Deliberately silent: the endpoint must not reveal whether the
            // transaction exists or what the expected token would be.
            tracing::debug!("confirmation token mismatch, dropping callback");
            return Ok(ConfirmationOutcome::Ignored);
        }

        self.store
            .update_transaction(tid, status.update_fields(), status.shipping_confirmed)
            .await?;
        tracing::debug!(state = %ConfirmationState::Updated, "transaction updated");

        Ok(ConfirmationOutcome::Updated {
            shipping_confirmed: status.shipping_confirmed,
        })
    }

    /// Fetches and normalizes the authoritative status of a transaction.
    ///
    /// Queries by the gateway id when one is on record and numeric, by the
    /// merchant id otherwise; a confirmation may arrive before the gateway
    /// id was persisted locally. Both paths produce the same normalized
    /// shape.
    #[instrument(skip_all, fields(tid = %tid))]
    pub async fn transaction_status(
        &self,
        tid: &str,
    ) -> CustomResult<StatusResponse, Mpay24Error> {
        let transaction = self.store.get_transaction(tid).await?;
        self.builder.ensure_ready(&transaction)?;

        let (query, operation) = match transaction.gateway_tid() {
            Some(mpay_tid) => (
                StatusQuery::ByGatewayId(mpay_tid.to_owned()),
                "mPAYTidTransactionStatus",
            ),
            None => (
                StatusQuery::ByMerchantTid(tid.to_owned()),
                "TidTransactionStatus",
            ),
        };

        let result = self.client.transaction_status(query).await;
        self.log_exchange(operation).await;
        StatusResponse::from_params(result?)
    }

    /// Clears an amount of an authorized transaction. Irreversible on the
    /// gateway side; a failure is surfaced as-is, nothing is rolled back.
    #[instrument(skip_all, fields(tid = %tid))]
    pub async fn clear_amount(
        &self,
        tid: &str,
        amount: MinorUnit,
    ) -> CustomResult<PaymentResponse, Mpay24Error> {
        let transaction = self.store.get_transaction(tid).await?;
        self.builder.ensure_ready(&transaction)?;
        self.builder.ensure_positive_amount("amount", amount)?;
        let currency = require_currency(&transaction)?;
        let mpay_tid = require_gateway_tid(&transaction, tid)?;

        let result = self.client.manual_clear(mpay_tid, amount, currency).await;
        self.log_exchange("ClearAmount").await;
        result
    }

    /// Credits an amount of a billed transaction back to the customer.
    #[instrument(skip_all, fields(tid = %tid))]
    pub async fn credit_amount(
        &self,
        tid: &str,
        amount: MinorUnit,
    ) -> CustomResult<PaymentResponse, Mpay24Error> {
        let transaction = self.store.get_transaction(tid).await?;
        self.builder.ensure_ready(&transaction)?;
        self.builder.ensure_positive_amount("amount", amount)?;
        let currency = require_currency(&transaction)?;
        let customer = transaction.customer().map(str::to_owned);
        let mpay_tid = require_gateway_tid(&transaction, tid)?;

        let result = self
            .client
            .manual_credit(mpay_tid, amount, currency, customer)
            .await;
        self.log_exchange("CreditAmount").await;
        result
    }

    /// Cancels an authorized transaction.
    #[instrument(skip_all, fields(tid = %tid))]
    pub async fn cancel_transaction(
        &self,
        tid: &str,
    ) -> CustomResult<PaymentResponse, Mpay24Error> {
        let transaction = self.store.get_transaction(tid).await?;
        self.builder.ensure_ready(&transaction)?;
        let mpay_tid = require_gateway_tid(&transaction, tid)?;

        let result = self.client.manual_reverse(mpay_tid).await;
        self.log_exchange("CancelTransaction").await;
        result
    }

    /// Lists the payment methods enabled for the merchant account.
    #[instrument(skip_all)]
    pub async fn payment_methods(&self) -> CustomResult<PaymentMethods, Mpay24Error> {
        let result = self.client.list_payment_methods().await;
        self.log_exchange("GetPaymentMethods").await;
        result
    }

    /// Forwards the raw request/response pair of the most recent gateway
    /// call to the merchant's payment log, request first. Best effort:
    /// a log failure never alters the primary result.
    async fn log_exchange(&self, operation: &str) {
        if !self.config.debug {
            return;
        }
        if let Some(request) = self.client.last_request() {
            let info = format!(
                "REQUEST to {} - {}\n",
                self.client.etp_url(),
                expand_tags(&request)
            );
            self.write_log_best_effort(operation, &info).await;
        }
        if let Some(response) = self.client.last_response() {
            let info = format!("RESPONSE - {}\n", expand_tags(&response));
            self.write_log_best_effort(operation, &info).await;
        }
    }

    async fn write_log_best_effort(&self, operation: &str, info: &str) {
        if let Err(error) = self.logger.write_log(operation, info).await {
            tracing::warn!(?error, operation, "payment log write failed");
        }
    }
}

fn require_currency(
    transaction: &crate::types::Transaction,
) -> CustomResult<String, Mpay24Error> {
    match transaction.currency() {
        Some(code) if code.len() == consts::CURRENCY_CODE_LENGTH => Ok(code.to_owned()),
        Some(code) => Err(report!(Mpay24Error::InvalidArgument {
            name: "currency",
            message: format!("'{code}' is not a 3-letter ISO currency code"),
        })),
        None => Err(report!(Mpay24Error::InvalidArgument {
            name: "currency",
            message: "transaction carries no currency".to_owned(),
        })),
    }
}

fn require_gateway_tid(
    transaction: &crate::types::Transaction,
    tid: &str,
) -> CustomResult<String, Mpay24Error> {
    transaction
        .gateway_tid()
        .map(str::to_owned)
        .ok_or_else(|| {
            report!(Mpay24Error::TransactionNotFound {
                tid: tid.to_owned(),
            })
        })
}
