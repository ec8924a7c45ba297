//! flexLINK invoice pay links.
//!
//! A parallel, simpler mechanism next to the webservice flows: a fixed
//! parameter set is encrypted by an external cipher collaborator and
//! appended to a pay-page checkout URL the customer can follow to settle an
//! invoice. No transaction record is involved.

use crate::configs::GatewaySystem;
use crate::interfaces::{ParamCipher, PaymentLogger};
use crate::mdxi::AddressMode;
use crate::types::{CustomResult, Mpay24Error};

/// Credentials for the flexLINK interface.
#[derive(Clone, Debug)]
pub struct FlexLinkConfig {
    /// SPID assigned by the gateway.
    pub spid: String,
    /// The flexLINK password, held by the cipher collaborator; kept here
    /// only to mirror the account setup.
    pub password: hyperswitch_masking::Secret<String>,
    /// Test or live pay page.
    pub system: GatewaySystem,
    /// Whether parameter assembly is written to the payment log.
    pub debug: bool,
}

/// An invoice to render a pay link for.
///
/// Amounts are major-unit strings (`"12.34"`), unlike the webservice flows.
/// Optional values fall back to the gateway defaults noted per field.
#[derive(Clone, Debug, Default)]
pub struct Invoice {
    /// Invoice identifier shown to the customer.
    pub invoice_id: String,
    /// Amount to invoice, e.g. `"12.34"`.
    pub amount: String,
    /// Currency code; defaults to `EUR`.
    pub currency: Option<String>,
    /// Pay page language; defaults to `DE`.
    pub language: Option<String>,
    /// Free-form merchant field.
    pub user_field: Option<String>,
    /// Product description; defaults to `Rechnungsnummer:`.
    pub description: Option<String>,
    /// Billing address edit mode; defaults to read-write.
    pub mode: Option<AddressMode>,
    /// Customer name.
    pub name: Option<String>,
    /// Billing street.
    pub street: Option<String>,
    /// Billing street continuation.
    pub street2: Option<String>,
    /// Billing postal code.
    pub zip: Option<String>,
    /// Billing city.
    pub city: Option<String>,
    /// Billing country code; defaults to `AT`.
    pub country: Option<String>,
    /// Billing e-mail address.
    pub email: Option<String>,
    /// Success URL.
    pub success_url: Option<String>,
    /// Error URL.
    pub error_url: Option<String>,
    /// Confirmation URL.
    pub confirmation_url: Option<String>,
}

/// flexLINK pay-link generation over an external encryption collaborator.
pub struct FlexLink<P, L> {
    config: FlexLinkConfig,
    cipher: P,
    logger: L,
}

impl<P, L> FlexLink<P, L>
where
    P: ParamCipher,
    L: PaymentLogger,
{
    /// Wires the pay-link generator.
    pub fn new(config: FlexLinkConfig, cipher: P, logger: L) -> Self {
        Self {
            config,
            cipher,
            logger,
        }
    }

    /// Encrypts the invoice's parameter set into the opaque pay-link token.
    pub async fn encrypted_params(&self, invoice: &Invoice) -> CustomResult<String, Mpay24Error> {
        let params = assemble_params(invoice);

        if self.config.debug {
            for (key, value) in &params {
                self.log_best_effort(&format!("flexLINK:\t\t\tParameters: {key} = {value}\n"))
                    .await;
            }
        }

        let encrypted = self.cipher.encrypt(&params).await?;

        if self.config.debug {
            self.log_best_effort(&format!(
                "flexLINK:\t\t\tEncrypted parameters: {encrypted}\n"
            ))
            .await;
        }

        Ok(encrypted)
    }

    /// The full pay-page URL for a previously encrypted parameter set.
    pub fn pay_link(&self, encrypted_params: &str) -> String {
        format!(
            "https://{}.mpay24.com/app/bin/checkout/{}/{encrypted_params}",
            self.config.system.pay_page_host(),
            self.config.spid
        )
    }

    async fn log_best_effort(&self, info: &str) {
        if let Err(error) = self.logger.write_log("flexLINK", info).await {
            tracing::warn!(?error, "flexLINK log write failed");
        }
    }
}

// The gateway decrypts positionally-keyed parameters; the order and the
// short variable names are fixed by the interface.
fn assemble_params(invoice: &Invoice) -> Vec<(String, String)> {
    let mode = match invoice.mode {
        Some(AddressMode::ReadOnly) => "ReadOnly",
        _ => "ReadWrite",
    };
    [
        ("IID", invoice.invoice_id.clone()),
        ("AMO", invoice.amount.clone()),
        ("CUR", or_default(&invoice.currency, "EUR")),
        ("LAN", or_default(&invoice.language, "DE")),
        ("USR", or_default(&invoice.user_field, "")),
        ("DES", or_default(&invoice.description, "Rechnungsnummer:")),
        ("MOD", mode.to_owned()),
        ("NAM", or_default(&invoice.name, "")),
        ("ST1", or_default(&invoice.street, "")),
        ("ST2", or_default(&invoice.street2, "")),
        ("ZIP", or_default(&invoice.zip, "")),
        ("CIT", or_default(&invoice.city, "")),
        ("COU", or_default(&invoice.country, "AT")),
        ("EML", or_default(&invoice.email, "")),
        ("SUC", or_default(&invoice.success_url, "")),
        ("ERR", or_default(&invoice.error_url, "")),
        ("CON", or_default(&invoice.confirmation_url, "")),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_owned(), value))
    .collect()
}

fn or_default(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_owned())
}
