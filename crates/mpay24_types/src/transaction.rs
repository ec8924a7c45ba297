//! The restricted transaction record.
//!
//! A transaction is a key/value record over a fixed, enumerated field set.
//! Typed access through [`TransactionField`] cannot name an unknown field;
//! the string-keyed entry points reject anything outside the set at the
//! boundary instead of silently ignoring it.

use std::collections::BTreeMap;
use std::str::FromStr;

use error_stack::report;
use hyperswitch_masking::Secret;

use crate::{
    errors::{CustomResult, Mpay24Error},
    types::MinorUnit,
};

/// Maximum length of a merchant transaction identifier.
pub const MAX_TID_LENGTH: usize = 32;

/// The fields a transaction record may carry.
///
/// The wire names are the screaming-snake identifiers used by the gateway
/// (`APPR_CODE`, `P_TYPE`, ...); parsing any other identifier fails.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionField {
    /// Per-transaction secret token authenticating confirmation callbacks.
    Secret,
    /// Merchant-assigned transaction identifier, at most 32 characters.
    Tid,
    /// Gateway response status (`OK` / `ERROR`).
    Status,
    /// Gateway-assigned transaction identifier, absent until the gateway
    /// first acknowledges the transaction.
    Mpaytid,
    /// Approval code supplied by the acquirer.
    ApprCode,
    /// Payment type (`CC`, `ELV`, `EPS`, `PAYPAL`, ...).
    PType,
    /// Brand within the payment type (`VISA`, `MASTERCARD`, ...).
    Brand,
    /// Amount in minor units, scaled by 100.
    Price,
    /// 3-letter ISO currency code.
    Currency,
    /// Operation the record was last touched by (`CONFIRMATION`, ...).
    Operation,
    /// 2-letter language code of the pay page.
    Language,
    /// Free-form merchant field passed through by the gateway.
    UserField,
    /// Order description shown on the pay page.
    Orderdesc,
    /// Customer name.
    Customer,
    /// Customer e-mail address.
    CustomerEmail,
    /// Customer identifier used for profile payments.
    CustomerId,
    /// Profile handling outcome (`IGNORED`, `USED`, `CREATED`, ...).
    ProfileStatus,
    /// Fraud filter outcome.
    FilterStatus,
    /// Transaction state reported by the gateway (`RESERVED`, `BILLED`, ...).
    Tstatus,
}

impl TransactionField {
    fn parse(name: &str) -> CustomResult<Self, Mpay24Error> {
        Self::from_str(name).map_err(|_| {
            report!(Mpay24Error::UnknownField {
                field: name.to_owned(),
            })
        })
    }
}

/// One payment transaction as known to the merchant.
///
/// Created per checkout attempt by the transaction store collaborator and
/// mutated by the confirmation handler; the engine never deletes records.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Transaction {
    values: BTreeMap<TransactionField, String>,
}

impl Transaction {
    /// Creates an empty record carrying only the merchant identifier.
    pub fn new(tid: impl Into<String>) -> Self {
        let mut transaction = Self::default();
        transaction.set(TransactionField::Tid, tid);
        transaction
    }

    /// Reads a field. `None` is the absent sentinel; callers must treat
    /// absent and false-equivalent values identically where the gateway
    /// semantics require it.
    pub fn get(&self, field: TransactionField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Writes a field.
    pub fn set(&mut self, field: TransactionField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Reads a field by its wire name, rejecting identifiers outside the
    /// allowed set.
    pub fn get_named(&self, name: &str) -> CustomResult<Option<&str>, Mpay24Error> {
        Ok(self.get(TransactionField::parse(name)?))
    }

    /// Writes a field by its wire name, rejecting identifiers outside the
    /// allowed set.
    pub fn set_named(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> CustomResult<(), Mpay24Error> {
        self.set(TransactionField::parse(name)?, value);
        Ok(())
    }

    /// The merchant transaction identifier, if set.
    pub fn tid(&self) -> Option<&str> {
        self.get(TransactionField::Tid)
    }

    /// The amount in minor units, if set and numeric.
    pub fn price(&self) -> Option<MinorUnit> {
        self.get(TransactionField::Price)?.parse().ok()
    }

    /// The stored currency code, if set.
    pub fn currency(&self) -> Option<&str> {
        self.get(TransactionField::Currency)
    }

    /// The customer reference, if set.
    pub fn customer(&self) -> Option<&str> {
        self.get(TransactionField::Customer)
    }

    /// The per-transaction secret token, if set.
    pub fn secret(&self) -> Option<Secret<String>> {
        self.get(TransactionField::Secret)
            .map(|value| Secret::new(value.to_owned()))
    }

    /// The gateway transaction identifier, only when present and numeric.
    ///
    /// A transaction may receive a confirmation before the gateway id has
    /// been persisted locally, so a missing or malformed value degrades to
    /// `None` and status queries fall back to the merchant identifier.
    pub fn gateway_tid(&self) -> Option<&str> {
        self.get(TransactionField::Mpaytid)
            .filter(|value| !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit()))
    }

    /// Reads a mandatory field, failing the current operation when absent.
    pub fn require(&self, field: TransactionField) -> CustomResult<&str, Mpay24Error> {
        self.get(field)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                report!(Mpay24Error::MissingTransactionData {
                    field: mandatory_field_name(field),
                })
            })
    }
}

fn mandatory_field_name(field: TransactionField) -> &'static str {
    match field {
        TransactionField::Tid => "TID",
        TransactionField::Price => "PRICE",
        TransactionField::Mpaytid => "MPAYTID",
        TransactionField::Currency => "CURRENCY",
        _ => "field",
    }
}
