//! Normalized transaction status as reported by the gateway.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::{
    errors::{CustomResult, Mpay24Error},
    shipping::{parse_shipping_block, ShippingAddress},
};

/// Status attribute carrying the embedded shipping block.
const SHIPPING_ADDR: &str = "SHIPPING_ADDR";

/// Transaction states reported by the gateway.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionState {
    /// Authorization succeeded, amount not cleared yet.
    Reserved,
    /// Authorization succeeded and the amount was cleared.
    Billed,
    /// The amount was credited back.
    Credited,
    /// The transaction was canceled.
    Reversed,
    /// The transaction is not fully completed yet.
    Suspended,
    /// No such transaction in the gateway database.
    #[strum(serialize = "NOT FOUND")]
    NotFound,
    /// The transaction was not successful.
    Error,
}

/// A reconciled transaction status.
///
/// Whichever identifier the status query went out with, the result is
/// normalized into this one shape: the flat attribute map as returned by
/// the gateway, a `shipping_confirmed` flag that is always set, and the
/// decomposed delivery address when the gateway reported it unconfirmed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusResponse {
    /// Raw status attributes (`STATUS`, `CURRENCY`, `PRICE`, `APPR_CODE`,
    /// `SHIPPING_ADDR`, ...).
    pub params: BTreeMap<String, String>,
    /// `true` when no shipping block is present or it is already confirmed.
    pub shipping_confirmed: bool,
    /// Decomposed delivery address, populated only while unconfirmed.
    pub shipping: Option<ShippingAddress>,
}

impl StatusResponse {
    /// Normalizes a raw gateway attribute map.
    ///
    /// Decodes an embedded `SHIPPING_ADDR` block when present; without one,
    /// or with an already-confirmed one, shipping counts as confirmed.
    pub fn from_params(params: BTreeMap<String, String>) -> CustomResult<Self, Mpay24Error> {
        let shipping_block = match params.get(SHIPPING_ADDR) {
            Some(xml) if !xml.is_empty() => Some(parse_shipping_block(xml)?),
            _ => None,
        };

        let (shipping_confirmed, shipping) = match shipping_block {
            Some(info) if !info.confirmed => (false, Some(info.address)),
            _ => (true, None),
        };

        Ok(Self {
            params,
            shipping_confirmed,
            shipping,
        })
    }

    /// The transaction state parsed out of the `STATUS` attribute.
    pub fn state(&self) -> Option<TransactionState> {
        TransactionState::from_str(self.params.get("STATUS")?.as_str()).ok()
    }

    /// The field map handed to the transaction update collaborator.
    ///
    /// For an unconfirmed shipping block the decomposed address fields are
    /// merged in; `SHIPP_STREET2` only when the source block carried it.
    /// Otherwise the reconciled attribute set is passed through unmodified.
    pub fn update_fields(&self) -> BTreeMap<String, String> {
        let mut fields = self.params.clone();
        if !self.shipping_confirmed {
            if let Some(address) = &self.shipping {
                fields.insert("SHIPP_NAME".to_owned(), address.name.clone());
                fields.insert("SHIPP_STREET".to_owned(), address.street.clone());
                if let Some(street2) = &address.street2 {
                    fields.insert("SHIPP_STREET2".to_owned(), street2.clone());
                }
                fields.insert("SHIPP_ZIP".to_owned(), address.zip.clone());
                fields.insert("SHIPP_CITY".to_owned(), address.city.clone());
                fields.insert("SHIPP_COUNTRY".to_owned(), address.country_code.clone());
            }
        }
        fields
    }
}
