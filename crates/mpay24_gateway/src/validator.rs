//! Structural validation of MDXI documents prior to submission.
//!
//! Validation runs on the built document, not on re-parsed markup, and it
//! never stops at the first problem: every message is accumulated and the
//! whole list is surfaced together with the offending serialized document.
//! When an intermediary proxy is configured the engine skips this step; the
//! proxy performs its own validation and duplicate checks would fight it.

use error_stack::report;
use url::Url;

use crate::consts;
use crate::mdxi::{AddressBlock, MdxiOrder};
use crate::types::{CustomResult, Mpay24Error};

/// Validates a built MDXI document against the gateway's structural rules.
///
/// `serialized` is the wire form the errors refer to; it travels inside the
/// failure for diagnostics.
pub fn validate_mdxi(document: &MdxiOrder, serialized: &str) -> CustomResult<(), Mpay24Error> {
    let mut errors = Vec::new();

    if document.tid.is_empty() {
        errors.push("Order/Tid must not be empty".to_owned());
    } else if document.tid.len() > crate::types::transaction::MAX_TID_LENGTH {
        errors.push(format!(
            "Order/Tid '{}' exceeds {} characters",
            document.tid,
            crate::types::transaction::MAX_TID_LENGTH
        ));
    }

    if !document.price.is_positive() {
        errors.push(format!(
            "Order/Price '{}' must be a positive amount in minor units",
            document.price
        ));
    }

    if let Some(currency) = &document.currency {
        if currency.len() != consts::CURRENCY_CODE_LENGTH {
            errors.push(format!(
                "Order/Currency '{currency}' must be a 3-letter ISO code"
            ));
        }
    }

    if let Some(cart) = &document.shopping_cart {
        if cart.items.is_empty() {
            errors.push("Order/ShoppingCart must carry at least one Item".to_owned());
        }
        for (index, item) in cart.items.iter().enumerate() {
            if item.quantity == 0 {
                errors.push(format!(
                    "Order/ShoppingCart/Item[{index}]/Quantity must be at least 1"
                ));
            }
            if item.description.is_empty() {
                errors.push(format!(
                    "Order/ShoppingCart/Item[{index}]/Description must not be empty"
                ));
            }
        }
    }

    if let Some(billing) = &document.billing_addr {
        check_address("Order/BillingAddr", billing, &mut errors);
    }
    if let Some(shipping) = &document.shipping_addr {
        check_address("Order/ShippingAddr", shipping, &mut errors);
    }

    if let Some(urls) = &document.url {
        check_url("Order/URL/Success", urls.success.as_deref(), &mut errors);
        check_url("Order/URL/Error", urls.error.as_deref(), &mut errors);
        check_url(
            "Order/URL/Confirmation",
            urls.confirmation.as_deref(),
            &mut errors,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(report!(Mpay24Error::DocumentInvalid {
            errors,
            document: serialized.to_owned(),
        }))
    }
}

fn check_address(path: &str, address: &AddressBlock, errors: &mut Vec<String>) {
    if address.name.is_empty() {
        errors.push(format!("{path}/Name must not be empty"));
    }
    if address.country.code.len() != consts::COUNTRY_CODE_LENGTH {
        errors.push(format!(
            "{path}/Country code '{}' must be a 2-letter ISO code",
            address.country.code
        ));
    }
}

fn check_url(path: &str, value: Option<&str>, errors: &mut Vec<String>) {
    if let Some(url) = value {
        if Url::parse(url).is_err() {
            errors.push(format!("{path} '{url}' is not a valid URL"));
        }
    }
}
