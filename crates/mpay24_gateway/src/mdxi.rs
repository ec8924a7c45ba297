//! Order document models mirroring the gateway's document schema.
//!
//! Two document families share the same building rules: the MDXI submitted
//! for a redirect payment, and the slimmer operation orders used for profile
//! and Express Checkout payments. Both serialize through [`to_xml_string`],
//! which prepends the XML declaration the webservice expects.

use error_stack::ResultExt;
use serde::Serialize;

use crate::consts;
use crate::types::{CancelFlag, CustomResult, MinorUnit, Mpay24Error};

/// Serializes an order document to its wire form.
pub fn to_xml_string<T: Serialize>(document: &T) -> CustomResult<String, Mpay24Error> {
    let body = quick_xml::se::to_string(document)
        .change_context(Mpay24Error::DocumentEncodingFailed)
        .attach_printable("order document did not serialize")?;
    Ok(format!(
        "<?xml version=\"{}\" encoding=\"{}\"?>{body}",
        consts::XML_VERSION,
        consts::XML_ENCODING
    ))
}

/// The MDXI order document driving a redirect payment.
#[derive(Clone, Debug, Serialize)]
#[serde(rename = "Order")]
pub struct MdxiOrder {
    /// Merchant transaction identifier, at most 32 characters.
    #[serde(rename = "Tid")]
    pub tid: String,
    #[serde(rename = "ShoppingCart", skip_serializing_if = "Option::is_none")]
    pub shopping_cart: Option<ShoppingCart>,
    /// Amount in minor units, scaled by 100.
    #[serde(rename = "Price")]
    pub price: MinorUnit,
    #[serde(rename = "Currency", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(rename = "Language", skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "UserField", skip_serializing_if = "Option::is_none")]
    pub user_field: Option<String>,
    #[serde(rename = "BillingAddr", skip_serializing_if = "Option::is_none")]
    pub billing_addr: Option<AddressBlock>,
    #[serde(rename = "ShippingAddr", skip_serializing_if = "Option::is_none")]
    pub shipping_addr: Option<AddressBlock>,
    #[serde(rename = "URL", skip_serializing_if = "Option::is_none")]
    pub url: Option<CallbackUrls>,
}

impl MdxiOrder {
    /// A minimal document for the given order identity and amount.
    pub fn new(tid: impl Into<String>, price: MinorUnit) -> Self {
        Self {
            tid: tid.into(),
            shopping_cart: None,
            price,
            currency: None,
            language: None,
            user_field: None,
            billing_addr: None,
            shipping_addr: None,
            url: None,
        }
    }
}

/// Line items shown on the pay page.
#[derive(Clone, Debug, Serialize)]
pub struct ShoppingCart {
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Item")]
    pub items: Vec<CartItem>,
}

/// One shopping cart line.
#[derive(Clone, Debug, Serialize)]
pub struct CartItem {
    #[serde(rename = "Number", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "ItemPrice")]
    pub item_price: MinorUnit,
}

/// Edit mode of an address block on the pay page.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum AddressMode {
    /// The customer may change the address.
    ReadWrite,
    /// The address is displayed but fixed.
    ReadOnly,
}

/// A billing or shipping address block.
#[derive(Clone, Debug, Serialize)]
pub struct AddressBlock {
    #[serde(rename = "@Mode", skip_serializing_if = "Option::is_none")]
    pub mode: Option<AddressMode>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Street")]
    pub street: String,
    #[serde(rename = "Street2", skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(rename = "Zip")]
    pub zip: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Country")]
    pub country: Country,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Country element carrying its ISO code as an attribute.
#[derive(Clone, Debug, Serialize)]
pub struct Country {
    #[serde(rename = "@code")]
    pub code: String,
}

/// Success, error and confirmation callback targets.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CallbackUrls {
    #[serde(rename = "Success", skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(rename = "Error", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "Confirmation", skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
}

/// The operation order used for profile and Express Checkout payments.
///
/// The finish variant additionally carries the gateway transaction id, the
/// renegotiated shipping costs and total amount, and the cancel flag.
#[derive(Clone, Debug, Serialize)]
#[serde(rename = "Order")]
pub struct PaymentOrder {
    #[serde(rename = "Tid")]
    pub tid: String,
    #[serde(rename = "Price")]
    pub price: MinorUnit,
    #[serde(rename = "Currency", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(rename = "CustomerId", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(rename = "MpayTid", skip_serializing_if = "Option::is_none")]
    pub mpay_tid: Option<String>,
    #[serde(rename = "ShippingCosts", skip_serializing_if = "Option::is_none")]
    pub shipping_costs: Option<MinorUnit>,
    #[serde(rename = "Cancel", skip_serializing_if = "Option::is_none")]
    pub cancel: Option<CancelFlag>,
    #[serde(rename = "URL", skip_serializing_if = "Option::is_none")]
    pub url: Option<CallbackUrls>,
}

impl PaymentOrder {
    /// A minimal operation order for the given identity and amount.
    pub fn new(tid: impl Into<String>, price: MinorUnit) -> Self {
        Self {
            tid: tid.into(),
            price,
            currency: None,
            customer_id: None,
            mpay_tid: None,
            shipping_costs: None,
            cancel: None,
            url: None,
        }
    }
}
