//! Decoding of the shipping address block embedded in status payloads.
//!
//! The gateway reports a PayPal-provided delivery address as an XML fragment
//! inside the `SHIPPING_ADDR` status attribute:
//!
//! ```xml
//! <Shipping confirmed="false">
//!   <Name>Jane Doe</Name>
//!   <Street>Main Street 1</Street>
//!   <Street2>Unit 4</Street2>
//!   <Zip>1010</Zip>
//!   <City>Vienna</City>
//!   <Country code="AT"/>
//! </Shipping>
//! ```
//!
//! `confirmed` carries the literal strings `"true"` / `"false"`. `Street2`
//! is optional and simply omitted when the source block does not carry it.

use error_stack::ResultExt;
use serde::Deserialize;

use crate::errors::{CustomResult, Mpay24Error};

/// A decoded delivery address.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShippingAddress {
    /// Recipient name.
    pub name: String,
    /// Street line.
    pub street: String,
    /// Optional street continuation, omitted when absent in the source.
    pub street2: Option<String>,
    /// Postal code.
    pub zip: String,
    /// City.
    pub city: String,
    /// 2-letter ISO country code taken from the `code` attribute.
    pub country_code: String,
}

/// A shipping block together with its confirmation flag.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShippingInfo {
    /// Whether the gateway marked the address as confirmed.
    pub confirmed: bool,
    /// The decoded address.
    pub address: ShippingAddress,
}

#[derive(Debug, Deserialize)]
struct ShippingElement {
    #[serde(rename = "@confirmed")]
    confirmed: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Street")]
    street: String,
    #[serde(rename = "Street2")]
    street2: Option<String>,
    #[serde(rename = "Zip")]
    zip: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Country")]
    country: CountryElement,
}

#[derive(Debug, Deserialize)]
struct CountryElement {
    #[serde(rename = "@code")]
    code: String,
}

// Some payloads carry the Shipping element as the document root, others wrap
// it in an order element; both shapes decode to the same record.
#[derive(Debug, Deserialize)]
struct WrappedShipping {
    #[serde(rename = "Shipping")]
    shipping: ShippingElement,
}

/// Parses a `SHIPPING_ADDR` fragment into a typed record.
pub fn parse_shipping_block(xml: &str) -> CustomResult<ShippingInfo, Mpay24Error> {
    let element = quick_xml::de::from_str::<ShippingElement>(xml)
        .or_else(|_| quick_xml::de::from_str::<WrappedShipping>(xml).map(|doc| doc.shipping))
        .change_context(Mpay24Error::ResponseDeserializationFailed)
        .attach_printable("shipping address block is not well-formed")?;

    Ok(ShippingInfo {
        // Anything but the literal "false" counts as confirmed.
        confirmed: element.confirmed != "false",
        address: ShippingAddress {
            name: element.name,
            street: element.street,
            street2: element.street2,
            zip: element.zip,
            city: element.city,
            country_code: element.country.code,
        },
    })
}
