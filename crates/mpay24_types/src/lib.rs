//! Domain data model for the mPAY24 payment gateway integration.
//!
//! The gateway engine and the merchant-side collaborators both speak in the
//! types defined here: the restricted [`Transaction`] record, the gateway
//! status vocabulary, and the decoded shipping address block carried by
//! transaction status payloads.

pub mod errors;
pub mod shipping;
pub mod status;
pub mod transaction;
pub mod types;

pub use self::{
    errors::{ConfigurationError, CustomResult, Mpay24Error},
    shipping::{ShippingAddress, ShippingInfo},
    status::{StatusResponse, TransactionState},
    transaction::{Transaction, TransactionField},
    types::{CancelFlag, MinorUnit, ResponseStatus},
};
