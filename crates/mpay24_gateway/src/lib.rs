//! Transaction lifecycle and confirmation protocol engine for the mPAY24
//! payment gateway.
//!
//! The engine drives a merchant checkout against the gateway's webservice
//! interface: it builds and validates the order documents submitted per
//! payment operation, reconciles asynchronous confirmation callbacks against
//! authoritative gateway status, and performs the post-authorization
//! operations (clear, credit, reverse).
//!
//! Everything environment-specific stays outside: the SOAP transport is the
//! [`client::GatewayClient`] trait, persistence and secret derivation are the
//! collaborator traits in [`interfaces`], and the hosting application wires
//! them into [`payments::Mpay24`].

pub mod builder;
pub mod client;
pub mod configs;
pub mod consts;
pub mod flexlink;
pub mod interfaces;
pub mod mdxi;
pub mod payments;
pub mod validator;

pub use mpay24_types as types;

pub use self::{
    client::{GatewayClient, PaymentMethods, PaymentResponse, StatusQuery},
    configs::{CallbackConfig, GatewaySystem, MerchantConfig, ProxyConfig},
    payments::{ConfirmationOutcome, ConfirmationState, Mpay24},
};
