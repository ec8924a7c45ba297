//! Amount and flag primitives used on the gateway wire.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::Mpay24Error;

/// Amount in the smallest currency denomination, scaled by 100
/// (`1000` is `10.00` for a two-decimal currency).
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// Forms a new minor unit amount.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Gets the amount as an i64 value.
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    /// Whether the amount is usable for a clear/credit/payment request.
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for MinorUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for MinorUnit {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

/// Outcome flag of a gateway payment or manual operation.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ResponseStatus {
    /// The gateway accepted the request.
    Ok,
    /// The gateway rejected the request.
    Error,
}

/// Cancellation token for finishing an Express Checkout payment.
///
/// The gateway accepts exactly the literal strings `"true"` and `"false"`;
/// anything else is rejected before a request document is built.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelFlag {
    /// Cancel the transaction after renewing the amounts.
    True,
    /// Proceed with the reservation/billing.
    False,
}

impl CancelFlag {
    /// Whether the flag requests a cancellation.
    pub fn is_cancel(self) -> bool {
        matches!(self, Self::True)
    }
}

impl FromStr for CancelFlag {
    type Err = Mpay24Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "true" => Ok(Self::True),
            "false" => Ok(Self::False),
            other => Err(Mpay24Error::InvalidArgument {
                name: "cancel",
                message: format!("allowed values are 'true' or 'false', got '{other}'"),
            }),
        }
    }
}

impl fmt::Display for CancelFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("true"),
            Self::False => f.write_str("false"),
        }
    }
}
