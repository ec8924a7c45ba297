//! Merchant-side configuration handed to the engine at construction.

use error_stack::report;
use hyperswitch_masking::Secret;
use url::Url;

use crate::consts;
use crate::types::{errors::ConfigurationError, CustomResult};

/// Which gateway system requests are directed at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GatewaySystem {
    /// The test system; merchant accounts start with `9`.
    Test,
    /// The live system; merchant accounts start with `7`.
    Live,
}

impl GatewaySystem {
    /// The webservice endpoint of this system.
    pub fn etp_url(self) -> &'static str {
        match self {
            Self::Test => consts::ETP_TEST_URL,
            Self::Live => consts::ETP_LIVE_URL,
        }
    }

    /// The pay page host label of this system.
    pub fn pay_page_host(self) -> &'static str {
        match self {
            Self::Test => consts::PAY_PAGE_TEST_HOST,
            Self::Live => consts::PAY_PAGE_LIVE_HOST,
        }
    }
}

/// An intermediary proxy between the merchant and the gateway.
///
/// With a proxy in place the engine skips its own document validation; the
/// proxy performs it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProxyConfig {
    /// Proxy host name.
    pub host: String,
    /// Proxy port, a 4-digit number.
    pub port: String,
}

/// Merchant credentials and connection settings.
#[derive(Clone, Debug)]
pub struct MerchantConfig {
    /// 5-digit account number supported by the gateway.
    pub merchant_id: String,
    /// The webservice password.
    pub soap_password: Secret<String>,
    /// Test or live system.
    pub system: GatewaySystem,
    /// Optional intermediary proxy.
    pub proxy: Option<ProxyConfig>,
    /// Whether raw request/response pairs are forwarded to the merchant's
    /// payment log.
    pub debug: bool,
}

impl MerchantConfig {
    /// Checks credential and proxy shape. The engine refuses construction
    /// on the first malformed setting.
    pub fn validate(&self) -> CustomResult<(), ConfigurationError> {
        let id = self.merchant_id.as_str();
        let well_formed = id.len() == consts::MERCHANT_ID_LENGTH
            && id.bytes().all(|byte| byte.is_ascii_digit())
            && id
                .chars()
                .next()
                .is_some_and(|first| {
                    first == consts::LIVE_MERCHANT_PREFIX || first == consts::TEST_MERCHANT_PREFIX
                });
        if !well_formed {
            return Err(report!(ConfigurationError::InvalidMerchantId(
                id.to_owned()
            )));
        }

        if let Some(proxy) = &self.proxy {
            let port = proxy.port.as_str();
            if port.len() != consts::PROXY_PORT_LENGTH
                || !port.bytes().all(|byte| byte.is_ascii_digit())
            {
                return Err(report!(ConfigurationError::InvalidProxyPort(
                    port.to_owned()
                )));
            }
        }

        Ok(())
    }
}

/// Default callback URLs applied to order documents that do not set their
/// own. An explicitly set document value always wins over these defaults.
#[derive(Clone, Debug)]
pub struct CallbackConfig {
    /// Where the customer lands after a successful payment.
    pub success_url: Url,
    /// Where the customer lands after a failed payment.
    pub error_url: Url,
    /// Where the gateway delivers confirmation callbacks.
    pub confirmation_url: Url,
}

impl CallbackConfig {
    /// Parses the three callback URLs, rejecting malformed values at
    /// construction rather than at submission time.
    pub fn new(
        success_url: &str,
        error_url: &str,
        confirmation_url: &str,
    ) -> CustomResult<Self, ConfigurationError> {
        Ok(Self {
            success_url: parse_callback_url("success", success_url)?,
            error_url: parse_callback_url("error", error_url)?,
            confirmation_url: parse_callback_url("confirmation", confirmation_url)?,
        })
    }
}

fn parse_callback_url(kind: &'static str, url: &str) -> CustomResult<Url, ConfigurationError> {
    Url::parse(url).map_err(|_| {
        report!(ConfigurationError::InvalidCallbackUrl {
            kind,
            url: url.to_owned(),
        })
    })
}
