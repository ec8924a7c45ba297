//! Gateway-wide constants.

/// Webservice endpoint of the test system.
pub const ETP_TEST_URL: &str = "https://test.mpay24.com/app/bin/etpproxy_v15";

/// Webservice endpoint of the live system.
pub const ETP_LIVE_URL: &str = "https://www.mpay24.com/app/bin/etpproxy_v15";

/// Host label of the test pay page, used for flexLINK checkout URLs.
pub const PAY_PAGE_TEST_HOST: &str = "test";

/// Host label of the live pay page, used for flexLINK checkout URLs.
pub const PAY_PAGE_LIVE_HOST: &str = "www";

/// XML declaration attributes prepended to serialized order documents.
pub const XML_VERSION: &str = "1.0";
/// Document encoding declared on serialized order documents.
pub const XML_ENCODING: &str = "UTF-8";

/// Merchant account numbers are exactly this many digits.
pub const MERCHANT_ID_LENGTH: usize = 5;
/// Leading digit of live merchant accounts.
pub const LIVE_MERCHANT_PREFIX: char = '7';
/// Leading digit of test merchant accounts.
pub const TEST_MERCHANT_PREFIX: char = '9';
/// Proxy ports are 4-digit numbers.
pub const PROXY_PORT_LENGTH: usize = 4;

/// Length of an ISO currency code on the wire. The shape is checked, the
/// code is not matched against a currency list.
pub const CURRENCY_CODE_LENGTH: usize = 3;
/// Length of an ISO country code inside address blocks.
pub const COUNTRY_CODE_LENGTH: usize = 2;
