//! Error types shared across the gateway engine.

/// Custom Result
///
/// Effectively, equivalent to `Result<T, error_stack::Report<E>>`, allowing
/// `error_stack::Report<E>` specific extendability.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Failures raised by the engine while building, submitting or reconciling a
/// payment transaction.
///
/// Validation and precondition variants abort the current operation before
/// any network interaction takes place; a gateway failure is surfaced as-is
/// and never partially applied locally.
#[derive(Debug, thiserror::Error)]
pub enum Mpay24Error {
    /// Access to a transaction field outside the fixed allowed set. This is
    /// a programmer error on the caller's side, not recoverable input.
    #[error("transaction field '{field}' is not part of the allowed field set")]
    UnknownField {
        /// The rejected field identifier.
        field: String,
    },

    /// TID or PRICE missing before a gateway operation.
    #[error("transaction is missing mandatory data: {field}")]
    MissingTransactionData {
        /// Name of the absent mandatory field.
        field: &'static str,
    },

    /// The built order document failed structural validation. Carries every
    /// accumulated validator message together with the offending document.
    #[error("order document failed validation: {}", errors.join("; "))]
    DocumentInvalid {
        /// All validator messages, never truncated to the first failure.
        errors: Vec<String>,
        /// The serialized document the messages refer to.
        document: String,
    },

    /// Malformed caller-supplied argument (amount, currency, cancel token).
    #[error("invalid value for '{name}': {message}")]
    InvalidArgument {
        /// Argument name as exposed on the public operation.
        name: &'static str,
        /// Human-readable description of the rejection.
        message: String,
    },

    /// A post-authorization operation was requested for a transaction the
    /// gateway has never acknowledged (no gateway transaction id on record).
    #[error("transaction '{tid}' has no gateway transaction id on record")]
    TransactionNotFound {
        /// The merchant transaction identifier.
        tid: String,
    },

    /// Failure reported by the gateway client facade.
    #[error("gateway request failed")]
    GatewayError,

    /// An order document could not be serialized to its wire form.
    #[error("failed to encode order document")]
    DocumentEncodingFailed,

    /// A gateway payload could not be decoded.
    #[error("failed to decode gateway payload")]
    ResponseDeserializationFailed,

    /// Failure inside a merchant-side collaborator (store, factory, secret
    /// provider). The report attached by the collaborator carries detail.
    #[error("merchant collaborator call failed")]
    CollaboratorError,
}

/// Malformed merchant credentials or proxy settings. Fatal at engine
/// construction; nothing is sent to the gateway with a rejected config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// Merchant ids are 5-digit account numbers, `7xxxx` on the live system
    /// and `9xxxx` on the test system.
    #[error("merchant id '{0}' must be a 5-digit number starting with 7 or 9")]
    InvalidMerchantId(String),

    /// Proxy ports are 4-digit numbers.
    #[error("proxy port '{0}' must be a 4-digit number")]
    InvalidProxyPort(String),

    /// A callback URL did not parse.
    #[error("malformed {kind} callback url '{url}'")]
    InvalidCallbackUrl {
        /// Which of the configured callback URLs was rejected.
        kind: &'static str,
        /// The rejected value.
        url: String,
    },
}
