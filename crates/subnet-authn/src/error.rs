use thiserror::Error;

/// Errors from decoding a dotted-quad address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid IPv4 address format: {input:?}")]
    InvalidAddressFormat { input: String },
}

/// Errors raised while configuring an adapter instance.
///
/// A configuration error means no adapter was built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field}: {message}")]
    InvalidField {
        field: &'static str,
        message: &'static str,
        #[source]
        source: AddressError,
    },

    #[error("unknown configuration field: {0}")]
    UnknownField(String),
}

/// Processing faults from the adapter's lookup entry points.
///
/// These are distinct from a negative authentication result, which is
/// reported as [`crate::AuthnStatus::Failure`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    #[error("malformed source address: {0}")]
    MalformedSourceAddress(#[from] AddressError),

    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// A configuration field value was rejected by its validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: &'static str,
    #[source]
    pub source: AddressError,
}
