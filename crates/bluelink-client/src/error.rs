//! Error types for Bluelink client operations

use bluelink_core::{Brand, CoreError};
use thiserror::Error;

/// Result type alias for Bluelink client operations
pub type Result<T> = std::result::Result<T, BluelinkError>;

/// Errors that can occur during Bluelink client operations
#[derive(Error, Debug)]
pub enum BluelinkError {
    /// Brand not recognized
    #[error("unknown brand: {0}")]
    UnknownBrand(String),

    /// No bearer token, a failure envelope, or HTTP 401/403
    #[error("client not authenticated")]
    NotAuthenticated,

    /// A handshake step rejected the account
    #[error("client authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The account has no vehicles bound to it
    #[error("no vehicle found")]
    NoVehicleFound,

    /// Vehicle command without an implementation
    #[error("function not implemented")]
    NotImplemented,

    /// Embedded stamp pool of a known brand is empty
    #[error("stamp pool for {0} is empty")]
    EmptyStampPool(Brand),

    /// Login redirect without a usable authorization code
    #[error("invalid login redirect: {0}")]
    InvalidRedirect(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Header value rejected by the HTTP stack
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Invalid account or client configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BluelinkError {
    pub(crate) fn authentication_failed(reason: impl Into<String>) -> Self {
        Self::AuthenticationFailed(reason.into())
    }
}

impl From<CoreError> for BluelinkError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownBrand(name) => Self::UnknownBrand(name),
            CoreError::EmptyStampPool(brand) => Self::EmptyStampPool(brand),
            CoreError::NotAuthenticated => Self::NotAuthenticated,
            CoreError::NoVehicleFound => Self::NoVehicleFound,
            CoreError::InvalidRedirect(msg) => Self::InvalidRedirect(msg),
            CoreError::Json(e) => Self::ParseError(e),
            CoreError::Io(e) => Self::IoError(e),
            other @ (CoreError::UnknownRegion(_) | CoreError::Toml(_)) => {
                Self::ConfigError(other.to_string())
            }
        }
    }
}
