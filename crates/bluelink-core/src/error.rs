//! Error types shared by the core data model

use thiserror::Error;

use crate::brand::Brand;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while interpreting configuration or vendor payloads
#[derive(Debug, Error)]
pub enum CoreError {
    /// Brand name not recognized
    #[error("unknown brand: {0}")]
    UnknownBrand(String),

    /// Region name not recognized
    #[error("unknown region: {0}")]
    UnknownRegion(String),

    /// The embedded stamp pool of a known brand holds no tokens
    #[error("stamp pool for {0} is empty")]
    EmptyStampPool(Brand),

    /// Envelope reported a non-success `retCode`, or the session lacks a token
    #[error("client not authenticated")]
    NotAuthenticated,

    /// Vehicle listing succeeded but returned no vehicles
    #[error("no vehicle found")]
    NoVehicleFound,

    /// Login redirect URL missing, malformed, or without an authorization code
    #[error("invalid login redirect: {0}")]
    InvalidRedirect(String),

    /// Malformed JSON payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML configuration
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error while reading configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
