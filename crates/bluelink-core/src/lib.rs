//! bluelink-core - Core types for the Hyundai Bluelink / Kia UVO cloud API
//!
//! This crate holds everything that does not touch the network: brand
//! identities, account configuration, the endpoint table, the embedded
//! stamp pools, and decoding of the vendor's response envelopes into typed
//! records. The HTTP session lives in `bluelink-client`.

pub mod brand;
pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod models;
pub mod region;
pub mod stamp;

pub use brand::{Brand, BrandProfile};
pub use config::Config;
pub use endpoints::Endpoints;
pub use envelope::{Envelope, RET_CODE_FAIL, RET_CODE_OK};
pub use error::{CoreError, CoreResult};
pub use models::*;
pub use region::Region;
pub use stamp::{stamp, StampPool};
