//! Bluelink Client Library
//!
//! Async session client for the Hyundai Bluelink and Kia UVO connected-car
//! backends (European region).
//!
//! # Example
//!
//! ```rust,no_run
//! use bluelink_client::{BluelinkClient, Brand, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::new("driver@example.com", "password", Brand::Kia);
//!     let mut client = BluelinkClient::new(config)?;
//!
//!     client.authenticate().await?;
//!
//!     for vehicle in client.list_vehicles().await? {
//!         let status = vehicle.status().await?;
//!         println!("{}: {}% ({} km)", vehicle, status.soc(), status.range_left());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides a scripted vendor backend:
//!
//! ```rust,ignore
//! use bluelink_client::testing::MockVendor;
//!
//! let vendor = MockVendor::new();
//! let server = vendor.start().await?;
//! let mut client = server.client(config)?;
//! client.authenticate().await?;
//! ```

mod auth;
mod client;
mod credentials;
mod error;
mod headers;
mod options;
pub mod testing;
mod vehicle;

pub use client::BluelinkClient;
pub use credentials::Credentials;
pub use error::{BluelinkError, Result};
pub use headers::HeaderBuilder;
pub use options::{ClientOptions, DEFAULT_USER_AGENT};
pub use vehicle::{StartOptions, Vehicle};

// Re-export core types for convenience
pub use bluelink_core::models::{PlugType, VehicleInfo, VehicleStatus};
pub use bluelink_core::{Brand, Config, Endpoints, Region};
