//! Vendor payload models

pub mod auth;
pub mod status;
pub mod vehicle;

pub use auth::*;
pub use status::*;
pub use vehicle::*;
