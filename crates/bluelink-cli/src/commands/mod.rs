//! Command implementations for the bluelink CLI

pub mod stamp;
pub mod status;
pub mod vehicles;

pub use stamp::stamp;
pub use status::status;
pub use vehicles::vehicles;
