//! Client configuration

mod client;
mod errors;
mod logging;

pub use client::{ClientConfig, ShippingRateOverride};
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
