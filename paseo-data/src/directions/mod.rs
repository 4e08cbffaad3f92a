//! HTTP walking-directions provider.
//!
//! [`HttpDirectionsProvider`] implements [`paseo_core::DirectionsProvider`]
//! against any service speaking the Google Directions JSON format.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use paseo_core::{DirectionsProvider, DirectionsRequest, GeoPoint};
//! use paseo_data::directions::{HttpDirectionsProvider, HttpDirectionsProviderConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpDirectionsProviderConfig::default()
//!     .with_api_key("my-key")
//!     .with_timeout(Duration::from_secs(5));
//! let provider = HttpDirectionsProvider::with_config(config)?;
//!
//! let request = DirectionsRequest {
//!     origin: GeoPoint::new(20.5888, -100.3899),
//!     destination: GeoPoint::new(20.6042, -100.4028),
//!     stops: vec![GeoPoint::new(20.595, -100.395)],
//!     preserve_order: true,
//! };
//! let directions = provider.walking_route(&request).await?;
//! println!("{} legs", directions.legs.len());
//! # Ok(())
//! # }
//! ```

mod google;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpDirectionsProvider,
    HttpDirectionsProviderConfig, ProviderBuildError,
};
