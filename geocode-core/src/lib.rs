//! Core library for the `geocode` CLI.
//!
//! This crate defines:
//! - Classification of raw location strings (ZIP code or "city, state")
//! - Construction of OpenWeather geocoding requests
//! - Normalization of API responses and failures into one result type
//! - A sequential batch processor over a pluggable HTTP transport
//!
//! It is used by `geocode-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod normalizer;
pub mod processor;
pub mod transport;
pub mod validator;

pub use config::Config;
pub use endpoint::EndpointBuilder;
pub use error::GeoError;
pub use model::{ClassifiedLocation, EndpointRequest, GeoResult, LOCATION_CODE_SEPARATOR, Place, ResultLine};
pub use normalizer::{HttpOutcome, normalize};
pub use processor::GeoLocator;
pub use transport::{GeoTransport, HttpTransport};
pub use validator::classify;
