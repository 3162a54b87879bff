//! Upstream site directory: record schema and HTTP client.
//!
//! The directory is a single JSON array of charging sites, fetched with
//! one GET and handed to the pipeline as untyped JSON.

mod client;
mod error;
mod types;

pub use client::{DEFAULT_SOURCE_URL, SiteClient, SiteClientConfig};
pub use error::SiteError;
pub use types::{Address, Gps, RawLocation, SiteStatus};
