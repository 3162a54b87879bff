//! V3 supercharger map server.
//!
//! Fetches the public supercharger directory, keeps the open 250 kW sites,
//! converts them into GeoJSON points and serves them to a browser map.

pub mod config;
pub mod domain;
pub mod pipeline;
pub mod sites;
pub mod web;
