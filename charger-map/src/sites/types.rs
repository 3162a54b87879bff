//! Raw site records as published by the upstream directory.
//!
//! These mirror the JSON shape of the feed. Almost every field is optional:
//! the feed is sparse and we only consume a handful of fields, so a record
//! missing display metadata, or carrying it with the wrong type, must still
//! parse. A value of the wrong type decodes as absent.

use std::fmt;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Decode a field, treating a value of the wrong type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decode a string field; null or a non-string becomes empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Decode a status; null or a non-string becomes `Other("")`.
fn lenient_status<'de, D>(deserializer: D) -> Result<SiteStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Lifecycle status of a site.
///
/// Converted from the raw string exactly (case-sensitive). Unknown values
/// are preserved in `Other` so they round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum SiteStatus {
    Open,
    Construction,
    Permit,
    Plan,
    Voting,
    Expanding,
    ClosedTemp,
    ClosedPerm,
    Other(String),
}

impl SiteStatus {
    /// The raw feed representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            SiteStatus::Open => "OPEN",
            SiteStatus::Construction => "CONSTRUCTION",
            SiteStatus::Permit => "PERMIT",
            SiteStatus::Plan => "PLAN",
            SiteStatus::Voting => "VOTING",
            SiteStatus::Expanding => "EXPANDING",
            SiteStatus::ClosedTemp => "CLOSED_TEMP",
            SiteStatus::ClosedPerm => "CLOSED_PERM",
            SiteStatus::Other(s) => s,
        }
    }
}

impl Default for SiteStatus {
    fn default() -> Self {
        SiteStatus::Other(String::new())
    }
}

impl From<String> for SiteStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "OPEN" => SiteStatus::Open,
            "CONSTRUCTION" => SiteStatus::Construction,
            "PERMIT" => SiteStatus::Permit,
            "PLAN" => SiteStatus::Plan,
            "VOTING" => SiteStatus::Voting,
            "EXPANDING" => SiteStatus::Expanding,
            "CLOSED_TEMP" => SiteStatus::ClosedTemp,
            "CLOSED_PERM" => SiteStatus::ClosedPerm,
            _ => SiteStatus::Other(s),
        }
    }
}

impl From<SiteStatus> for String {
    fn from(status: SiteStatus) -> Self {
        match status {
            SiteStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GPS block of a site, in WGS-84 degrees.
///
/// Either component may be absent in the feed; validation happens in
/// [`crate::domain::Coordinates::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Gps {
    #[serde(default, deserialize_with = "lenient")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub longitude: Option<f64>,
}

/// Postal address of a site. Display-only.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, deserialize_with = "lenient")]
    pub street: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub zip: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub country_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub region_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub region: Option<String>,
}

/// One charging site from the upstream directory.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLocation {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub location_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: SiteStatus,
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<Address>,
    #[serde(default, deserialize_with = "lenient")]
    pub gps: Option<Gps>,
    #[serde(default, deserialize_with = "lenient")]
    pub power_kilowatt: Option<f64>,

    // Carried for completeness, not consumed by the pipeline.
    #[serde(default, deserialize_with = "lenient")]
    pub date_opened: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub stall_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub counted: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub elevation_meters: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub solar_canopy: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub battery: Option<bool>,
    #[serde(default, rename = "otherEVs", deserialize_with = "lenient")]
    pub other_evs: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub status_days: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub url_discuss: Option<bool>,
}
