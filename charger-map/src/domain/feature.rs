//! Conversion of sites into GeoJSON point features.

use geojson::{Feature, Geometry, JsonObject, Value};

use crate::sites::RawLocation;

use super::coordinates::{Coordinates, InvalidCoordinates};

/// Why a site produced no feature.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SkipReason {
    #[error("site has no GPS block")]
    MissingGps,

    #[error("invalid GPS block: {0}")]
    InvalidCoordinates(#[from] InvalidCoordinates),
}

/// Result of converting one site.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Converted(Feature),
    Skipped(SkipReason),
}

impl Conversion {
    /// The feature, if conversion succeeded.
    pub fn into_feature(self) -> Option<Feature> {
        match self {
            Conversion::Converted(feature) => Some(feature),
            Conversion::Skipped(_) => None,
        }
    }
}

/// Build a point feature at `coords` carrying only the site name.
///
/// Coordinates pass through unchanged: no reprojection, no rounding.
pub fn point_feature(name: &str, coords: Coordinates) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), serde_json::json!(name));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(coords.position()))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Convert a site into a point feature, or say why it can't be.
pub fn to_feature(location: &RawLocation) -> Conversion {
    let Some(gps) = location.gps.as_ref() else {
        return Conversion::Skipped(SkipReason::MissingGps);
    };

    match Coordinates::parse(gps) {
        Ok(coords) => Conversion::Converted(point_feature(&location.name, coords)),
        Err(e) => Conversion::Skipped(e.into()),
    }
}
