//! Static style descriptor for the site markers.
//!
//! Serializes to a map-style circle layer, e.g.
//!
//! ```json
//! { "id": "point", "type": "circle",
//!   "paint": { "circle-radius": 7, "circle-color": "#007cbf",
//!              "circle-stroke-color": "white", "circle-stroke-width": 3 } }
//! ```

use serde::Serialize;

/// Layer geometry kind. Sites are always drawn as circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Circle,
}

/// Paint properties of a circle layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CirclePaint {
    #[serde(rename = "circle-radius")]
    pub radius: f64,

    #[serde(rename = "circle-color")]
    pub color: String,

    #[serde(rename = "circle-stroke-color")]
    pub stroke_color: String,

    #[serde(rename = "circle-stroke-width")]
    pub stroke_width: f64,
}

/// A circle layer drawn over the site collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleLayerStyle {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: LayerKind,

    pub paint: CirclePaint,
}

impl Default for CircleLayerStyle {
    fn default() -> Self {
        Self {
            id: "point".to_string(),
            kind: LayerKind::Circle,
            paint: CirclePaint {
                radius: 7.0,
                color: "#007cbf".to_string(),
                stroke_color: "white".to_string(),
                stroke_width: 3.0,
            },
        }
    }
}
