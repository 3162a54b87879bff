//! Core normalization rules.
//!
//! Pure functions only: deciding which sites qualify and turning a
//! qualifying site into a GeoJSON point. Nothing here does I/O.

mod coordinates;
mod eligibility;
mod feature;

pub use coordinates::{Coordinates, InvalidCoordinates};
pub use eligibility::{ELIGIBLE_POWER_KILOWATT, is_eligible};
pub use feature::{Conversion, SkipReason, point_feature, to_feature};
