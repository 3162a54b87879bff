//! Which sites are shown on the map.

use crate::sites::{RawLocation, SiteStatus};

/// Power rating of the charger generation we display.
pub const ELIGIBLE_POWER_KILOWATT: f64 = 250.0;

/// A site is eligible iff it is open and rated at exactly 250 kW.
///
/// No other field is consulted. In particular a missing GPS block does not
/// make a site ineligible; that is handled by the converter.
pub fn is_eligible(location: &RawLocation) -> bool {
    location.status == SiteStatus::Open && location.power_kilowatt == Some(ELIGIBLE_POWER_KILOWATT)
}
