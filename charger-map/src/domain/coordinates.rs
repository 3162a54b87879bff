//! Validated WGS-84 positions.

use std::fmt;

use crate::sites::Gps;

/// Error returned when a GPS block cannot be turned into a position.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidCoordinates {
    #[error("latitude is missing")]
    MissingLatitude,

    #[error("longitude is missing")]
    MissingLongitude,

    #[error("coordinate is not a finite number")]
    NotFinite,

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A finite, in-range WGS-84 position in degrees.
///
/// Any `Coordinates` value is valid by construction, so a feature built
/// from one can never carry NaN or out-of-range geometry.
///
/// # Examples
///
/// ```
/// use charger_map::domain::Coordinates;
/// use charger_map::sites::Gps;
///
/// let gps = Gps { latitude: Some(38.9), longitude: Some(-77.3) };
/// let coords = Coordinates::parse(&gps).unwrap();
/// assert_eq!(coords.position(), vec![-77.3, 38.9]);
///
/// let missing = Gps { latitude: None, longitude: Some(-77.3) };
/// assert!(Coordinates::parse(&missing).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinates {
    longitude: f64,
    latitude: f64,
}

impl Coordinates {
    /// Validate a raw GPS block.
    pub fn parse(gps: &Gps) -> Result<Self, InvalidCoordinates> {
        let latitude = gps.latitude.ok_or(InvalidCoordinates::MissingLatitude)?;
        let longitude = gps.longitude.ok_or(InvalidCoordinates::MissingLongitude)?;

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(InvalidCoordinates::NotFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinates::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates::LongitudeOutOfRange(longitude));
        }

        Ok(Coordinates {
            longitude,
            latitude,
        })
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// GeoJSON position: longitude first, then latitude.
    pub fn position(&self) -> Vec<f64> {
        vec![self.longitude, self.latitude]
    }
}

impl fmt::Debug for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinates(lon={}, lat={})", self.longitude, self.latitude)
    }
}
