use serde::{Deserialize, Serialize};

mod format;

pub use format::LatLonFormatter;

/// A coordinate in geographic space
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorldLocation {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
    /// Altitude in metres, when the view has a vertical dimension
    pub altitude: Option<f64>,
}

impl WorldLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Longitude normalized into [-180, 180)
    pub fn normalized_longitude(&self) -> f64 {
        (self.longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Formats a world location into the header line of a readout
pub trait LocationFormatter: Send + Sync {
    fn format(&self, location: &WorldLocation, include_altitude: bool) -> String;
}

impl<F> LocationFormatter for F
where
    F: Fn(&WorldLocation, bool) -> String + Send + Sync,
{
    fn format(&self, location: &WorldLocation, include_altitude: bool) -> String {
        self(location, include_altitude)
    }
}
