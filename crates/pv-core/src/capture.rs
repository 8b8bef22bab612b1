//! Metadata for images captured from a view
//!
//! A captured image keeps enough context (when, where, from which
//! viewpoint) for it to be placed again on a map or in a movie.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::location::WorldLocation;

/// Camera orientation at capture time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewpoint {
    /// Degrees clockwise from north
    pub azimuth: f64,
    /// Degrees from vertical
    pub tilt: f64,
}

/// Geographic extent covered by an image
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    pub fn contains(&self, location: &WorldLocation) -> bool {
        let lat_ok = location.latitude <= self.north && location.latitude >= self.south;
        let lon = location.normalized_longitude();
        let lon_ok = if self.west <= self.east {
            lon >= self.west && lon <= self.east
        } else {
            // Crosses the dateline
            lon >= self.west || lon <= self.east
        };
        lat_ok && lon_ok
    }
}

/// A captured image and where/when it was taken
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapturedImage {
    pub path: PathBuf,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<WorldLocation>,
    #[serde(default)]
    pub viewpoint: Option<Viewpoint>,
    #[serde(default)]
    pub bounds: Option<GeoBounds>,
}

impl CapturedImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            time: None,
            location: None,
            viewpoint: None,
            bounds: None,
        }
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_location(mut self, location: WorldLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_viewpoint(mut self, viewpoint: Viewpoint) -> Self {
        self.viewpoint = Some(viewpoint);
        self
    }

    pub fn with_bounds(mut self, bounds: GeoBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    /// File name for display in lists
    pub fn display_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed image")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_json_roundtrip_keeps_metadata() {
        let image = CapturedImage::new("/tmp/frames/frame_001.png")
            .with_time(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
            .with_location(WorldLocation::new(40.0, -105.0).with_altitude(1600.0))
            .with_viewpoint(Viewpoint { azimuth: 90.0, tilt: 30.0 });

        let json = serde_json::to_string(&image).unwrap();
        let back: CapturedImage = serde_json::from_str(&json).unwrap();

        assert_eq!(back, image);
        assert_eq!(back.display_name(), "frame_001.png");
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let image: CapturedImage = serde_json::from_str(r#"{"path": "a.jpg"}"#).unwrap();
        assert!(!image.has_location());
        assert!(image.time.is_none());
    }

    #[test]
    fn test_bounds_across_dateline() {
        let bounds = GeoBounds { north: 10.0, south: -10.0, east: -170.0, west: 170.0 };
        assert!(bounds.contains(&WorldLocation::new(0.0, 175.0)));
        assert!(bounds.contains(&WorldLocation::new(0.0, -175.0)));
        assert!(!bounds.contains(&WorldLocation::new(0.0, 0.0)));
        assert!(!bounds.contains(&WorldLocation::new(20.0, 175.0)));
    }
}
