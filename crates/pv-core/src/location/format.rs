//! Default latitude/longitude formatting

use super::{LocationFormatter, WorldLocation};

/// Fixed-width "Lat / Lon / Alt" formatter
#[derive(Debug, Clone)]
pub struct LatLonFormatter {
    /// Decimal places for latitude and longitude
    pub decimals: usize,
    /// Width each coordinate is padded to so the header does not jitter while dragging
    pub field_width: usize,
}

impl Default for LatLonFormatter {
    fn default() -> Self {
        Self {
            decimals: 2,
            field_width: 8,
        }
    }
}

impl LatLonFormatter {
    pub fn with_decimals(decimals: usize) -> Self {
        Self {
            decimals,
            field_width: decimals + 6,
        }
    }

    fn hemisphere(value: f64, positive: char, negative: char) -> (f64, char) {
        if value < 0.0 {
            (-value, negative)
        } else {
            (value, positive)
        }
    }
}

impl LocationFormatter for LatLonFormatter {
    fn format(&self, location: &WorldLocation, include_altitude: bool) -> String {
        let (lat, ns) = Self::hemisphere(location.latitude, 'N', 'S');
        let (lon, ew) = Self::hemisphere(location.normalized_longitude(), 'E', 'W');

        let mut text = format!(
            "Lat: {:>width$.prec$}{}  Lon: {:>width$.prec$}{}",
            lat,
            ns,
            lon,
            ew,
            width = self.field_width,
            prec = self.decimals,
        );

        if include_altitude {
            if let Some(alt) = location.altitude {
                text.push_str(&format!("  Alt: {:>8.0} m", alt));
            }
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hemispheres() {
        let formatter = LatLonFormatter::default();
        let text = formatter.format(&WorldLocation::new(-33.5, -70.25), false);
        assert_eq!(text, "Lat:    33.50S  Lon:    70.25W");
    }

    #[test]
    fn test_altitude_only_when_requested() {
        let formatter = LatLonFormatter::default();
        let location = WorldLocation::new(40.0, 105.0).with_altitude(1655.0);

        assert!(!formatter.format(&location, false).contains("Alt"));
        assert!(formatter.format(&location, true).ends_with("Alt:     1655 m"));
    }

    #[test]
    fn test_longitude_wraps() {
        let location = WorldLocation::new(0.0, 190.0);
        assert_eq!(location.normalized_longitude(), -170.0);
        assert_eq!(WorldLocation::new(0.0, -180.0).normalized_longitude(), -180.0);
    }

    #[test]
    fn test_closure_formatter() {
        let formatter = |loc: &WorldLocation, _alt: bool| format!("{:.1},{:.1}", loc.latitude, loc.longitude);
        assert_eq!(LocationFormatter::format(&formatter, &WorldLocation::new(1.0, 2.0), true), "1.0,2.0");
    }
}
