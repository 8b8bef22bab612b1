//! Demo mode for the probe viewer
//! A synthetic globe with a few analytic layers to probe

use std::f64::consts::PI;
use std::sync::Arc;

use parking_lot::RwLock;
use pv_core::{
    AnimationClock, AnimationState, OverlayLayer, ReadoutError, ReadoutRow, ReadoutSample, ViewBounds,
    ViewSurface, WorldLocation,
};

/// Hourly frames for one day
pub fn demo_times() -> Vec<f64> {
    (0..24).map(|h| h as f64 * 3600.0).collect()
}

/// Whole-globe equirectangular view
pub struct GlobeSurface {
    name: String,
    layers: RwLock<Vec<Arc<dyn OverlayLayer>>>,
    clock: Arc<AnimationClock>,
    bounds: RwLock<ViewBounds>,
}

impl GlobeSurface {
    pub fn new(name: impl Into<String>, clock: Arc<AnimationClock>) -> Self {
        Self {
            name: name.into(),
            layers: RwLock::new(Vec::new()),
            clock,
            bounds: RwLock::new(ViewBounds::default()),
        }
    }

    pub fn add_layer(&self, layer: Arc<dyn OverlayLayer>) {
        self.layers.write().push(layer);
    }

    pub fn remove_layer(&self, name: &str) {
        self.layers.write().retain(|layer| layer.name() != name);
    }
}

impl ViewSurface for GlobeSurface {
    fn name(&self) -> &str {
        &self.name
    }

    fn screen_to_world(&self, x: f32, y: f32) -> Result<WorldLocation, ReadoutError> {
        let bounds = *self.bounds.read();
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return Err(ReadoutError::Other("view has not been laid out".to_string()));
        }
        if x < 0.0 || y < 0.0 || x > bounds.width || y > bounds.height {
            return Err(ReadoutError::OffSurface { x, y });
        }

        let lon = (x / bounds.width) as f64 * 360.0 - 180.0;
        let lat = 90.0 - (y / bounds.height) as f64 * 180.0;
        Ok(WorldLocation::new(lat, lon).with_altitude(terrain_height(lat, lon).max(0.0)))
    }

    fn active_layers(&self) -> Vec<Arc<dyn OverlayLayer>> {
        self.layers.read().clone()
    }

    fn animation(&self) -> AnimationState {
        self.clock.current()
    }

    fn screen_bounds(&self) -> ViewBounds {
        *self.bounds.read()
    }

    fn set_screen_bounds(&self, bounds: ViewBounds) {
        *self.bounds.write() = bounds;
    }
}

/// Synthetic terrain in metres; negative over ocean
fn terrain_height(lat: f64, lon: f64) -> f64 {
    let (la, lo) = (lat.to_radians(), lon.to_radians());
    2500.0 * (2.0 * la).cos() * (3.0 * lo).sin() - 800.0
}

/// Surface temperature following the sun around the globe
pub struct TemperatureLayer;

impl TemperatureLayer {
    fn value(location: &WorldLocation, time: f64) -> f64 {
        let day_phase = (time / 86_400.0) * 2.0 * PI + location.longitude.to_radians();
        30.0 * location.latitude.to_radians().cos() - 5.0 + 6.0 * day_phase.sin()
    }
}

impl OverlayLayer for TemperatureLayer {
    fn name(&self) -> &str {
        "Temperature"
    }

    fn readout_at(
        &self,
        location: &WorldLocation,
        time: f64,
        _frame: usize,
        samples: &mut Vec<ReadoutSample>,
    ) -> Result<Vec<ReadoutRow>, ReadoutError> {
        let value = Self::value(location, time);
        samples.push(ReadoutSample {
            layer: self.name().to_string(),
            value,
            unit: Some("C".to_string()),
            location: *location,
            time,
            range: Some((-40.0, 40.0)),
        });
        Ok(vec![ReadoutRow::new(self.name(), format!("{:.1} C", value))])
    }
}

/// Rotating wind field reported as speed and direction
pub struct WindLayer;

impl OverlayLayer for WindLayer {
    fn name(&self) -> &str {
        "Wind"
    }

    fn readout_at(
        &self,
        location: &WorldLocation,
        time: f64,
        frame: usize,
        samples: &mut Vec<ReadoutSample>,
    ) -> Result<Vec<ReadoutRow>, ReadoutError> {
        let lat = location.latitude.to_radians();
        let u = 15.0 * (3.0 * lat).sin() + frame as f64 * 0.25;
        let v = 5.0 * (location.longitude.to_radians() + time / 43_200.0).cos();
        let speed = u.hypot(v);
        let direction = (270.0 - v.atan2(u).to_degrees()).rem_euclid(360.0);

        samples.push(ReadoutSample {
            layer: self.name().to_string(),
            value: speed,
            unit: Some("m/s".to_string()),
            location: *location,
            time,
            range: None,
        });
        Ok(vec![
            ReadoutRow::new("Wind speed", format!("{:.1} m/s", speed)),
            ReadoutRow::new("Wind from", format!("{:.0} deg", direction)),
        ])
    }
}

/// Terrain height; has no data near the poles
pub struct TerrainLayer;

impl OverlayLayer for TerrainLayer {
    fn name(&self) -> &str {
        "Terrain"
    }

    fn readout_at(
        &self,
        location: &WorldLocation,
        _time: f64,
        _frame: usize,
        _samples: &mut Vec<ReadoutSample>,
    ) -> Result<Vec<ReadoutRow>, ReadoutError> {
        if location.latitude.abs() > 85.0 {
            return Err(ReadoutError::layer(self.name(), "no terrain data poleward of 85 degrees"));
        }
        let height = terrain_height(location.latitude, location.longitude);
        if height < 0.0 {
            // Ocean: nothing to report
            return Ok(Vec::new());
        }
        Ok(vec![ReadoutRow::new(self.name(), format!("{:.0} m", height))])
    }
}
