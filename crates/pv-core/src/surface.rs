//! Contracts for the views and layers the readout overlay probes

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::AnimationState;
use crate::error::ReadoutError;
use crate::location::WorldLocation;

/// A point in screen coordinates
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Where a view sits on screen
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewBounds {
    /// Screen-space origin (top left) of the view
    pub origin: ScreenPoint,
    pub width: f32,
    pub height: f32,
}

/// One line of a layer's readout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadoutRow {
    pub label: String,
    pub value: String,
}

impl ReadoutRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A numeric value sampled by a layer while building its readout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadoutSample {
    /// Name of the layer that produced the value
    pub layer: String,
    pub value: f64,
    pub unit: Option<String>,
    pub location: WorldLocation,
    /// Animation time the value was sampled at
    pub time: f64,
    /// Display range of the layer, if it has one
    pub range: Option<(f64, f64)>,
}

/// An active visualization layer that can describe its value at a location
pub trait OverlayLayer: Send + Sync {
    /// Display name of the layer
    fn name(&self) -> &str;

    /// Readout lines for the given location and animation step.
    ///
    /// Layers push any numeric values they read into `samples`.
    fn readout_at(
        &self,
        location: &WorldLocation,
        time: f64,
        frame: usize,
        samples: &mut Vec<ReadoutSample>,
    ) -> Result<Vec<ReadoutRow>, ReadoutError>;
}

/// A 2D/3D view that can be probed with the pointer
pub trait ViewSurface: Send + Sync {
    /// Display name of the view
    fn name(&self) -> &str;

    /// Convert screen coordinates (relative to the view) to a world location
    fn screen_to_world(&self, x: f32, y: f32) -> Result<WorldLocation, ReadoutError>;

    /// Active overlay layers, in the order they were added
    fn active_layers(&self) -> Vec<Arc<dyn OverlayLayer>>;

    /// The currently displayed animation step
    fn animation(&self) -> AnimationState;

    /// Where the view currently sits on screen
    fn screen_bounds(&self) -> ViewBounds;

    /// Record where the view was laid out this frame
    fn set_screen_bounds(&self, _bounds: ViewBounds) {}
}
