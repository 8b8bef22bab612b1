//! Core functionality for the probe viewer
//!
//! This crate provides the domain types and the collaborator contracts the
//! cursor readout overlay is built on: world locations, animation state,
//! view surfaces and overlay layers.

pub mod animation;
pub mod capture;
pub mod error;
pub mod events;
pub mod location;
pub mod surface;

// Re-export commonly used types
pub use animation::{AnimationClock, AnimationState, AnimationSubscriber};
pub use capture::{CapturedImage, GeoBounds, Viewpoint};
pub use error::ReadoutError;
pub use events::EventBus;
pub use location::{LatLonFormatter, LocationFormatter, WorldLocation};
pub use surface::{OverlayLayer, ReadoutRow, ReadoutSample, ScreenPoint, ViewBounds, ViewSurface};
