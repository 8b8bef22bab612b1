//! User interface components for the probe viewer
//!
//! This crate provides the cursor readout overlay, the UI-thread task
//! queue it publishes through, and the egui-based component holders that
//! views and display controls are arranged in.

pub mod config;
pub mod dispatch;
pub mod holders;
pub mod panel;
pub mod placement;
pub mod readout;
pub mod theme;

/// Re-export commonly used types
pub use config::{ConfigError, OverlayConfig};
pub use dispatch::{ui_channel, UiDispatcher, UiQueue, UiTask};
pub use holders::{ComponentGroup, ComponentHolder, DisplayHolder, GroupError, GroupLayout, ViewHolder};
pub use panel::ReadoutPanel;
pub use placement::{place_panel, Size, SCREEN_MARGIN};
pub use readout::{compute_readout, OverlayState, PanelWindow, Readout, ReadoutOverlay, ReadoutTable};
pub use theme::{apply_theme, Theme};
