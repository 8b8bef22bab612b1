use std::sync::Arc;

use egui::{RichText, Ui};
use pv_core::OverlayLayer;
use tracing::debug;
use uuid::Uuid;

use super::{categories, ComponentHolder};

/// Holds a display control (an overlay layer) in a group
pub struct DisplayHolder {
    id: Uuid,
    layer: Arc<dyn OverlayLayer>,
    removed: bool,
    on_remove: Option<Box<dyn FnMut(&str)>>,
}

impl DisplayHolder {
    pub fn new(layer: Arc<dyn OverlayLayer>) -> Self {
        Self {
            id: Uuid::new_v4(),
            layer,
            removed: false,
            on_remove: None,
        }
    }

    /// Run `f` with the layer name when the display is removed, e.g. to
    /// detach the layer from its view
    pub fn on_remove(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_remove = Some(Box::new(f));
        self
    }

    pub fn layer(&self) -> &Arc<dyn OverlayLayer> {
        &self.layer
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

impl ComponentHolder for DisplayHolder {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        self.layer.name()
    }

    fn category(&self) -> &str {
        categories::DISPLAYS
    }

    fn type_name(&self) -> &str {
        "Display"
    }

    fn do_remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        debug!(display = self.layer.name(), "removing display");
        if let Some(f) = self.on_remove.as_mut() {
            f(self.layer.name());
        }
    }

    fn make_contents(&mut self, ui: &mut Ui) {
        ui.vertical(|ui| {
            ui.label(RichText::new(self.layer.name()).strong());
            ui.label(RichText::new(categories::DISPLAYS).small().weak());
            if self.removed {
                ui.label(RichText::new("removed").italics());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readout::testing::FixedLayer;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_remove_runs_callback_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut holder = DisplayHolder::new(FixedLayer::new("Radar", &[])).on_remove(move |name| {
            assert_eq!(name, "Radar");
            counter.set(counter.get() + 1);
        });
        assert!(!holder.is_removed());

        holder.do_remove();
        holder.do_remove();
        assert!(holder.is_removed());
        assert_eq!(calls.get(), 1);
        assert_eq!(holder.layer().name(), "Radar");
    }
}
