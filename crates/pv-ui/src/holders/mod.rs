//! Component holders: the pieces a view window is assembled from
//!
//! Every kind of component (a view, a display control, a group of other
//! components) implements [`ComponentHolder`]; the kind is fixed when the
//! holder is constructed.

use egui::Ui;
use thiserror::Error;
use uuid::Uuid;

mod display;
mod group;
mod view;

pub use display::DisplayHolder;
pub use group::{ComponentGroup, GroupLayout};
pub use view::ViewHolder;

/// Category names shown in menus and group headers
pub mod categories {
    pub const VIEWS: &str = "Views";
    pub const DISPLAYS: &str = "Displays";
    pub const GROUPS: &str = "Groups";
}

/// Errors rearranging components
#[derive(Error, Debug, PartialEq)]
pub enum GroupError {
    #[error("component {0} is already in this group or one of its subgroups")]
    Duplicate(Uuid),
}

/// A component that can be placed in a [`ComponentGroup`]
pub trait ComponentHolder {
    fn id(&self) -> Uuid;

    fn name(&self) -> &str;

    fn category(&self) -> &str;

    /// Short type label, e.g. "View"
    fn type_name(&self) -> &str;

    /// Tear the component down once it has been taken out of its group
    fn do_remove(&mut self);

    /// Draw the component
    fn make_contents(&mut self, ui: &mut Ui);

    /// Whether this component is, or contains at any depth, `id`. Groups
    /// use this to refuse a component already in their tree.
    fn contains(&self, id: Uuid) -> bool {
        self.id() == id
    }
}
