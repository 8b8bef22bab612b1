use egui::{Id, Ui, WidgetText};
use egui_dock::{DockArea, DockState, TabViewer};
use pv_core::events::events::ComponentRemoved;
use pv_core::EventBus;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{categories, ComponentHolder, GroupError};

/// How a group arranges its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupLayout {
    /// One tab per child
    Tabs,
    /// Rows of `columns` children
    Grid { columns: usize },
    /// Children side by side
    HSplit,
    /// Children stacked top to bottom
    VSplit,
}

impl Default for GroupLayout {
    fn default() -> Self {
        GroupLayout::Tabs
    }
}

/// An ordered collection of components laid out together
pub struct ComponentGroup {
    id: Uuid,
    name: String,
    layout: GroupLayout,
    children: Vec<Box<dyn ComponentHolder>>,
    dock_state: DockState<Uuid>,
    dock_dirty: bool,
    events: Option<EventBus>,
}

impl ComponentGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            layout: GroupLayout::default(),
            children: Vec::new(),
            dock_state: DockState::new(Vec::new()),
            dock_dirty: false,
            events: None,
        }
    }

    pub fn with_layout(mut self, layout: GroupLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Publish removals on `bus`
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn layout(&self) -> GroupLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: GroupLayout) {
        self.layout = layout;
        self.dock_dirty = true;
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Names of the direct children, in order
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name()).collect()
    }

    /// Append a component
    pub fn add(&mut self, holder: Box<dyn ComponentHolder>) -> Result<(), GroupError> {
        let index = self.children.len();
        self.insert(index, holder)
    }

    /// Insert a component at `index` (clamped to the end)
    pub fn insert(&mut self, index: usize, holder: Box<dyn ComponentHolder>) -> Result<(), GroupError> {
        if self.contains(holder.id()) {
            return Err(GroupError::Duplicate(holder.id()));
        }
        let index = index.min(self.children.len());
        self.children.insert(index, holder);
        self.dock_dirty = true;
        Ok(())
    }

    /// Position of a direct child
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.children.iter().position(|c| c.id() == id)
    }

    /// Take a direct child out of the group without tearing it down
    pub fn remove(&mut self, id: Uuid) -> Option<Box<dyn ComponentHolder>> {
        let index = self.index_of(id)?;
        self.dock_dirty = true;
        Some(self.children.remove(index))
    }

    /// Take a direct child out of the group and tear it down
    pub fn close(&mut self, id: Uuid) -> bool {
        match self.remove(id) {
            Some(mut holder) => {
                self.tear_down(holder.as_mut());
                true
            }
            None => false,
        }
    }

    fn tear_down(&self, holder: &mut dyn ComponentHolder) {
        debug!(group = %self.name, component = holder.name(), "removing component");
        holder.do_remove();
        if let Some(bus) = &self.events {
            bus.publish(ComponentRemoved {
                name: holder.name().to_string(),
                category: holder.category().to_string(),
            });
        }
    }

    fn sync_dock(&mut self) {
        if !self.dock_dirty {
            return;
        }
        self.dock_state = DockState::new(self.children.iter().map(|c| c.id()).collect());
        self.dock_dirty = false;
    }

    fn show_tabs(&mut self, ui: &mut Ui) {
        self.sync_dock();

        let mut closed = Vec::new();
        DockArea::new(&mut self.dock_state)
            .id(Id::new(("component_group", self.id)))
            .show_close_buttons(true)
            .draggable_tabs(true)
            .show_inside(
                ui,
                &mut GroupTabViewer {
                    children: &mut self.children,
                    closed: &mut closed,
                },
            );

        for id in closed {
            // The dock already dropped the tab
            if let Some(index) = self.index_of(id) {
                let mut holder = self.children.remove(index);
                self.tear_down(holder.as_mut());
            }
        }
    }

    fn show_grid(&mut self, ui: &mut Ui, columns: usize) {
        let columns = columns.max(1);
        let rows = self.children.len().div_ceil(columns);
        let row_height = ui.available_height() / rows as f32;
        let width = ui.available_width();

        for row in self.children.chunks_mut(columns) {
            ui.allocate_ui(egui::vec2(width, row_height), |ui| {
                ui.columns(columns, |cols| {
                    for (col, child) in cols.iter_mut().zip(row.iter_mut()) {
                        child.make_contents(col);
                    }
                });
            });
        }
    }

    fn show_vsplit(&mut self, ui: &mut Ui) {
        let height = ui.available_height() / self.children.len() as f32;
        let width = ui.available_width();
        for child in self.children.iter_mut() {
            ui.allocate_ui(egui::vec2(width, height), |ui| child.make_contents(ui));
        }
    }
}

impl ComponentHolder for ComponentGroup {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        categories::GROUPS
    }

    fn type_name(&self) -> &str {
        "Group"
    }

    fn do_remove(&mut self) {
        let children = std::mem::take(&mut self.children);
        for mut child in children {
            self.tear_down(child.as_mut());
        }
        self.dock_dirty = true;
    }

    fn make_contents(&mut self, ui: &mut Ui) {
        if self.children.is_empty() {
            ui.centered_and_justified(|ui| ui.label("Empty group"));
            return;
        }

        match self.layout {
            GroupLayout::Tabs => self.show_tabs(ui),
            GroupLayout::Grid { columns } => self.show_grid(ui, columns),
            GroupLayout::HSplit => {
                let n = self.children.len();
                ui.columns(n, |cols| {
                    for (col, child) in cols.iter_mut().zip(self.children.iter_mut()) {
                        child.make_contents(col);
                    }
                });
            }
            GroupLayout::VSplit => self.show_vsplit(ui),
        }
    }

    fn contains(&self, id: Uuid) -> bool {
        self.id == id || self.children.iter().any(|c| c.contains(id))
    }
}

/// Tab viewer for egui_dock
struct GroupTabViewer<'a> {
    children: &'a mut Vec<Box<dyn ComponentHolder>>,
    closed: &'a mut Vec<Uuid>,
}

impl<'a> TabViewer for GroupTabViewer<'a> {
    type Tab = Uuid;

    fn title(&mut self, tab: &mut Self::Tab) -> WidgetText {
        match self.children.iter().find(|c| c.id() == *tab) {
            Some(child) => child.name().into(),
            None => "Unknown".into(),
        }
    }

    fn ui(&mut self, ui: &mut Ui, tab: &mut Self::Tab) {
        if let Some(child) = self.children.iter_mut().find(|c| c.id() == *tab) {
            child.make_contents(ui);
        }
    }

    fn on_close(&mut self, tab: &mut Self::Tab) -> bool {
        self.closed.push(*tab);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holders::DisplayHolder;
    use crate::readout::testing::FixedLayer;
    use parking_lot::Mutex;
    use pv_core::events::handler_from_fn;
    use std::rc::Rc;
    use std::sync::Arc;

    fn display(name: &str) -> Box<DisplayHolder> {
        Box::new(DisplayHolder::new(FixedLayer::new(name, &[])))
    }

    #[test]
    fn test_add_insert_order() {
        let mut group = ComponentGroup::new("Main");
        group.add(display("A")).unwrap();
        group.add(display("C")).unwrap();
        group.insert(1, display("B")).unwrap();
        group.insert(99, display("D")).unwrap();

        assert_eq!(group.child_names(), vec!["A", "B", "C", "D"]);
        assert_eq!(group.len(), 4);
    }

    /// Holder with a caller-chosen id
    struct Fixed(Uuid);

    impl ComponentHolder for Fixed {
        fn id(&self) -> Uuid {
            self.0
        }
        fn name(&self) -> &str {
            "Fixed"
        }
        fn category(&self) -> &str {
            categories::DISPLAYS
        }
        fn type_name(&self) -> &str {
            "Fixed"
        }
        fn do_remove(&mut self) {}
        fn make_contents(&mut self, _ui: &mut Ui) {}
    }

    #[test]
    fn test_duplicate_rejected_at_any_depth() {
        let id = Uuid::new_v4();
        let mut inner = ComponentGroup::new("Inner");
        inner.add(Box::new(Fixed(id))).unwrap();
        let inner_id = inner.id();

        let mut outer = ComponentGroup::new("Outer");
        outer.add(Box::new(inner)).unwrap();

        assert!(outer.contains(id));
        assert!(outer.contains(inner_id));
        assert_eq!(outer.add(Box::new(Fixed(id))), Err(GroupError::Duplicate(id)));
        assert_eq!(outer.add(Box::new(Fixed(inner_id))), Err(GroupError::Duplicate(inner_id)));
        let outer_id = outer.id();
        assert_eq!(outer.add(Box::new(Fixed(outer_id))), Err(GroupError::Duplicate(outer_id)));
        assert_eq!(outer.len(), 1);
    }

    #[test]
    fn test_remove_and_index_of() {
        let mut group = ComponentGroup::new("Main");
        let a = display("A");
        let b = display("B");
        let (a_id, b_id) = (a.id(), b.id());
        group.add(a).unwrap();
        group.add(b).unwrap();

        assert_eq!(group.index_of(b_id), Some(1));
        let taken = group.remove(a_id).unwrap();
        assert_eq!(taken.name(), "A");
        assert_eq!(group.index_of(b_id), Some(0));
        assert!(group.remove(a_id).is_none());

        // Removed components can be re-added elsewhere
        group.add(taken).unwrap();
        assert_eq!(group.child_names(), vec!["B", "A"]);
        assert_eq!(group.add(display("X")).map(|_| group.len()), Ok(3));
    }

    #[test]
    fn test_close_tears_down_and_publishes() {
        let removed = Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = removed.clone();
        let holder = Box::new(
            DisplayHolder::new(FixedLayer::new("Radar", &[])).on_remove(move |name| sink.borrow_mut().push(name.to_string())),
        );
        let id = holder.id();

        let bus = EventBus::new();
        let published = Arc::new(Mutex::new(Vec::new()));
        let seen = published.clone();
        bus.subscribe::<ComponentRemoved>(handler_from_fn(move |event| {
            if let Some(e) = event.as_any().downcast_ref::<ComponentRemoved>() {
                seen.lock().push(e.category.clone());
            }
        }));

        let mut group = ComponentGroup::new("Main").with_events(bus);
        group.add(holder).unwrap();
        assert!(group.close(id));
        assert!(!group.close(id));

        assert_eq!(*removed.borrow(), vec!["Radar".to_string()]);
        assert_eq!(*published.lock(), vec![categories::DISPLAYS.to_string()]);
        assert!(group.is_empty());
    }

    #[test]
    fn test_group_remove_tears_down_children() {
        let count = Rc::new(std::cell::Cell::new(0));
        let mut group = ComponentGroup::new("Main");
        for name in ["A", "B"] {
            let count = count.clone();
            group
                .add(Box::new(DisplayHolder::new(FixedLayer::new(name, &[])).on_remove(move |_| count.set(count.get() + 1))))
                .unwrap();
        }

        group.do_remove();
        assert_eq!(count.get(), 2);
        assert!(group.is_empty());
    }

    #[test]
    fn test_layout_json() {
        let json = serde_json::to_string(&GroupLayout::Grid { columns: 3 }).unwrap();
        let back: GroupLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GroupLayout::Grid { columns: 3 });
    }

    #[test]
    fn test_every_layout_renders() {
        for layout in [GroupLayout::Tabs, GroupLayout::Grid { columns: 2 }, GroupLayout::HSplit, GroupLayout::VSplit] {
            let mut group = ComponentGroup::new("Main").with_layout(layout);
            for name in ["A", "B", "C"] {
                group.add(display(name)).unwrap();
            }

            let ctx = egui::Context::default();
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| group.make_contents(ui));
            });
            assert_eq!(group.len(), 3);
        }
    }
}
