use ahash::AHashMap;
use parking_lot::Mutex;
use std::sync::Arc;

type SharedHandler = Arc<Mutex<Box<dyn EventHandler>>>;

/// System-wide event bus
#[derive(Clone)]
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<SharedHandler>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Probe and layout events
pub mod events {
    use super::Event;
    use crate::location::WorldLocation;

    /// A readout panel was opened over a view
    #[derive(Debug, Clone)]
    pub struct ProbeOpened {
        pub view_name: String,
    }

    /// The probe moved to a new world location
    #[derive(Debug, Clone)]
    pub struct ProbeMoved {
        pub view_name: String,
        pub location: WorldLocation,
    }

    /// The readout panel was closed
    #[derive(Debug, Clone)]
    pub struct ProbeClosed {
        pub view_name: String,
    }

    /// A component was removed from its group
    #[derive(Debug, Clone)]
    pub struct ComponentRemoved {
        pub name: String,
        pub category: String,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(ProbeOpened, ProbeMoved, ProbeClosed, ComponentRemoved);
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type.
    ///
    /// Handlers may publish or subscribe on the same bus, but must not
    /// publish the event type they handle.
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_default().push(Arc::new(Mutex::new(handler)));
    }

    /// Publish an event to the handlers subscribed when the call starts
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let targets = match self.handlers.lock().get(&type_id) {
            Some(event_handlers) => event_handlers.clone(),
            None => return,
        };

        for handler in targets {
            handler.lock().handle(&event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}
