//! Hands work to the UI thread
//!
//! Any thread can queue a task through a [`UiDispatcher`]; the UI thread
//! runs everything that is pending once per frame by draining the matching
//! [`UiQueue`]. Queuing never blocks.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::trace;

/// A unit of work that must run on the UI thread
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// Cloneable, thread-safe handle for queuing UI tasks
#[derive(Clone)]
pub struct UiDispatcher {
    sender: UnboundedSender<UiTask>,
    repaint: Option<egui::Context>,
}

/// The UI-thread end of the task queue
pub struct UiQueue {
    receiver: UnboundedReceiver<UiTask>,
}

/// Create a connected dispatcher and queue
pub fn ui_channel() -> (UiDispatcher, UiQueue) {
    let (sender, receiver) = unbounded_channel();
    (
        UiDispatcher {
            sender,
            repaint: None,
        },
        UiQueue { receiver },
    )
}

impl UiDispatcher {
    /// Ask `ctx` for a repaint whenever a task is queued, so the task runs
    /// on the next frame even when the user is idle
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    /// Queue a task without waiting for it to run
    pub fn dispatch(&self, task: impl FnOnce() + Send + 'static) {
        if self.sender.send(Box::new(task)).is_err() {
            trace!("UI queue closed, dropping task");
            return;
        }
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }
}

impl UiQueue {
    /// Run all pending tasks in the order they were queued.
    ///
    /// Returns the number of tasks run.
    pub fn drain(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.receiver.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    /// Whether any task is waiting
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
