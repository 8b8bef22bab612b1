//! Animation clock implementation

use super::{AnimationState, AnimationSubscriber};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use tracing::trace;

/// Internal clock state
#[derive(Debug, Clone)]
struct ClockState {
    times: Vec<f64>,
    frame: usize,
    looping: bool,
}

/// Steps through the time values of an animated view
pub struct AnimationClock {
    state: Arc<RwLock<ClockState>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn AnimationSubscriber>>>>,
}

impl AnimationClock {
    /// Create a clock over the given time values
    pub fn new(times: Vec<f64>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ClockState {
                times,
                frame: 0,
                looping: false,
            })),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Wrap around at either end instead of stopping
    pub fn set_looping(&self, looping: bool) {
        self.state.write().looping = looping;
    }

    /// Replace the time values (e.g., when layers are added) and rewind
    pub fn set_times(&self, times: Vec<f64>) {
        let mut state = self.state.write();
        state.times = times;
        state.frame = 0;
        trace!(frames = state.times.len(), "animation times replaced");
        drop(state);
        self.notify_subscribers();
    }

    pub fn frame_count(&self) -> usize {
        self.state.read().times.len()
    }

    /// Snapshot of the displayed frame
    pub fn current(&self) -> AnimationState {
        let state = self.state.read();
        AnimationState {
            frame: state.frame,
            time: state.times.get(state.frame).copied().unwrap_or(0.0),
        }
    }

    /// Jump to a specific frame
    pub fn seek_to(&self, frame: usize) -> Result<(), String> {
        let mut state = self.state.write();
        if frame >= state.times.len() {
            return Err(format!(
                "Frame {} out of bounds (frames: {})",
                frame,
                state.times.len()
            ));
        }
        state.frame = frame;
        trace!(frame, "animation seek");
        drop(state);
        self.notify_subscribers();
        Ok(())
    }

    /// Step forward by one frame
    pub fn next(&self) -> Result<(), String> {
        let mut state = self.state.write();
        if state.frame + 1 < state.times.len() {
            state.frame += 1;
        } else if state.looping && !state.times.is_empty() {
            state.frame = 0;
        } else {
            return Err("Already at last frame".to_string());
        }
        trace!(frame = state.frame, "animation step forward");
        drop(state);
        self.notify_subscribers();
        Ok(())
    }

    /// Step backward by one frame
    pub fn previous(&self) -> Result<(), String> {
        let mut state = self.state.write();
        if state.frame > 0 {
            state.frame -= 1;
        } else if state.looping && !state.times.is_empty() {
            state.frame = state.times.len() - 1;
        } else {
            return Err("Already at first frame".to_string());
        }
        trace!(frame = state.frame, "animation step backward");
        drop(state);
        self.notify_subscribers();
        Ok(())
    }

    /// Add a subscriber
    pub fn add_subscriber(&self, subscriber: Arc<dyn AnimationSubscriber>) {
        self.subscribers.write().push(Arc::downgrade(&subscriber));
    }

    /// Notify all subscribers of a frame change
    fn notify_subscribers(&self) {
        let current = self.current();
        let mut subscribers = self.subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);

        for weak in subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_frame_change(&current);
            }
        }
    }
}
