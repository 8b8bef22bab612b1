use serde::{Deserialize, Serialize};

mod clock;
mod subscriber;

pub use clock::AnimationClock;
pub use subscriber::AnimationSubscriber;

/// The currently displayed time step of an animated view
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AnimationState {
    /// Index of the displayed frame
    pub frame: usize,
    /// Time value of the displayed frame (seconds since the epoch)
    pub time: f64,
}
