//! Animation subscriber trait

use super::AnimationState;

/// Trait for components that need to respond to frame changes
pub trait AnimationSubscriber: Send + Sync {
    /// Called when the displayed frame changes
    fn on_frame_change(&self, state: &AnimationState);
}
