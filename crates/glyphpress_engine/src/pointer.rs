//! Raw pointer tracking.
//!
//! Host pointer/touch listeners are registered at VIEWPORT scope, not at the
//! text container, so proximity keeps responding while the cursor is outside
//! the block. Listeners do exactly one thing: overwrite the shared cell with
//! the newest coordinate. No layout queries, no rendering, no computation.
//!
//! Single-writer discipline: listeners (via [`PointerHandle`]) are the only
//! writers of the raw position; the animation loop is its only reader. The
//! cell is lock-protected so handles may be invoked from a host thread that
//! is not the loop thread.

use std::sync::Arc;

use glyphpress_core::Vec2;
use parking_lot::Mutex;

/// Shared raw pointer cell owned by one engine instance.
///
/// Created once per engine and kept until teardown. Before the first event
/// arrives the cell holds the seeded default (the text container's center).
#[derive(Debug)]
pub struct PointerTracker {
    /// Latest raw viewport coordinate.
    position: Arc<Mutex<Vec2>>,
}

impl PointerTracker {
    /// Creates a tracker with the position at the origin.
    ///
    /// Call [`Self::seed`] once container geometry is known.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Arc::new(Mutex::new(Vec2::ZERO)),
        }
    }

    /// Seeds the pre-first-event position (the container center).
    pub fn seed(&self, position: Vec2) {
        *self.position.lock() = position;
    }

    /// Returns the latest raw position.
    #[must_use]
    pub fn get(&self) -> Vec2 {
        *self.position.lock()
    }

    /// Creates a handle for host listeners.
    #[must_use]
    pub fn handle(&self) -> PointerHandle {
        PointerHandle {
            position: Arc::clone(&self.position),
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheap cloneable write handle for host pointer/touch listeners.
///
/// Writes stay harmless after the engine is disposed: the cell outlives the
/// engine for as long as any handle does, so no callback can ever read or
/// write freed state.
#[derive(Debug, Clone)]
pub struct PointerHandle {
    /// Shared cell, co-owned with the tracker.
    position: Arc<Mutex<Vec2>>,
}

impl PointerHandle {
    /// Records a pointer-move event.
    pub fn pointer_moved(&self, x: f32, y: f32) {
        *self.position.lock() = Vec2::new(x, y);
    }

    /// Records a touch-move event from the active touch points.
    ///
    /// The first touch point wins. An update with no active touch points is
    /// ignored: no state change.
    pub fn touch_moved(&self, touches: &[Vec2]) {
        if let Some(first) = touches.first() {
            *self.position.lock() = *first;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_write_wins() {
        let tracker = PointerTracker::new();
        let handle = tracker.handle();

        handle.pointer_moved(10.0, 20.0);
        handle.pointer_moved(30.0, 40.0);

        assert_eq!(tracker.get(), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_empty_touch_is_ignored() {
        let tracker = PointerTracker::new();
        let handle = tracker.handle();

        handle.pointer_moved(5.0, 5.0);
        handle.touch_moved(&[]);
        assert_eq!(tracker.get(), Vec2::new(5.0, 5.0));

        handle.touch_moved(&[Vec2::new(7.0, 8.0), Vec2::new(9.0, 9.0)]);
        assert_eq!(tracker.get(), Vec2::new(7.0, 8.0));
    }

    #[test]
    fn test_seed_sets_default_before_events() {
        let tracker = PointerTracker::new();
        tracker.seed(Vec2::new(100.0, 50.0));
        assert_eq!(tracker.get(), Vec2::new(100.0, 50.0));
    }
}
