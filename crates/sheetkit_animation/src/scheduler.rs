//! Animation scheduler
//!
//! Holds every registered worklet and runs them once per frame.

use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

new_key_type! {
    pub struct WorkletId;
}

/// A per-frame closure, called with the elapsed frame time in seconds
///
/// Worklets run while the scheduler is locked and must not call back into it.
pub type Worklet = Box<dyn FnMut(f32) + Send>;

/// Scheduler shared between the frame thread and mounting components
pub type SharedScheduler = Arc<Mutex<AnimationScheduler>>;

/// The animation scheduler that ticks all worklets
pub struct AnimationScheduler {
    worklets: SlotMap<WorkletId, Worklet>,
    last_frame: Instant,
    target_fps: u32,
    frame_count: u64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            worklets: SlotMap::with_key(),
            last_frame: Instant::now(),
            target_fps: 120,
            frame_count: 0,
        }
    }

    /// Create a scheduler wrapped for sharing with the frame thread
    pub fn shared() -> SharedScheduler {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Time between frames at the target frame rate
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps as f64)
    }

    pub fn add_worklet(&mut self, worklet: Worklet) -> WorkletId {
        self.worklets.insert(worklet)
    }

    pub fn remove_worklet(&mut self, id: WorkletId) -> bool {
        self.worklets.remove(id).is_some()
    }

    pub fn contains_worklet(&self, id: WorkletId) -> bool {
        self.worklets.contains_key(id)
    }

    /// Tick all worklets using wall-clock frame time
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.tick_with(dt);
    }

    /// Tick all worklets with an explicit frame time
    pub fn tick_with(&mut self, dt: f32) {
        self.frame_count += 1;
        for (_, worklet) in self.worklets.iter_mut() {
            worklet(dt);
        }
    }

    /// Get the number of registered worklets
    pub fn worklet_count(&self) -> usize {
        self.worklets.len()
    }

    /// Number of frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_tick_runs_every_worklet() {
        let mut scheduler = AnimationScheduler::new();
        let calls = Arc::new(AtomicU32::new(0));

        for _ in 0..3 {
            let calls = Arc::clone(&calls);
            scheduler.add_worklet(Box::new(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }));
        }

        scheduler.tick_with(1.0 / 60.0);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(scheduler.frame_count(), 1);
    }

    #[test]
    fn test_removed_worklet_stops_running() {
        let mut scheduler = AnimationScheduler::new();
        let calls = Arc::new(AtomicU32::new(0));

        let calls_clone = Arc::clone(&calls);
        let id = scheduler.add_worklet(Box::new(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        }));

        scheduler.tick_with(0.016);
        assert!(scheduler.remove_worklet(id));
        assert!(!scheduler.remove_worklet(id));
        scheduler.tick_with(0.016);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.worklet_count(), 0);
    }

    #[test]
    fn test_frame_interval_follows_target_fps() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.set_target_fps(60);
        let interval = scheduler.frame_interval().as_secs_f64();
        assert!((interval - 1.0 / 60.0).abs() < 1e-9);

        scheduler.set_target_fps(0);
        assert_eq!(scheduler.target_fps(), 1);
    }
}
