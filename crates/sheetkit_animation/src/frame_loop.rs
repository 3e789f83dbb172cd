//! Dedicated animation thread
//!
//! Ticks a [`SharedScheduler`] at its target frame rate on its own thread so
//! per-frame derivations never wait on the render path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError};
use std::thread::{self, JoinHandle};

use sheetkit_core::Result;

use crate::scheduler::SharedScheduler;

/// Handle to a running frame thread
///
/// Dropping the handle stops and joins the thread.
pub struct FrameLoop {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl FrameLoop {
    /// Spawn the frame thread for a scheduler
    pub fn spawn(scheduler: SharedScheduler) -> Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let thread = thread::Builder::new()
            .name("sheetkit-animation".into())
            .spawn(move || {
                tracing::debug!("frame loop started");
                while flag.load(Ordering::Acquire) {
                    let interval = {
                        let mut scheduler =
                            scheduler.lock().unwrap_or_else(PoisonError::into_inner);
                        scheduler.tick();
                        scheduler.frame_interval()
                    };
                    thread::sleep(interval);
                }
                tracing::debug!("frame loop stopped");
            })?;

        Ok(Self {
            running,
            thread: Some(thread),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stop the thread and wait for the current frame to finish
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("frame loop thread panicked");
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
