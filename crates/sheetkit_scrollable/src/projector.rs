//! Lock state projection
//!
//! Maps the panel's scroll lock to the props the surface needs while the
//! sheet settles. The lock can flip many times per second, so the projection
//! runs as an animation worklet and pushes to the surface only on change.

use std::sync::Arc;

use sheetkit_core::SharedValue;

use crate::constants::{DecelerationRate, ScrollLockState};
use crate::surface::ScrollSurface;

/// Surface props derived from the scroll lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimatedProps {
    pub deceleration_rate: DecelerationRate,
    pub shows_vertical_scroll_indicator: bool,
}

/// Project the lock state onto surface props
///
/// A requested indicator is hidden while locked and shown again once
/// unlocked; a caller that disabled the indicator keeps it disabled.
pub fn project(lock: ScrollLockState, requested_indicator: bool) -> AnimatedProps {
    AnimatedProps {
        deceleration_rate: match lock {
            ScrollLockState::Unlocked => DecelerationRate::Normal,
            ScrollLockState::Locked => DecelerationRate::Fast,
        },
        shows_vertical_scroll_indicator: if requested_indicator {
            lock == ScrollLockState::Unlocked
        } else {
            requested_indicator
        },
    }
}

/// Keeps a surface's animated props in sync with the lock state
pub struct AnimatedPropsBinding {
    lock_state: SharedValue<ScrollLockState>,
    requested_indicator: bool,
    last: Option<AnimatedProps>,
    surface: Arc<dyn ScrollSurface>,
}

impl AnimatedPropsBinding {
    pub fn new(
        lock_state: SharedValue<ScrollLockState>,
        requested_indicator: bool,
        surface: Arc<dyn ScrollSurface>,
    ) -> Self {
        Self {
            lock_state,
            requested_indicator,
            last: None,
            surface,
        }
    }

    /// Treat `props` as already applied, e.g. when pushed at mount
    pub fn with_applied(mut self, props: AnimatedProps) -> Self {
        self.last = Some(props);
        self
    }

    /// The props as of the current lock state
    pub fn current(&self) -> AnimatedProps {
        project(self.lock_state.get(), self.requested_indicator)
    }

    /// Recompute for this frame, returning whether the surface was updated
    pub fn tick(&mut self) -> bool {
        let props = self.current();
        if self.last == Some(props) {
            return false;
        }

        tracing::trace!(
            "scroll lock projection changed: {:?} indicator={}",
            props.deceleration_rate,
            props.shows_vertical_scroll_indicator
        );
        self.surface.apply_animated_props(props);
        self.last = Some(props);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetkit_core::SharedWriter;
    use std::sync::Mutex;

    #[test]
    fn test_projection_table() {
        assert_eq!(
            project(ScrollLockState::Unlocked, true),
            AnimatedProps {
                deceleration_rate: DecelerationRate::Normal,
                shows_vertical_scroll_indicator: true,
            }
        );
        assert_eq!(
            project(ScrollLockState::Locked, true),
            AnimatedProps {
                deceleration_rate: DecelerationRate::Fast,
                shows_vertical_scroll_indicator: false,
            }
        );
        assert!(!project(ScrollLockState::Unlocked, false).shows_vertical_scroll_indicator);
        assert!(!project(ScrollLockState::Locked, false).shows_vertical_scroll_indicator);
    }

    #[test]
    fn test_deceleration_depends_on_lock_only() {
        for lock in [ScrollLockState::Locked, ScrollLockState::Unlocked] {
            assert_eq!(
                project(lock, true).deceleration_rate,
                project(lock, false).deceleration_rate
            );
        }
    }

    #[test]
    fn test_indicator_restored_after_unlock() {
        let locked = project(ScrollLockState::Locked, true);
        let unlocked = project(ScrollLockState::Unlocked, true);
        assert!(!locked.shows_vertical_scroll_indicator);
        assert!(unlocked.shows_vertical_scroll_indicator);
    }

    #[derive(Default)]
    struct PropsLog(Mutex<Vec<AnimatedProps>>);

    impl ScrollSurface for PropsLog {
        fn scroll_to(&self, _x: f32, _y: f32, _animated: bool) {}

        fn apply_animated_props(&self, props: AnimatedProps) {
            self.0.lock().unwrap().push(props);
        }
    }

    #[test]
    fn test_binding_pushes_only_on_change() {
        let lock = SharedWriter::new(ScrollLockState::Unlocked);
        let surface = Arc::new(PropsLog::default());
        let mut binding = AnimatedPropsBinding::new(lock.reader(), true, surface.clone())
            .with_applied(project(ScrollLockState::Unlocked, true));

        assert!(!binding.tick());

        lock.set(ScrollLockState::Locked);
        assert!(binding.tick());
        assert!(!binding.tick());

        lock.set(ScrollLockState::Unlocked);
        assert!(binding.tick());

        let log = surface.0.lock().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].deceleration_rate, DecelerationRate::Fast);
        assert_eq!(log[1].deceleration_rate, DecelerationRate::Normal);
    }
}
