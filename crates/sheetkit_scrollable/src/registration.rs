//! Scrollable registration with the sheet
//!
//! A sheet can host several scrollables (e.g. one per navigation screen). Each
//! registers its offset and kind while active; the sheet consults the focus
//! probes to decide which one drives its scroll locking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use indexmap::IndexMap;
use sheetkit_core::{Result, SharedValue, SheetError};

use crate::constants::ScrollableKind;
use crate::context::SheetContext;

/// Identity of a mounted scrollable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScrollableId(u64);

impl ScrollableId {
    /// Allocate a fresh identity
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ScrollableId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScrollableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reports whether a scrollable currently has focus
pub type FocusProbe = Arc<dyn Fn() -> bool + Send + Sync>;

/// What a scrollable hands the sheet while active
#[derive(Clone)]
pub struct Registration {
    pub id: ScrollableId,
    pub offset: SharedValue<f32>,
    pub kind: ScrollableKind,
    pub supports_refresh: bool,
    pub focus_probe: Option<FocusProbe>,
}

impl Registration {
    /// Scrollables without a probe are always considered focused
    pub fn is_focused(&self) -> bool {
        self.focus_probe.as_ref().map_or(true, |probe| probe())
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("offset", &self.offset)
            .field("kind", &self.kind)
            .field("supports_refresh", &self.supports_refresh)
            .field("has_focus_probe", &self.focus_probe.is_some())
            .finish()
    }
}

/// Insertion-ordered registry of active scrollables, owned by the sheet
#[derive(Default)]
pub struct ScrollableRegistry {
    entries: Mutex<IndexMap<ScrollableId, Registration>>,
}

impl ScrollableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, IndexMap<ScrollableId, Registration>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, registration: Registration) -> Result<()> {
        let mut entries = self.entries();
        if entries.contains_key(&registration.id) {
            return Err(SheetError::AlreadyRegistered(registration.id.to_raw()));
        }
        entries.insert(registration.id, registration);
        Ok(())
    }

    /// Remove an entry, returning whether it was present
    ///
    /// Removing an absent entry is not an error: the sheet may already have
    /// dropped it.
    pub fn unregister(&self, id: ScrollableId) -> bool {
        self.entries().shift_remove(&id).is_some()
    }

    pub fn contains(&self, id: ScrollableId) -> bool {
        self.entries().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// The most recently registered scrollable that reports focus
    pub fn active(&self) -> Option<Registration> {
        self.entries()
            .values()
            .rev()
            .find(|registration| registration.is_focused())
            .cloned()
    }
}

/// Registers one scrollable with its sheet while active
pub struct RegistrationLifecycle {
    registration: Registration,
    context: Weak<SheetContext>,
    active: bool,
}

impl RegistrationLifecycle {
    pub fn new(context: &Arc<SheetContext>, registration: Registration) -> Self {
        Self {
            registration,
            context: Arc::downgrade(context),
            active: false,
        }
    }

    pub fn id(&self) -> ScrollableId {
        self.registration.id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The sheet, if it is still alive
    pub fn context(&self) -> Option<Arc<SheetContext>> {
        self.context.upgrade()
    }

    /// Register with the sheet and publish this scrollable as its root
    pub fn activate(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }

        let context = self
            .context
            .upgrade()
            .ok_or(SheetError::Detached("sheet context dropped before activation"))?;
        context.register(self.registration.clone())?;
        context.publish_root_scrollable(
            self.registration.kind,
            self.registration.supports_refresh,
            self.registration.offset.get(),
        );
        self.active = true;

        tracing::debug!(
            "scrollable {} activated as {}",
            self.registration.id,
            self.registration.kind.name()
        );
        Ok(())
    }

    /// Remove this scrollable from the sheet, returning whether it was active
    pub fn deactivate(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;

        if let Some(context) = self.context.upgrade() {
            if !context.unregister(self.registration.id) {
                tracing::trace!("scrollable {} was already removed", self.registration.id);
            }
        }
        tracing::debug!("scrollable {} deactivated", self.registration.id);
        true
    }
}

impl Drop for RegistrationLifecycle {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetkit_core::SharedWriter;
    use std::sync::atomic::AtomicBool;

    fn registration(probe: Option<FocusProbe>) -> Registration {
        Registration {
            id: ScrollableId::next(),
            offset: SharedWriter::new(0.0f32).reader(),
            kind: ScrollableKind::FlatList,
            supports_refresh: false,
            focus_probe: probe,
        }
    }

    #[test]
    fn test_register_unregister() {
        let registry = ScrollableRegistry::new();
        let entry = registration(None);
        let id = entry.id;

        registry.register(entry.clone()).unwrap();
        assert!(registry.contains(id));
        assert!(matches!(
            registry.register(entry),
            Err(SheetError::AlreadyRegistered(_))
        ));

        assert!(registry.unregister(id));
        assert!(!registry.contains(id));
        assert!(!registry.unregister(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_active_prefers_latest_focused() {
        let registry = ScrollableRegistry::new();
        let focused = Arc::new(AtomicBool::new(false));

        let first = registration(None);
        let probe_flag = Arc::clone(&focused);
        let second = registration(Some(Arc::new(move || probe_flag.load(Ordering::SeqCst))));
        let (first_id, second_id) = (first.id, second.id);

        registry.register(first).unwrap();
        registry.register(second).unwrap();

        assert_eq!(registry.active().map(|r| r.id), Some(first_id));

        focused.store(true, Ordering::SeqCst);
        assert_eq!(registry.active().map(|r| r.id), Some(second_id));
    }
}
