//! Content size reconciliation
//!
//! With dynamic sizing the sheet sizes itself from its content. Each content
//! size notification is turned into the sheet's content extent:
//!
//! ```text
//! extent = (custom_content_height ?? measured height)
//!        + (footer height, if footer margin adjustment is enabled)
//! ```
//!
//! Width never enters the extent; it is only passed through to the caller.

use sheetkit_core::{SharedValue, SharedWriter};

/// Content size callback, called with `(width, height)`
pub type ContentSizeHandler = Box<dyn Fn(f32, f32) + Send + Sync>;

/// Compute the content extent
pub fn content_extent(
    measured_height: f32,
    custom_content_height: Option<f32>,
    footer_height: f32,
    adjust_for_footer: bool,
) -> f32 {
    let footer = if adjust_for_footer { footer_height } else { 0.0 };
    custom_content_height.unwrap_or(measured_height) + footer
}

/// Writes the sheet's content extent from content size notifications
///
/// The extent writer is a lease shared by every scrollable in the sheet.
/// While resumed, the reconciler takes the lease on the next notification
/// after its holder lets go; suspending hands it back.
pub struct ContentSizeReconciler {
    content_height: SharedValue<f32>,
    /// `None` while suspended or while another scrollable holds the lease
    extent: Option<SharedWriter<f32>>,
    leasing: bool,
    dynamic_sizing: SharedValue<bool>,
    footer_height: SharedValue<f32>,
    custom_content_height: Option<f32>,
    adjust_for_footer: bool,
    /// Last `(height, footer)` reconciled
    last_input: Option<(f32, f32)>,
    writes: u64,
    on_content_size_change: Option<ContentSizeHandler>,
}

impl ContentSizeReconciler {
    /// Create a suspended reconciler for the sheet's extent cell
    pub fn new(
        content_height: SharedValue<f32>,
        dynamic_sizing: SharedValue<bool>,
        footer_height: SharedValue<f32>,
    ) -> Self {
        Self {
            content_height,
            extent: None,
            leasing: false,
            dynamic_sizing,
            footer_height,
            custom_content_height: None,
            adjust_for_footer: false,
            last_input: None,
            writes: 0,
            on_content_size_change: None,
        }
    }

    pub fn custom_content_height(mut self, height: Option<f32>) -> Self {
        self.custom_content_height = height;
        self
    }

    pub fn adjust_for_footer(mut self, enabled: bool) -> Self {
        self.adjust_for_footer = enabled;
        self
    }

    pub fn on_content_size_change(mut self, handler: Option<ContentSizeHandler>) -> Self {
        self.on_content_size_change = handler;
        self
    }

    /// Whether this reconciler holds the extent lease
    pub fn owns_extent(&self) -> bool {
        self.extent.is_some()
    }

    /// Allow leasing the extent, returning whether the lease is now held
    pub fn resume_extent(&mut self) -> bool {
        self.leasing = true;
        self.acquire_extent()
    }

    /// Release the extent lease and stop taking it until resumed
    pub fn suspend_extent(&mut self) {
        self.leasing = false;
        self.last_input = None;
        if self.extent.take().is_some() {
            tracing::debug!("content extent lease released");
        }
    }

    fn acquire_extent(&mut self) -> bool {
        if self.extent.is_none() && self.leasing {
            self.extent = self.content_height.try_writer();
            if self.extent.is_some() {
                self.last_input = None;
                tracing::debug!("content extent lease acquired");
            }
        }
        self.extent.is_some()
    }

    /// Number of writes that changed the extent
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Handle a content size notification
    ///
    /// Returns the extent now held by the sheet when this scrollable sized it.
    pub fn handle(&mut self, width: f32, height: f32) -> Option<f32> {
        let extent = self.reconcile(height);

        if let Some(handler) = &self.on_content_size_change {
            handler(width, height);
        }
        extent
    }

    fn reconcile(&mut self, height: f32) -> Option<f32> {
        if !self.dynamic_sizing.get() || !self.acquire_extent() {
            return None;
        }
        let writer = self.extent.as_ref()?;

        let footer = if self.adjust_for_footer {
            self.footer_height.get()
        } else {
            0.0
        };
        let input = (height, footer);
        if self.last_input == Some(input) {
            return Some(writer.get());
        }
        self.last_input = Some(input);

        let extent = content_extent(
            height,
            self.custom_content_height,
            footer,
            self.adjust_for_footer,
        );
        if writer.set(extent) {
            self.writes += 1;
            tracing::trace!("content extent -> {}", extent);
        }
        Some(writer.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn reconciler(dynamic: bool, footer: f32) -> (ContentSizeReconciler, SharedValue<f32>) {
        let extent = SharedValue::new(0.0f32);
        let mut reconciler = ContentSizeReconciler::new(
            extent.clone(),
            SharedWriter::new(dynamic).reader(),
            SharedWriter::new(footer).reader(),
        );
        reconciler.resume_extent();
        (reconciler, extent)
    }

    #[test]
    fn test_extent_math() {
        assert_eq!(content_extent(400.0, None, 40.0, true), 440.0);
        assert_eq!(content_extent(400.0, None, 40.0, false), 400.0);
        assert_eq!(content_extent(400.0, Some(250.0), 40.0, true), 290.0);
        assert_eq!(content_extent(-20.0, None, 0.0, false), -20.0);
    }

    #[test]
    fn test_footer_ignored_without_adjustment() {
        for footer in [0.0, 12.0, 40.0, 1000.0] {
            let (mut reconciler, extent) = reconciler(true, footer);
            reconciler.handle(100.0, 400.0);
            assert_eq!(extent.get(), 400.0);
        }
    }

    #[test]
    fn test_repeated_size_writes_once() {
        let (reconciler, extent) = reconciler(true, 40.0);
        let mut reconciler = reconciler.adjust_for_footer(true);

        assert_eq!(reconciler.handle(100.0, 400.0), Some(440.0));
        assert_eq!(reconciler.handle(100.0, 400.0), Some(440.0));
        assert_eq!(reconciler.write_count(), 1);
        assert_eq!(extent.get(), 440.0);
    }

    #[test]
    fn test_width_change_does_not_rewrite() {
        let (mut reconciler, _extent) = reconciler(true, 0.0);
        reconciler.handle(100.0, 400.0);
        reconciler.handle(320.0, 400.0);
        assert_eq!(reconciler.write_count(), 1);
    }

    #[test]
    fn test_disabled_sizing_still_forwards() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let (reconciler, extent) = reconciler(false, 40.0);
        let mut reconciler =
            reconciler.on_content_size_change(Some(Box::new(move |w: f32, h: f32| {
                seen_clone.lock().unwrap().push((w, h));
            })));

        assert_eq!(reconciler.handle(100.0, 400.0), None);
        assert_eq!(extent.get(), 0.0);
        assert_eq!(reconciler.write_count(), 0);
        assert_eq!(*seen.lock().unwrap(), vec![(100.0, 400.0)]);
    }

    #[test]
    fn test_non_finite_height_keeps_previous_extent() {
        let (mut reconciler, extent) = reconciler(true, 0.0);
        reconciler.handle(100.0, 300.0);
        reconciler.handle(100.0, f32::NAN);
        assert_eq!(extent.get(), 300.0);
        assert_eq!(reconciler.write_count(), 1);
    }

    #[test]
    fn test_non_positive_height_is_stored_as_is() {
        let (mut reconciler, extent) = reconciler(true, 0.0);

        assert_eq!(reconciler.handle(100.0, -20.0), Some(-20.0));
        assert_eq!(extent.get(), -20.0);

        assert_eq!(reconciler.handle(100.0, 0.0), Some(0.0));
        assert_eq!(extent.get(), 0.0);
        assert_eq!(reconciler.write_count(), 2);
    }

    #[test]
    fn test_lease_taken_once_holder_lets_go() {
        let extent = SharedValue::new(0.0f32);
        let holder = extent.try_writer().unwrap();
        let mut reconciler = ContentSizeReconciler::new(
            extent.clone(),
            SharedWriter::new(true).reader(),
            SharedWriter::new(0.0f32).reader(),
        );

        assert!(!reconciler.resume_extent());
        assert_eq!(reconciler.handle(100.0, 400.0), None);
        assert_eq!(extent.get(), 0.0);

        drop(holder);
        assert_eq!(reconciler.handle(100.0, 400.0), Some(400.0));
        assert!(reconciler.owns_extent());
        assert_eq!(extent.get(), 400.0);
    }

    #[test]
    fn test_suspended_reconciler_releases_lease() {
        let (mut reconciler, extent) = reconciler(true, 0.0);
        reconciler.handle(100.0, 400.0);

        reconciler.suspend_extent();
        assert!(!reconciler.owns_extent());
        assert!(!extent.has_writer());

        // Suspended reconcilers only forward
        assert_eq!(reconciler.handle(100.0, 500.0), None);
        assert_eq!(extent.get(), 400.0);

        assert!(reconciler.resume_extent());
        assert_eq!(reconciler.handle(100.0, 500.0), Some(500.0));
    }
}
