//! Container style with footer margin
//!
//! With footer margin adjustment enabled, the scrollable reserves the sheet
//! footer's height as bottom margin so the last rows are not hidden behind it.

use std::sync::Arc;

use sheetkit_core::SharedValue;
use taffy::prelude::*;

use crate::surface::ScrollSurface;

/// Merge the footer margin into the caller's style
pub fn container_style(base: &Style, footer_height: f32, adjust_for_footer: bool) -> Style {
    if !adjust_for_footer {
        return base.clone();
    }

    let mut style = base.clone();
    style.margin.bottom = LengthPercentageAuto::Length(footer_height);
    style
}

/// Keeps the container margin in sync with the footer height
pub struct ContainerStyleBinding {
    base: Style,
    footer_height: SharedValue<f32>,
    last_margin: Option<f32>,
    surface: Arc<dyn ScrollSurface>,
}

impl ContainerStyleBinding {
    pub fn new(
        base: Style,
        footer_height: SharedValue<f32>,
        surface: Arc<dyn ScrollSurface>,
    ) -> Self {
        Self {
            base,
            footer_height,
            last_margin: None,
            surface,
        }
    }

    /// Treat a margin as already applied
    pub fn with_applied(mut self, margin: f32) -> Self {
        self.last_margin = Some(margin);
        self
    }

    /// Recompute for this frame, returning whether the surface was updated
    pub fn tick(&mut self) -> bool {
        let margin = self.footer_height.get();
        if self.last_margin == Some(margin) {
            return false;
        }

        self.surface
            .apply_container_style(&container_style(&self.base, margin, true));
        self.last_margin = Some(margin);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_without_adjustment() {
        let base = Style {
            flex_grow: 1.0,
            ..Default::default()
        };
        assert_eq!(container_style(&base, 40.0, false), base);
    }

    #[test]
    fn test_footer_margin_applied() {
        let base = Style::default();
        let style = container_style(&base, 40.0, true);
        assert_eq!(style.margin.bottom, LengthPercentageAuto::Length(40.0));
        assert_eq!(style.margin.top, base.margin.top);
    }
}
