//! Display enumeration and selection.
//!
//! The controller places its overlay on exactly one physical display, chosen
//! by index when the controller is built. An index the host does not know
//! about falls back to the first display instead of failing.

use serde::Serialize;

use crate::diagnostics::DiagnosticSink;
use crate::error::{SoftScreenError, SoftScreenResult};
use crate::geometry::{Point, Rect, Size};

/// A physical screen as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Display {
    /// Position in the host's enumeration.
    pub index: usize,
    /// Human readable name (e.g. "Built-in Retina Display").
    pub name: String,
    /// Default bounds of the display in global screen coordinates.
    pub bounds: Rect,
    /// Current resolution of the display mode.
    pub resolution: Size,
}

impl Display {
    /// Creates a display whose resolution matches its bounds.
    #[must_use]
    pub fn new(index: usize, name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            index,
            name: name.into(),
            bounds,
            resolution: bounds.size(),
        }
    }

    /// Top-left corner of the display in global coordinates.
    #[must_use]
    pub const fn origin(&self) -> Point { self.bounds.origin() }
}

/// Source of the ordered list of connected displays.
pub trait DisplayProvider {
    /// Returns the connected displays in the host's order.
    fn displays(&self) -> Vec<Display>;
}

/// Resolves a requested display index against the host's enumeration.
pub struct DeviceSelector<'a> {
    provider: &'a dyn DisplayProvider,
    diagnostics: &'a dyn DiagnosticSink,
}

impl<'a> DeviceSelector<'a> {
    /// Creates a selector over the given provider.
    #[must_use]
    pub fn new(provider: &'a dyn DisplayProvider, diagnostics: &'a dyn DiagnosticSink) -> Self {
        Self { provider, diagnostics }
    }

    /// Returns display `requested`, or display 0 if `requested` is out of range.
    ///
    /// The fallback is reported as [`SoftScreenError::InvalidDisplayIndex`]
    /// exactly once per call.
    ///
    /// # Errors
    ///
    /// Returns [`SoftScreenError::NoDisplays`] if the host reports no displays.
    pub fn resolve(&self, requested: usize) -> SoftScreenResult<Display> {
        let mut displays = self.provider.displays();
        if displays.is_empty() {
            return Err(SoftScreenError::NoDisplays);
        }

        let index = if requested < displays.len() {
            requested
        } else {
            self.diagnostics.report(
                "resolve display",
                &SoftScreenError::InvalidDisplayIndex {
                    requested,
                    available: displays.len(),
                },
            );
            0
        };

        let selected = displays.swap_remove(index);
        tracing::debug!(
            requested,
            resolved = index,
            name = %selected.name,
            resolution = %selected.resolution,
            "resolved display"
        );
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticLog;

    struct FixedDisplays(Vec<Display>);

    impl DisplayProvider for FixedDisplays {
        fn displays(&self) -> Vec<Display> { self.0.clone() }
    }

    fn two_displays() -> FixedDisplays {
        FixedDisplays(vec![
            Display::new(0, "D0", Rect::new(0, 0, 1920, 1080)),
            Display::new(1, "D1", Rect::new(1920, 0, 2560, 1440)),
        ])
    }

    #[test]
    fn test_valid_indices_resolve_to_themselves() {
        let provider = two_displays();
        let log = DiagnosticLog::new();
        let selector = DeviceSelector::new(&provider, &log);

        for i in 0..2 {
            let display = selector.resolve(i).unwrap();
            assert_eq!(display.index, i);
        }
        assert!(log.is_empty());
    }

    #[test]
    fn test_out_of_range_falls_back_to_first() {
        let provider = two_displays();
        let log = DiagnosticLog::new();
        let selector = DeviceSelector::new(&provider, &log);

        let display = selector.resolve(5).unwrap();
        assert_eq!(display.name, "D0");
        assert_eq!(log.len(), 1);
        assert_eq!(
            log.entries()[0].error,
            SoftScreenError::InvalidDisplayIndex { requested: 5, available: 2 }
        );
    }

    #[test]
    fn test_index_equal_to_len_is_out_of_range() {
        let provider = two_displays();
        let log = DiagnosticLog::new();
        let display = DeviceSelector::new(&provider, &log).resolve(2).unwrap();
        assert_eq!(display.index, 0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_no_displays_is_an_error() {
        let provider = FixedDisplays(Vec::new());
        let log = DiagnosticLog::new();
        let result = DeviceSelector::new(&provider, &log).resolve(0);
        assert_eq!(result, Err(SoftScreenError::NoDisplays));
        assert!(log.is_empty());
    }

    #[test]
    fn test_display_resolution_defaults_to_bounds() {
        let display = Display::new(1, "D1", Rect::new(1920, 0, 2560, 1440));
        assert_eq!(display.resolution, Size::new(2560, 1440));
        assert_eq!(display.origin(), Point::new(1920, 0));
    }
}
