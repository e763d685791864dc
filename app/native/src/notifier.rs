//! Tells the hosted surface that a transition finished.

use std::cell::Cell;

use crate::controller::Mode;
use crate::host::SurfaceRef;

/// Calls the surface's mode-change hook after each completed transition.
///
/// The hook runs synchronously once every window change for the transition
/// has been applied. Panics inside the hook are not caught.
pub struct SurfaceNotifier {
    surface: SurfaceRef,
    delivered: Cell<u64>,
}

impl SurfaceNotifier {
    /// Creates a notifier for `surface`.
    #[must_use]
    pub const fn new(surface: SurfaceRef) -> Self {
        Self {
            surface,
            delivered: Cell::new(0),
        }
    }

    /// Invokes the hook with the mode the surface is now in.
    pub fn notify(&self, mode: Mode) {
        self.surface.borrow_mut().on_mode_changed(mode);
        self.delivered.set(self.delivered.get() + 1);
        tracing::trace!(?mode, delivered = self.delivered.get(), "notified surface");
    }

    /// Number of notifications delivered so far.
    #[must_use]
    pub fn delivered(&self) -> u64 { self.delivered.get() }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::geometry::Size;
    use crate::headless::HeadlessSurface;

    #[test]
    fn test_notify_reaches_surface_hook() {
        let surface = Rc::new(RefCell::new(HeadlessSurface::new(Size::new(800, 600), None)));
        let handle: SurfaceRef = surface.clone();
        let notifier = SurfaceNotifier::new(handle);

        notifier.notify(Mode::Fullscreen);
        notifier.notify(Mode::Windowed);

        assert_eq!(surface.borrow().mode_changes(), &[Mode::Fullscreen, Mode::Windowed]);
        assert_eq!(notifier.delivered(), 2);
    }

    #[test]
    fn test_fresh_notifier_has_delivered_nothing() {
        let surface: SurfaceRef = Rc::new(RefCell::new(HeadlessSurface::new(Size::new(1, 1), None)));
        assert_eq!(SurfaceNotifier::new(surface).delivered(), 0);
    }
}
