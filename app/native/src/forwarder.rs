//! Relays overlay lifecycle events to the application window's listeners.
//!
//! While the surface lives in the overlay, the application window is hidden
//! and receives no lifecycle events of its own. Code watching that window
//! (close handlers, activation tracking) would go blind, so the overlay's
//! events are re-dispatched to the application window's listeners instead.
//!
//! [`OverlayRelay`] is the listener the controller registers on the overlay
//! when it creates it. It is the only path overlay events take.

use std::cell::RefCell;
use std::rc::Weak;

use smallvec::SmallVec;

use crate::controller::Mode;
use crate::events::{EventSource, Forwarding, ListenerRef, WindowEvent, WindowEventKind, WindowListener};
use crate::host::{Container, ContainerRef};
use crate::platform::{MenuBar, MenuBarRef};

/// Listener snapshots rarely exceed this many entries.
const INLINE_LISTENERS: usize = 4;

/// One-way relay from the overlay to the application window's listeners.
pub struct EventForwarder {
    primary: Option<ContainerRef>,
}

impl EventForwarder {
    /// Creates a forwarder targeting `primary`'s listeners.
    #[must_use]
    pub const fn new(primary: Option<ContainerRef>) -> Self { Self { primary } }

    /// Relays an overlay event and returns how many listeners received it.
    ///
    /// Nothing is relayed in windowed mode, for minimize/restore
    /// notifications, or when there is no application window.
    pub fn forward(&self, event: &WindowEvent, mode: Mode) -> usize {
        if mode != Mode::Fullscreen {
            tracing::trace!(kind = %event.kind, "dropping overlay event in windowed mode");
            return 0;
        }
        if event.kind.forwarding() == Forwarding::Swallow {
            tracing::trace!(kind = %event.kind, "swallowing overlay event");
            return 0;
        }
        let Some(primary) = &self.primary else {
            return 0;
        };

        // Snapshot first: a listener may touch the window's listener list.
        let listeners: SmallVec<[ListenerRef; INLINE_LISTENERS]> =
            primary.borrow().listeners().into_iter().collect();

        for listener in &listeners {
            listener.on_window_event(event);
        }

        tracing::debug!(kind = %event.kind, listeners = listeners.len(), "forwarded overlay event");
        listeners.len()
    }

    /// Whether `kind` would be relayed in fullscreen mode.
    #[must_use]
    pub const fn forwards(kind: WindowEventKind) -> bool {
        matches!(kind.forwarding(), Forwarding::Forward)
    }
}

/// Listener registered on the overlay.
///
/// The mode is read from the overlay itself, so the relay needs no link back
/// to the controller. The overlay owns the relay; the relay only holds it
/// weakly.
pub struct OverlayRelay {
    forwarder: EventForwarder,
    overlay: Weak<RefCell<dyn Container>>,
    menu_bar: Option<MenuBarRef>,
}

impl OverlayRelay {
    /// Creates a relay for `overlay`.
    ///
    /// `menu_bar` is only given on platforms with a floating menu bar; it is
    /// hidden again whenever the overlay comes back from minimized state.
    #[must_use]
    pub const fn new(
        forwarder: EventForwarder,
        overlay: Weak<RefCell<dyn Container>>,
        menu_bar: Option<MenuBarRef>,
    ) -> Self {
        Self { forwarder, overlay, menu_bar }
    }

    /// Handles one overlay notification and returns how many listeners it
    /// was relayed to.
    pub fn relay(&self, kind: WindowEventKind) -> usize {
        let Some(mode) = self.overlay_mode() else {
            tracing::trace!(%kind, "overlay busy or gone, dropping event");
            return 0;
        };
        let forwarded = self.forwarder.forward(&WindowEvent::new(kind, EventSource::Overlay), mode);

        if kind == WindowEventKind::Deiconified && mode == Mode::Fullscreen {
            if let Some(menu_bar) = &self.menu_bar {
                match menu_bar.try_borrow_mut() {
                    Ok(mut menu_bar) => menu_bar.set_visible(false),
                    Err(_) => tracing::warn!("menu bar busy, not hiding it after deiconify"),
                }
            }
        }

        forwarded
    }

    fn overlay_mode(&self) -> Option<Mode> {
        let overlay = self.overlay.upgrade()?;
        let visible = overlay.try_borrow().ok()?.is_visible();
        Some(if visible { Mode::Fullscreen } else { Mode::Windowed })
    }
}

impl WindowListener for OverlayRelay {
    fn on_window_event(&self, event: &WindowEvent) {
        self.relay(event.kind);
    }
}
