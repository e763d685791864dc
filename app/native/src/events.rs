//! Window lifecycle events.
//!
//! These are the notifications a host window delivers to its listeners. The
//! overlay window receives them while it holds the surface, and the
//! [`EventForwarder`](crate::forwarder::EventForwarder) relays them to the
//! listeners of the application's own window.

use std::rc::Rc;

use serde::Serialize;

/// Kinds of window lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowEventKind {
    /// The window was shown for the first time.
    Opened,
    /// The window was disposed.
    Closed,
    /// The user asked the window to close.
    Closing,
    /// The window became the active window.
    Activated,
    /// The window stopped being the active window.
    Deactivated,
    /// The window was minimized.
    Iconified,
    /// The window was restored from minimized state.
    Deiconified,
}

impl WindowEventKind {
    /// Every kind, in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Opened,
            Self::Closed,
            Self::Closing,
            Self::Activated,
            Self::Deactivated,
            Self::Iconified,
            Self::Deiconified,
        ]
    }

    /// Returns what happens to this kind when it arrives on the overlay.
    ///
    /// Minimizing the overlay is not the same thing as minimizing the
    /// application window, so those two notifications stay on the overlay.
    #[must_use]
    pub const fn forwarding(self) -> Forwarding {
        match self {
            Self::Opened | Self::Closed | Self::Closing | Self::Activated | Self::Deactivated => {
                Forwarding::Forward
            }
            Self::Iconified | Self::Deiconified => Forwarding::Swallow,
        }
    }
}

impl std::fmt::Display for WindowEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
            Self::Closing => "closing",
            Self::Activated => "activated",
            Self::Deactivated => "deactivated",
            Self::Iconified => "iconified",
            Self::Deiconified => "deiconified",
        };
        f.write_str(name)
    }
}

/// Whether an overlay notification is relayed to the application window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forwarding {
    /// Re-dispatch to every listener of the application window.
    Forward,
    /// Drop it.
    Swallow,
}

/// Which window an event originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventSource {
    /// The application's own window.
    Primary,
    /// The controller's fullscreen overlay.
    Overlay,
}

/// A window lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowEvent {
    /// What happened.
    pub kind: WindowEventKind,
    /// Which window it happened to.
    pub source: EventSource,
}

impl WindowEvent {
    /// Creates a new event.
    #[must_use]
    pub const fn new(kind: WindowEventKind, source: EventSource) -> Self { Self { kind, source } }
}

/// Observer of window lifecycle notifications.
///
/// Listeners are shared handles because the same listener stays registered on
/// the application window while the forwarder dispatches to it.
pub trait WindowListener {
    /// Called once per notification.
    fn on_window_event(&self, event: &WindowEvent);
}

/// Shared handle to a listener.
pub type ListenerRef = Rc<dyn WindowListener>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimize_notifications_are_swallowed() {
        assert_eq!(WindowEventKind::Iconified.forwarding(), Forwarding::Swallow);
        assert_eq!(WindowEventKind::Deiconified.forwarding(), Forwarding::Swallow);
    }

    #[test]
    fn test_other_notifications_are_forwarded() {
        let forwarded: Vec<_> = WindowEventKind::all()
            .iter()
            .copied()
            .filter(|kind| kind.forwarding() == Forwarding::Forward)
            .collect();
        assert_eq!(
            forwarded,
            vec![
                WindowEventKind::Opened,
                WindowEventKind::Closed,
                WindowEventKind::Closing,
                WindowEventKind::Activated,
                WindowEventKind::Deactivated,
            ]
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(WindowEventKind::Deiconified.to_string(), "deiconified");
        assert_eq!(WindowEventKind::Closing.to_string(), "closing");
    }

    #[test]
    fn test_event_serializes_kebab_case() {
        let event = WindowEvent::new(WindowEventKind::Activated, EventSource::Overlay);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"kind":"activated","source":"overlay"}"#);
    }
}
