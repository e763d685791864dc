//! Tuning constants for the transition state machine.
//!
//! # Organization
//!
//! - `timing` - Event-loop delays for deferred work
//! - `platform` - Per-platform geometry corrections

/// Event-loop timing.
pub mod timing {
    /// Ticks a deferred transition or always-on-top request waits before running.
    ///
    /// Two iterations of the event loop are enough for the window manager to
    /// finish dispatching whatever event triggered the request.
    pub const DEFAULT_DEFER_TICKS: u32 = 2;
}

/// Platform geometry corrections.
pub mod platform {
    /// Pixels subtracted from the centered y position on macOS when the
    /// surface exactly fills its display.
    pub const MACOS_FULL_DISPLAY_Y_CORRECTION: i32 = 1;
}
