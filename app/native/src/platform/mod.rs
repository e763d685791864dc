//! Platform quirks that change the transition algorithm.
//!
//! Only one thing matters here: whether the platform draws a global menu bar
//! that floats above every window (macOS). On that platform the menu bar has
//! to be hidden while the overlay covers the screen, and the overlay needs a
//! one pixel vertical correction when the surface fills the whole display.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::constants::platform::MACOS_FULL_DISPLAY_Y_CORRECTION;

/// The platform the controller is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// macOS: global menu bar above all windows.
    #[value(name = "macos")]
    MacOs,
    /// Windows.
    Windows,
    /// Linux and the BSDs.
    Linux,
    /// Anything else.
    Other,
}

impl Platform {
    /// Detects the platform the binary was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(any(
            target_os = "linux",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd"
        )) {
            Self::Linux
        } else {
            Self::Other
        }
    }

    /// Whether the native menu bar floats above all windows.
    #[must_use]
    pub const fn has_floating_menu_bar(self) -> bool { matches!(self, Self::MacOs) }

    /// Vertical correction applied to a surface that exactly fills its display.
    ///
    /// macOS reserves a one pixel title strip at the top of a maximized
    /// undecorated window; without this the surface ends up one pixel low.
    #[must_use]
    pub const fn full_display_y_correction(self) -> i32 {
        if self.has_floating_menu_bar() { MACOS_FULL_DISPLAY_Y_CORRECTION } else { 0 }
    }
}

impl Default for Platform {
    fn default() -> Self { Self::current() }
}

/// Process-wide menu bar visibility.
pub trait MenuBar {
    /// Shows or hides the menu bar.
    fn set_visible(&mut self, visible: bool);
}

/// Menu bar shared between the controller and the overlay's event relay.
pub type MenuBarRef = Rc<RefCell<dyn MenuBar>>;

impl<M: MenuBar + ?Sized> MenuBar for Box<M> {
    fn set_visible(&mut self, visible: bool) { (**self).set_visible(visible); }
}

/// Menu bar for platforms without a floating one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMenuBar;

impl MenuBar for NoMenuBar {
    fn set_visible(&mut self, _visible: bool) {}
}
