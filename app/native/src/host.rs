//! Interfaces the host toolkit implements.
//!
//! The controller never talks to a windowing system directly. Everything it
//! needs from the host (the surface, the application window, the display
//! list, overlay creation, and the rendering backend) comes in through these
//! traits. Host objects are shared single-threaded handles: the host owns
//! them and they outlive the controller.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Rgba;
use crate::controller::Mode;
use crate::display::{Display, DisplayProvider};
use crate::events::ListenerRef;
use crate::geometry::{Insets, Point, Size};

/// Shared handle to the hosted surface.
pub type SurfaceRef = Rc<RefCell<dyn Surface>>;

/// Shared handle to a host window.
pub type ContainerRef = Rc<RefCell<dyn Container>>;

/// Minimized/normal/maximized state of a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowState {
    /// Regular window.
    #[default]
    Normal,
    /// Minimized to the dock/taskbar.
    Minimized,
    /// Maximized in both directions.
    Maximized,
}

/// Window icon pixels (RGBA, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    /// Icon width in pixels.
    pub width: u32,
    /// Icon height in pixels.
    pub height: u32,
    /// RGBA bytes, `width * height * 4` long.
    pub rgba: Rc<[u8]>,
}

/// The drawable unit that moves between windows.
pub trait Surface {
    /// Native size of the surface. Does not change during a transition.
    fn size(&self) -> Size;

    /// Position of the surface inside its current window.
    fn location(&self) -> Point;

    /// Moves the surface inside its current window.
    fn set_location(&mut self, location: Point);

    /// The application window this surface belongs to.
    ///
    /// `None` when the surface is embedded somewhere without a window of its
    /// own, in which case fullscreen is unavailable.
    fn primary_window(&self) -> Option<ContainerRef>;

    /// Asks for keyboard focus.
    fn request_focus(&mut self);

    /// Called after every completed transition.
    fn on_mode_changed(&mut self, mode: Mode);
}

/// A host window that can hold the surface.
pub trait Container {
    /// Whether the window is shown.
    fn is_visible(&self) -> bool;
    /// Shows or hides the window without destroying it.
    fn set_visible(&mut self, visible: bool);

    /// Makes `surface` a child of this window.
    fn attach_surface(&mut self, surface: SurfaceRef);
    /// Removes `surface` from this window if it is a child.
    fn detach_surface(&mut self, surface: &SurfaceRef);

    /// Screen position of the window's outer frame.
    fn location(&self) -> Point;
    /// Moves the window.
    fn set_location(&mut self, location: Point);
    /// Outer size of the window, decorations included.
    fn size(&self) -> Size;
    /// Space taken by decorations.
    fn insets(&self) -> Insets;

    /// Window title.
    fn title(&self) -> String;
    /// Sets the window title.
    fn set_title(&mut self, title: &str);
    /// Window icon, if any.
    fn icon(&self) -> Option<Icon>;
    /// Sets the window icon.
    fn set_icon(&mut self, icon: Option<Icon>);

    /// Current minimized/normal/maximized state.
    fn window_state(&self) -> WindowState;
    /// Changes the minimized/normal/maximized state.
    fn set_window_state(&mut self, state: WindowState);

    /// Whether the window floats above all others.
    fn is_always_on_top(&self) -> bool;
    /// Makes the window float above all others (or not).
    fn set_always_on_top(&mut self, on_top: bool);

    /// Registers a lifecycle listener. It receives every notification the
    /// window system delivers to this window.
    fn add_listener(&mut self, listener: ListenerRef);
    /// Lifecycle listeners registered on this window, in registration order.
    fn listeners(&self) -> Vec<ListenerRef>;
}

/// Everything the host needs to create the overlay window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySpec {
    /// Display the overlay is created on.
    pub display: Display,
    /// Initial size: the larger of the display resolution and the surface.
    pub size: Size,
    /// Title, copied from the application window.
    pub title: String,
    /// Icon, copied from the application window.
    pub icon: Option<Icon>,
    /// Always `true`: the overlay has no decorations.
    pub undecorated: bool,
    /// Fill color around the surface.
    pub background: Rgba,
}

/// The host's window system.
pub trait WindowSystem: DisplayProvider {
    /// Creates the overlay window, hidden, with no layout manager.
    ///
    /// Children of the overlay are positioned explicitly by the controller.
    fn create_overlay(&self, spec: &OverlaySpec) -> ContainerRef;
}

/// Rendering backend hooks run after the surface changes windows.
pub trait GraphicsBackend {
    /// Rebuilds resources bound to the old window's native surface handle.
    fn reallocate(&mut self);

    /// Re-uploads textures that did not survive the reallocation.
    fn refresh_textures(&mut self) {}
}

/// Backend for hosts whose renderer survives reparenting on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopGraphics;

impl GraphicsBackend for NoopGraphics {
    fn reallocate(&mut self) {}
}
