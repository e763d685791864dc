//! The soft fullscreen state machine.
//!
//! [`FullScreenController`] moves a live surface between the application's
//! own window and an undecorated, screen-sized overlay window. It never
//! changes the display mode; "fullscreen" here means the overlay is visible
//! and holds the surface.
//!
//! # Deferred transitions
//!
//! Entering and leaving fullscreen reparents the surface, which must not
//! happen while the window manager is still dispatching an event for it.
//! Every transition request is therefore queued and only runs from
//! [`FullScreenController::tick`], which the host calls once per iteration
//! of its event loop.
//!
//! # Mode
//!
//! The mode is not stored. The controller is in [`Mode::Fullscreen`] exactly
//! when the overlay is visible.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::config::{ConfigError, Rgba, SoftScreenConfig};
use crate::constants::timing::DEFAULT_DEFER_TICKS;
use crate::deferred::DeferredActionQueue;
use crate::diagnostics::DiagnosticSink;
use crate::display::{DeviceSelector, Display};
use crate::error::{SoftScreenError, SoftScreenResult};
use crate::events::{ListenerRef, WindowEventKind};
use crate::forwarder::{EventForwarder, OverlayRelay};
use crate::geometry::Point;
use crate::host::{ContainerRef, GraphicsBackend, OverlaySpec, SurfaceRef, WindowState, WindowSystem};
use crate::notifier::SurfaceNotifier;
use crate::platform::{MenuBar, MenuBarRef, Platform};

/// Presentation mode of the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// The surface lives in the application window.
    #[default]
    Windowed,
    /// The surface lives in the overlay.
    Fullscreen,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Windowed => f.write_str("windowed"),
            Self::Fullscreen => f.write_str("fullscreen"),
        }
    }
}

/// Construction options for [`FullScreenController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Requested display index.
    pub display: usize,
    /// Delay for deferred transitions and always-on-top.
    pub defer_ticks: u32,
    /// Request always-on-top right after construction.
    pub always_on_top: bool,
    /// Overlay background.
    pub background: Rgba,
    /// Platform whose quirks apply.
    pub platform: Platform,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            display: 0,
            defer_ticks: DEFAULT_DEFER_TICKS,
            always_on_top: false,
            background: Rgba::BLACK,
            platform: Platform::current(),
        }
    }
}

impl ControllerOptions {
    /// Maps a loaded configuration onto controller options.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the background color is malformed.
    pub fn from_config(config: &SoftScreenConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            display: config.display,
            defer_ticks: config.defer_ticks,
            always_on_top: config.always_on_top,
            background: config.background_rgba()?,
            platform: Platform::current(),
        })
    }

    /// Overrides the platform.
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }
}

/// Moves a surface between its application window and a fullscreen overlay.
pub struct FullScreenController {
    surface: SurfaceRef,
    primary: Option<ContainerRef>,
    overlay: ContainerRef,
    display: Display,
    queue: DeferredActionQueue<Self>,
    relay: Rc<OverlayRelay>,
    notifier: SurfaceNotifier,
    graphics: Box<dyn GraphicsBackend>,
    menu_bar: MenuBarRef,
    diagnostics: Box<dyn DiagnosticSink>,
    platform: Platform,
    defer_ticks: u32,
    always_on_top: bool,
}

impl FullScreenController {
    /// Creates a controller and its (hidden) overlay window.
    ///
    /// An out-of-range display index is reported and replaced by display 0.
    /// An [`OverlayRelay`] is registered on the overlay, so lifecycle events
    /// the window system delivers to it reach the application window's
    /// listeners while in fullscreen.
    ///
    /// # Errors
    ///
    /// Returns [`SoftScreenError::NoDisplays`] if the window system reports
    /// no displays at all.
    pub fn new<W: WindowSystem>(
        surface: SurfaceRef,
        windows: &W,
        graphics: Box<dyn GraphicsBackend>,
        menu_bar: Box<dyn MenuBar>,
        diagnostics: Box<dyn DiagnosticSink>,
        options: ControllerOptions,
    ) -> SoftScreenResult<Self> {
        let target = DeviceSelector::new(windows, &*diagnostics).resolve(options.display)?;

        let menu_bar: MenuBarRef = Rc::new(RefCell::new(menu_bar));
        let (surface_size, primary) = {
            let surface = surface.borrow();
            (surface.size(), surface.primary_window())
        };
        let (title, icon) = primary.as_ref().map_or_else(Default::default, |primary| {
            let primary = primary.borrow();
            (primary.title(), primary.icon())
        });

        let overlay = windows.create_overlay(&OverlaySpec {
            size: target.resolution.max(surface_size),
            display: target.clone(),
            title,
            icon,
            undecorated: true,
            background: options.background,
        });

        let relay = Rc::new(OverlayRelay::new(
            EventForwarder::new(primary.clone()),
            Rc::downgrade(&overlay),
            options.platform.has_floating_menu_bar().then(|| menu_bar.clone()),
        ));
        let listener: ListenerRef = relay.clone();
        overlay.borrow_mut().add_listener(listener);

        tracing::debug!(
            display = target.index,
            name = %target.name,
            surface = %surface_size,
            available = primary.is_some(),
            platform = ?options.platform,
            "created fullscreen controller"
        );

        let mut controller = Self {
            notifier: SurfaceNotifier::new(surface.clone()),
            relay,
            surface,
            primary,
            overlay,
            display: target,
            queue: DeferredActionQueue::new(),
            graphics,
            menu_bar,
            diagnostics,
            platform: options.platform,
            defer_ticks: options.defer_ticks,
            always_on_top: false,
        };

        if options.always_on_top {
            controller.set_always_on_top(true);
        }

        Ok(controller)
    }

    /// Runs one event-loop iteration worth of deferred work.
    ///
    /// Returns the number of actions that ran.
    pub fn tick(&mut self) -> usize {
        let due = self.queue.advance();
        let count = due.len();
        for action in due {
            action.run(self);
        }
        count
    }

    /// Requests fullscreen. Runs on a later tick.
    pub fn enter_full_screen(&mut self) { self.set_full_screen(true); }

    /// Requests windowed mode. Runs on a later tick.
    pub fn exit_full_screen(&mut self) { self.set_full_screen(false); }

    /// Requests the given mode. Runs on a later tick.
    ///
    /// Requesting the mode the controller is already in does nothing.
    pub fn set_full_screen(&mut self, full_screen: bool) {
        let label = if full_screen { "enter full screen" } else { "exit full screen" };
        self.queue.schedule(label, self.defer_ticks, move |controller: &mut Self| {
            controller.apply_full_screen(full_screen);
        });
    }

    /// Requests the opposite of whatever mode is current when the request runs.
    pub fn toggle(&mut self) {
        self.queue.schedule("toggle full screen", self.defer_ticks, |controller: &mut Self| {
            let full_screen = !controller.is_full_screen();
            controller.apply_full_screen(full_screen);
        });
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.overlay.borrow().is_visible() { Mode::Fullscreen } else { Mode::Windowed }
    }

    /// Whether the surface currently lives in the overlay.
    #[must_use]
    pub fn is_full_screen(&self) -> bool { self.mode() == Mode::Fullscreen }

    /// Whether fullscreen is possible at all.
    ///
    /// Only a surface with an application window of its own can go
    /// fullscreen; an embedded surface has nothing to come back to.
    #[must_use]
    pub const fn available(&self) -> bool { self.primary.is_some() }

    /// Minimizes whichever window holds the surface.
    ///
    /// In fullscreen the menu bar is shown again, since the overlay no longer
    /// covers the screen.
    ///
    /// # Errors
    ///
    /// Returns [`SoftScreenError::UnavailableContext`] in windowed mode when
    /// there is no application window.
    pub fn minimize(&mut self) -> SoftScreenResult<()> {
        match self.mode() {
            Mode::Fullscreen => {
                if self.platform.has_floating_menu_bar() {
                    self.menu_bar.borrow_mut().set_visible(true);
                }
                self.overlay.borrow_mut().set_window_state(WindowState::Minimized);
            }
            Mode::Windowed => {
                let Some(primary) = &self.primary else {
                    return Err(self.fail("minimize", SoftScreenError::UnavailableContext));
                };
                primary.borrow_mut().set_window_state(WindowState::Minimized);
            }
        }
        tracing::debug!(mode = %self.mode(), "minimized");
        Ok(())
    }

    /// Restores whichever window holds the surface.
    ///
    /// In fullscreen the menu bar is hidden again.
    ///
    /// # Errors
    ///
    /// Returns [`SoftScreenError::UnavailableContext`] in windowed mode when
    /// there is no application window.
    pub fn restore(&mut self) -> SoftScreenResult<()> {
        match self.mode() {
            Mode::Fullscreen => {
                self.overlay.borrow_mut().set_window_state(WindowState::Normal);
                if self.platform.has_floating_menu_bar() {
                    self.menu_bar.borrow_mut().set_visible(false);
                }
            }
            Mode::Windowed => {
                let Some(primary) = &self.primary else {
                    return Err(self.fail("restore", SoftScreenError::UnavailableContext));
                };
                primary.borrow_mut().set_window_state(WindowState::Normal);
            }
        }
        tracing::debug!(mode = %self.mode(), "restored");
        Ok(())
    }

    /// Whether the overlay currently floats above other windows.
    #[must_use]
    pub fn is_always_on_top(&self) -> bool { self.overlay.borrow().is_always_on_top() }

    /// Makes the overlay float above other windows (or not).
    ///
    /// Enabling is deferred; the window manager ignores it when it arrives
    /// right after other window-state changes. Disabling applies immediately.
    /// The flag is kept while windowed and re-applied on every entry.
    pub fn set_always_on_top(&mut self, on_top: bool) {
        if on_top {
            self.queue.schedule("always on top", self.defer_ticks, |controller: &mut Self| {
                controller.apply_always_on_top(true);
            });
        } else {
            self.apply_always_on_top(false);
        }
    }

    /// Always fails: soft fullscreen never changes the display mode.
    ///
    /// # Errors
    ///
    /// Always returns [`SoftScreenError::UnsupportedOperation`].
    pub fn set_resolution(&self, width: i32, height: i32) -> SoftScreenResult<()> {
        Err(self.fail(
            "set resolution",
            SoftScreenError::unsupported(format!(
                "changing the resolution to {width}x{height} is not possible in soft fullscreen \
                 mode; use a resolution-changing fullscreen mode instead"
            )),
        ))
    }

    /// Runs an overlay notification through the same relay the overlay's
    /// listener uses, for hosts that route window events by hand.
    ///
    /// Returns the number of listeners the event was relayed to.
    pub fn handle_overlay_event(&self, kind: WindowEventKind) -> usize { self.relay.relay(kind) }

    /// The display the overlay lives on.
    #[must_use]
    pub const fn display(&self) -> &Display { &self.display }

    /// The overlay window.
    #[must_use]
    pub const fn overlay(&self) -> &ContainerRef { &self.overlay }

    /// The platform whose quirks apply.
    #[must_use]
    pub const fn platform(&self) -> Platform { self.platform }

    /// Number of deferred actions waiting to run.
    #[must_use]
    pub fn pending_actions(&self) -> usize { self.queue.pending() }

    /// Number of mode-change notifications delivered to the surface.
    #[must_use]
    pub fn notifications(&self) -> u64 { self.notifier.delivered() }

    fn fail(&self, context: &str, error: SoftScreenError) -> SoftScreenError {
        self.diagnostics.report(context, &error);
        error
    }

    fn apply_always_on_top(&mut self, on_top: bool) {
        self.always_on_top = on_top;
        self.overlay.borrow_mut().set_always_on_top(on_top);
        tracing::debug!(on_top, "applied always-on-top");
    }

    fn apply_full_screen(&mut self, full_screen: bool) {
        if full_screen == self.is_full_screen() {
            tracing::trace!(full_screen, "already in requested mode");
            return;
        }
        if full_screen {
            self.enter_now();
        } else {
            self.exit_now();
        }
    }

    fn enter_now(&mut self) {
        let Some(primary) = self.primary.clone() else {
            tracing::debug!("no application window, staying windowed");
            self.fail("enter full screen", SoftScreenError::UnavailableContext);
            return;
        };

        let (was_visible, primary_location, primary_size, title, icon) = {
            let primary = primary.borrow();
            (primary.is_visible(), primary.location(), primary.size(), primary.title(), primary.icon())
        };

        {
            let mut primary = primary.borrow_mut();
            primary.set_visible(false);
            primary.detach_surface(&self.surface);
        }
        {
            let mut overlay = self.overlay.borrow_mut();
            overlay.set_title(&title);
            overlay.set_icon(icon);
            overlay.attach_surface(self.surface.clone());
        }

        if self.platform.has_floating_menu_bar() {
            self.menu_bar.borrow_mut().set_visible(false);
        }

        let overlay_size = {
            let mut overlay = self.overlay.borrow_mut();
            overlay.set_visible(true);
            overlay.set_location(self.display.origin());
            overlay.set_window_state(WindowState::Maximized);
            if overlay.is_always_on_top() != self.always_on_top {
                overlay.set_always_on_top(self.always_on_top);
            }
            overlay.size()
        };

        let surface_size = self.surface.borrow().size();
        let location = if was_visible {
            Point::new(
                primary_location.x + primary_size.width - surface_size.width,
                primary_location.y + primary_size.height - surface_size.height,
            )
        } else {
            let correction = if surface_size == self.display.bounds.size() {
                self.platform.full_display_y_correction()
            } else {
                0
            };
            Point::new(
                (overlay_size.width - surface_size.width) / 2,
                (overlay_size.height - surface_size.height) / 2 - correction,
            )
        };
        self.surface.borrow_mut().set_location(location);

        self.graphics.reallocate();
        self.graphics.refresh_textures();
        self.surface.borrow_mut().request_focus();
        self.notifier.notify(Mode::Fullscreen);

        tracing::debug!(
            display = self.display.index,
            x = location.x,
            y = location.y,
            continuity = was_visible,
            "entered full screen"
        );
    }

    fn exit_now(&mut self) {
        let Some(primary) = self.primary.clone() else {
            tracing::debug!("no application window, staying in full screen");
            self.fail("exit full screen", SoftScreenError::UnavailableContext);
            return;
        };

        {
            let mut overlay = self.overlay.borrow_mut();
            overlay.set_visible(false);
            overlay.detach_surface(&self.surface);
        }

        let insets = {
            let mut primary = primary.borrow_mut();
            primary.attach_surface(self.surface.clone());
            primary.insets()
        };
        let location = insets.content_origin();
        self.surface.borrow_mut().set_location(location);

        if self.platform.has_floating_menu_bar() {
            self.menu_bar.borrow_mut().set_visible(true);
        }

        primary.borrow_mut().set_visible(true);

        self.graphics.reallocate();
        self.graphics.refresh_textures();
        self.surface.borrow_mut().request_focus();
        self.notifier.notify(Mode::Windowed);

        tracing::debug!(x = location.x, y = location.y, "exited full screen");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::diagnostics::DiagnosticLog;
    use crate::geometry::{Insets, Rect, Size};
    use crate::host::{Container, Surface};
    use crate::headless::{
        HeadlessSurface, HeadlessWindow, HeadlessWindowSystem, RecordingGraphics, RecordingMenuBar,
    };

    struct Fixture {
        controller: FullScreenController,
        surface: Rc<RefCell<HeadlessSurface>>,
        primary: Rc<RefCell<HeadlessWindow>>,
        windows: HeadlessWindowSystem,
        menu_bar: RecordingMenuBar,
        log: DiagnosticLog,
    }

    fn fixture(platform: Platform) -> Fixture {
        let primary = Rc::new(RefCell::new(HeadlessWindow::new("sketch", Insets::new(28, 0, 0, 0))));
        let primary_ref: ContainerRef = primary.clone();
        let surface = Rc::new(RefCell::new(HeadlessSurface::new(Size::new(800, 600), Some(primary_ref))));
        let surface_ref: SurfaceRef = surface.clone();
        primary.borrow_mut().attach_surface(surface_ref.clone());

        let windows = HeadlessWindowSystem::new(vec![Display::new(0, "D0", Rect::new(0, 0, 1920, 1080))]);
        let menu_bar = RecordingMenuBar::new();
        let log = DiagnosticLog::new();
        let controller = FullScreenController::new(
            surface_ref,
            &windows,
            Box::new(RecordingGraphics::new()),
            Box::new(menu_bar.clone()),
            Box::new(log.clone()),
            ControllerOptions::default().with_platform(platform),
        )
        .unwrap();

        Fixture { controller, surface, primary, windows, menu_bar, log }
    }

    fn settle(controller: &mut FullScreenController) {
        while controller.pending_actions() > 0 {
            controller.tick();
        }
    }

    #[test]
    fn test_starts_windowed_with_hidden_overlay() {
        let f = fixture(Platform::Linux);
        assert_eq!(f.controller.mode(), Mode::Windowed);
        assert!(f.controller.available());
        let overlay = f.windows.overlay().unwrap();
        assert!(!overlay.borrow().is_visible());
        assert!(overlay.borrow().is_undecorated());
        assert_eq!(overlay.borrow().title(), "sketch");
    }

    #[test]
    fn test_enter_is_deferred_by_two_ticks() {
        let mut f = fixture(Platform::Linux);
        f.controller.enter_full_screen();
        assert_eq!(f.controller.pending_actions(), 1);

        assert_eq!(f.controller.tick(), 0);
        assert_eq!(f.controller.mode(), Mode::Windowed);

        assert_eq!(f.controller.tick(), 1);
        assert_eq!(f.controller.mode(), Mode::Fullscreen);
    }

    #[test]
    fn test_enter_moves_surface_to_overlay() {
        let mut f = fixture(Platform::Linux);
        f.controller.enter_full_screen();
        settle(&mut f.controller);

        let surface_ref: SurfaceRef = f.surface.clone();
        let overlay = f.windows.overlay().unwrap();
        assert!(overlay.borrow().contains(&surface_ref));
        assert!(!f.primary.borrow().contains(&surface_ref));
        assert!(!f.primary.borrow().is_visible());
        assert_eq!(overlay.borrow().window_state(), WindowState::Maximized);
        assert_eq!(f.surface.borrow().location(), Point::new(560, 240));
        assert_eq!(f.surface.borrow().mode_changes(), &[Mode::Fullscreen]);
    }

    #[test]
    fn test_toggle_twice_returns_to_windowed() {
        let mut f = fixture(Platform::Linux);
        f.controller.toggle();
        f.controller.toggle();
        settle(&mut f.controller);

        assert_eq!(f.controller.mode(), Mode::Windowed);
        assert_eq!(f.controller.notifications(), 2);
    }

    #[test]
    fn test_menu_bar_follows_mode_on_macos() {
        let mut f = fixture(Platform::MacOs);
        f.controller.enter_full_screen();
        settle(&mut f.controller);
        f.controller.exit_full_screen();
        settle(&mut f.controller);

        assert_eq!(f.menu_bar.history(), vec![false, true]);
    }

    #[test]
    fn test_menu_bar_untouched_elsewhere() {
        let mut f = fixture(Platform::Windows);
        f.controller.enter_full_screen();
        settle(&mut f.controller);
        f.controller.minimize().unwrap();
        f.controller.restore().unwrap();

        assert!(f.menu_bar.history().is_empty());
    }

    #[test]
    fn test_set_resolution_is_rejected() {
        let f = fixture(Platform::Linux);
        let result = f.controller.set_resolution(1024, 768);
        assert!(matches!(result, Err(SoftScreenError::UnsupportedOperation(_))));
        assert_eq!(f.log.len(), 1);
    }

    #[test]
    fn test_always_on_top_from_options_is_deferred() {
        let primary: ContainerRef = Rc::new(RefCell::new(HeadlessWindow::new("w", Insets::default())));
        let surface: SurfaceRef =
            Rc::new(RefCell::new(HeadlessSurface::new(Size::new(10, 10), Some(primary.clone()))));
        let windows = HeadlessWindowSystem::new(vec![Display::new(0, "D0", Rect::new(0, 0, 100, 100))]);
        let options = ControllerOptions { always_on_top: true, ..ControllerOptions::default() };

        let mut controller = FullScreenController::new(
            surface,
            &windows,
            Box::new(RecordingGraphics::new()),
            Box::new(RecordingMenuBar::new()),
            Box::new(DiagnosticLog::new()),
            options,
        )
        .unwrap();

        assert!(!controller.is_always_on_top());
        settle(&mut controller);
        assert!(controller.is_always_on_top());
    }

    #[test]
    fn test_options_from_config() {
        let config = SoftScreenConfig {
            display: 1,
            defer_ticks: 3,
            background: "#fff".to_string(),
            ..SoftScreenConfig::default()
        };
        let options = ControllerOptions::from_config(&config).unwrap();
        assert_eq!(options.display, 1);
        assert_eq!(options.defer_ticks, 3);
        assert_eq!(options.background, Rgba::opaque(255, 255, 255));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Fullscreen.to_string(), "fullscreen");
        assert_eq!(Mode::default(), Mode::Windowed);
    }
}
