//! In-memory host for tests and the developer CLI.
//!
//! Every host trait has a headless implementation here. Windows remember
//! their children and count mutating calls so that callers can check the
//! surface is held by exactly one window and that no-op transitions really
//! touch nothing.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::{HeadlessConfig, Rgba};
use crate::controller::Mode;
use crate::display::{Display, DisplayProvider};
use crate::events::{EventSource, ListenerRef, WindowEvent, WindowEventKind, WindowListener};
use crate::geometry::{Insets, Point, Size};
use crate::host::{
    Container, ContainerRef, GraphicsBackend, Icon, OverlaySpec, Surface, SurfaceRef, WindowState,
    WindowSystem,
};
use crate::platform::MenuBar;

/// An in-memory window.
pub struct HeadlessWindow {
    title: String,
    icon: Option<Icon>,
    visible: bool,
    location: Point,
    size: Size,
    insets: Insets,
    state: WindowState,
    always_on_top: bool,
    undecorated: bool,
    background: Rgba,
    children: Vec<SurfaceRef>,
    listeners: Vec<ListenerRef>,
    mutations: u64,
}

impl HeadlessWindow {
    /// Creates a hidden, decorated window at the origin.
    #[must_use]
    pub fn new(title: impl Into<String>, insets: Insets) -> Self {
        Self {
            title: title.into(),
            icon: None,
            visible: false,
            location: Point::ORIGIN,
            size: Size::default(),
            insets,
            state: WindowState::Normal,
            always_on_top: false,
            undecorated: false,
            background: Rgba::BLACK,
            children: Vec::new(),
            listeners: Vec::new(),
            mutations: 0,
        }
    }

    /// Creates the overlay window described by `spec`.
    #[must_use]
    pub fn from_overlay_spec(spec: &OverlaySpec) -> Self {
        Self {
            icon: spec.icon.clone(),
            location: spec.display.origin(),
            size: spec.size,
            undecorated: spec.undecorated,
            background: spec.background,
            ..Self::new(spec.title.clone(), Insets::default())
        }
    }

    /// Sets the frame without counting it as a mutation.
    #[must_use]
    pub const fn with_frame(mut self, location: Point, size: Size) -> Self {
        self.location = location;
        self.size = size;
        self
    }

    /// Sets the initial visibility without counting it as a mutation.
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the initial icon without counting it as a mutation.
    #[must_use]
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Unregisters a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, listener: &ListenerRef) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| !Rc::ptr_eq(l, listener));
        self.listeners.len() != before
    }

    /// Delivers `kind` to this window's own listeners, as the host would.
    pub fn dispatch(&self, kind: WindowEventKind, source: EventSource) {
        let event = WindowEvent::new(kind, source);
        for listener in self.listeners.clone() {
            listener.on_window_event(&event);
        }
    }

    /// Whether `surface` is a child of this window.
    #[must_use]
    pub fn contains(&self, surface: &SurfaceRef) -> bool {
        self.children.iter().any(|child| Rc::ptr_eq(child, surface))
    }

    /// Number of children.
    #[must_use]
    pub fn child_count(&self) -> usize { self.children.len() }

    /// Whether the window has no decorations.
    #[must_use]
    pub const fn is_undecorated(&self) -> bool { self.undecorated }

    /// Fill color behind the children.
    #[must_use]
    pub const fn background(&self) -> Rgba { self.background }

    /// Number of mutating calls received so far.
    #[must_use]
    pub const fn mutations(&self) -> u64 { self.mutations }

    const fn touch(&mut self) { self.mutations += 1; }
}

impl Container for HeadlessWindow {
    fn is_visible(&self) -> bool { self.visible }

    fn set_visible(&mut self, visible: bool) {
        self.touch();
        self.visible = visible;
    }

    fn attach_surface(&mut self, surface: SurfaceRef) {
        self.touch();
        if !self.contains(&surface) {
            self.children.push(surface);
        }
    }

    fn detach_surface(&mut self, surface: &SurfaceRef) {
        self.touch();
        self.children.retain(|child| !Rc::ptr_eq(child, surface));
    }

    fn location(&self) -> Point { self.location }

    fn set_location(&mut self, location: Point) {
        self.touch();
        self.location = location;
    }

    fn size(&self) -> Size { self.size }

    fn insets(&self) -> Insets { self.insets }

    fn title(&self) -> String { self.title.clone() }

    fn set_title(&mut self, title: &str) {
        self.touch();
        title.clone_into(&mut self.title);
    }

    fn icon(&self) -> Option<Icon> { self.icon.clone() }

    fn set_icon(&mut self, icon: Option<Icon>) {
        self.touch();
        self.icon = icon;
    }

    fn window_state(&self) -> WindowState { self.state }

    fn set_window_state(&mut self, state: WindowState) {
        self.touch();
        self.state = state;
    }

    fn is_always_on_top(&self) -> bool { self.always_on_top }

    fn set_always_on_top(&mut self, on_top: bool) {
        self.touch();
        self.always_on_top = on_top;
    }

    fn add_listener(&mut self, listener: ListenerRef) { self.listeners.push(listener); }

    fn listeners(&self) -> Vec<ListenerRef> { self.listeners.clone() }
}

/// An in-memory surface.
pub struct HeadlessSurface {
    size: Size,
    location: Point,
    primary: Option<Weak<RefCell<dyn Container>>>,
    focus_requests: u32,
    mode_changes: Vec<Mode>,
    mutations: u64,
}

impl HeadlessSurface {
    /// Creates a surface of `size` belonging to `primary`.
    ///
    /// The window owns the surface once attached, so the surface only keeps a
    /// weak link back to it.
    #[must_use]
    pub fn new(size: Size, primary: Option<ContainerRef>) -> Self {
        Self {
            size,
            location: Point::ORIGIN,
            primary: primary.as_ref().map(Rc::downgrade),
            focus_requests: 0,
            mode_changes: Vec::new(),
            mutations: 0,
        }
    }

    /// Modes reported through the mode-change hook, oldest first.
    #[must_use]
    pub fn mode_changes(&self) -> &[Mode] { &self.mode_changes }

    /// Number of focus requests.
    #[must_use]
    pub const fn focus_requests(&self) -> u32 { self.focus_requests }

    /// Number of mutating calls received so far.
    #[must_use]
    pub const fn mutations(&self) -> u64 { self.mutations }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> Size { self.size }

    fn location(&self) -> Point { self.location }

    fn set_location(&mut self, location: Point) {
        self.mutations += 1;
        self.location = location;
    }

    fn primary_window(&self) -> Option<ContainerRef> { self.primary.as_ref().and_then(Weak::upgrade) }

    fn request_focus(&mut self) {
        self.mutations += 1;
        self.focus_requests += 1;
    }

    fn on_mode_changed(&mut self, mode: Mode) { self.mode_changes.push(mode); }
}

/// A window system with a fixed display list.
///
/// Keeps every overlay it creates so callers can inspect them.
#[derive(Default)]
pub struct HeadlessWindowSystem {
    displays: Vec<Display>,
    overlays: RefCell<Vec<Rc<RefCell<HeadlessWindow>>>>,
}

impl HeadlessWindowSystem {
    /// Creates a window system reporting `displays`.
    #[must_use]
    pub fn new(displays: Vec<Display>) -> Self {
        Self {
            displays,
            overlays: RefCell::default(),
        }
    }

    /// Creates a window system from the `headless` configuration section.
    #[must_use]
    pub fn from_config(config: &HeadlessConfig) -> Self { Self::new(config.to_displays()) }

    /// The most recently created overlay.
    #[must_use]
    pub fn overlay(&self) -> Option<Rc<RefCell<HeadlessWindow>>> { self.overlays.borrow().last().cloned() }

    /// Number of overlays created.
    #[must_use]
    pub fn overlay_count(&self) -> usize { self.overlays.borrow().len() }
}

impl DisplayProvider for HeadlessWindowSystem {
    fn displays(&self) -> Vec<Display> { self.displays.clone() }
}

impl WindowSystem for HeadlessWindowSystem {
    fn create_overlay(&self, spec: &OverlaySpec) -> ContainerRef {
        let overlay = Rc::new(RefCell::new(HeadlessWindow::from_overlay_spec(spec)));
        self.overlays.borrow_mut().push(overlay.clone());
        overlay
    }
}

/// Graphics backend that counts its calls.
///
/// Clones share the counters.
#[derive(Debug, Clone, Default)]
pub struct RecordingGraphics {
    reallocations: Rc<Cell<u32>>,
    texture_refreshes: Rc<Cell<u32>>,
}

impl RecordingGraphics {
    /// Creates a backend with zeroed counters.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Number of reallocations.
    #[must_use]
    pub fn reallocations(&self) -> u32 { self.reallocations.get() }

    /// Number of texture refreshes.
    #[must_use]
    pub fn texture_refreshes(&self) -> u32 { self.texture_refreshes.get() }
}

impl GraphicsBackend for RecordingGraphics {
    fn reallocate(&mut self) { self.reallocations.set(self.reallocations.get() + 1); }

    fn refresh_textures(&mut self) { self.texture_refreshes.set(self.texture_refreshes.get() + 1); }
}

/// Menu bar that records every visibility change.
///
/// Clones share the history.
#[derive(Debug, Clone, Default)]
pub struct RecordingMenuBar {
    history: Rc<RefCell<Vec<bool>>>,
}

impl RecordingMenuBar {
    /// Creates a menu bar with an empty history.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Every visibility requested, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<bool> { self.history.borrow().clone() }

    /// Current visibility. The menu bar starts out visible.
    #[must_use]
    pub fn is_visible(&self) -> bool { self.history.borrow().last().copied().unwrap_or(true) }
}

impl MenuBar for RecordingMenuBar {
    fn set_visible(&mut self, visible: bool) { self.history.borrow_mut().push(visible); }
}

/// Listener that records what it receives.
#[derive(Debug, Default)]
pub struct RecordingListener {
    name: String,
    events: RefCell<Vec<WindowEvent>>,
    shared: Option<Rc<RefCell<Vec<String>>>>,
}

impl RecordingListener {
    /// Creates a listener called `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a listener that also appends its name to `shared` on every event.
    ///
    /// Several listeners sharing one log show the dispatch order.
    #[must_use]
    pub fn with_shared_log(name: &str, shared: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            shared: Some(shared),
            ..Self::named(name)
        }
    }

    /// The listener's name.
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// Every event received, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<WindowEvent> { self.events.borrow().clone() }

    /// Kinds of every event received, oldest first.
    #[must_use]
    pub fn kinds(&self) -> Vec<WindowEventKind> { self.events.borrow().iter().map(|e| e.kind).collect() }
}

impl WindowListener for RecordingListener {
    fn on_window_event(&self, event: &WindowEvent) {
        self.events.borrow_mut().push(*event);
        if let Some(shared) = &self.shared {
            shared.borrow_mut().push(self.name.clone());
        }
    }
}
