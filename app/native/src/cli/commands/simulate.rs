//! Scripted transitions against the headless host.

use std::cell::RefCell;
use std::rc::Rc;

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::{self, SoftScreenConfig};
use crate::controller::{ControllerOptions, FullScreenController, Mode};
use crate::diagnostics::DiagnosticLog;
use crate::error::SoftScreenError;
use crate::geometry::{Insets, Point, Size};
use crate::headless::{
    HeadlessSurface, HeadlessWindow, HeadlessWindowSystem, RecordingGraphics, RecordingMenuBar,
};
use crate::host::{Container, ContainerRef, SurfaceRef, WindowState};
use crate::platform::Platform;

/// Title bar height of the simulated application window.
const TITLE_BAR: i32 = 28;

/// Where the simulated application window sits before entering fullscreen.
const PRIMARY_ORIGIN: Point = Point::new(100, 100);

/// Arguments for `softscreen simulate`.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Surface size.
    #[arg(long, default_value = "800x600", value_name = "WxH")]
    pub surface: Size,

    /// Display index (overrides the configuration).
    #[arg(long, short)]
    pub display: Option<usize>,

    /// Platform whose quirks apply (defaults to the current one).
    #[arg(long, value_enum)]
    pub platform: Option<Platform>,

    /// Start with the application window shown.
    #[arg(long)]
    pub primary_visible: bool,

    /// Print the steps as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// State after one step of the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[tabled(rename = "Step")]
    pub step: String,
    #[tabled(rename = "Ticks")]
    pub ticks: usize,
    #[tabled(rename = "Mode")]
    pub mode: Mode,
    #[tabled(rename = "Holder")]
    pub holder: &'static str,
    #[tabled(rename = "Overlay")]
    #[serde(skip)]
    pub overlay: String,
    #[tabled(skip)]
    pub overlay_visible: bool,
    #[tabled(skip)]
    pub overlay_state: WindowState,
    #[tabled(rename = "Surface")]
    #[serde(skip)]
    pub surface: String,
    #[tabled(skip)]
    pub surface_location: Point,
    #[tabled(rename = "Menu bar")]
    #[serde(skip)]
    pub menu_bar: String,
    #[tabled(skip)]
    pub menu_bar_visible: bool,
}

/// Result of a full simulation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulation {
    /// Display the overlay was placed on.
    pub display: String,
    /// One entry per step.
    pub steps: Vec<Step>,
    /// Diagnostics reported along the way.
    pub diagnostics: Vec<String>,
    /// Graphics reallocations performed.
    pub reallocations: u32,
}

struct Harness {
    controller: FullScreenController,
    surface: SurfaceRef,
    primary: Rc<RefCell<HeadlessWindow>>,
    menu_bar: RecordingMenuBar,
}

impl Harness {
    fn settle(&mut self) -> usize {
        let mut ticks = 0;
        while self.controller.pending_actions() > 0 {
            self.controller.tick();
            ticks += 1;
        }
        ticks
    }

    fn snapshot(&self, step: &str, ticks: usize) -> Step {
        let overlay = self.controller.overlay().borrow();
        let surface_location = self.surface.borrow().location();
        let holder = if self.primary.borrow().contains(&self.surface) { "primary" } else { "overlay" };
        Step {
            step: step.to_string(),
            ticks,
            mode: self.controller.mode(),
            holder,
            overlay: format!(
                "{} {:?} at ({}, {})",
                output::format_bool(overlay.is_visible()),
                overlay.window_state(),
                overlay.location().x,
                overlay.location().y
            ),
            overlay_visible: overlay.is_visible(),
            overlay_state: overlay.window_state(),
            surface: format!("({}, {})", surface_location.x, surface_location.y),
            surface_location,
            menu_bar: output::format_bool(self.menu_bar.is_visible()),
            menu_bar_visible: self.menu_bar.is_visible(),
        }
    }
}

/// Runs the enter/exit script.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the headless host has
/// no displays.
pub fn run(args: &SimulateArgs, config: &SoftScreenConfig) -> Result<Simulation, SoftScreenError> {
    let mut options = ControllerOptions::from_config(config)?;
    if let Some(display) = args.display {
        options.display = display;
    }
    if let Some(platform) = args.platform {
        options.platform = platform;
    }

    let windows = HeadlessWindowSystem::from_config(&config.headless);
    let primary = Rc::new(RefCell::new(
        HeadlessWindow::new("softscreen", Insets::new(TITLE_BAR, 0, 0, 0))
            .with_frame(PRIMARY_ORIGIN, Size::new(args.surface.width, args.surface.height + TITLE_BAR))
            .with_visible(args.primary_visible),
    ));
    let primary_ref: ContainerRef = primary.clone();
    let surface: SurfaceRef = Rc::new(RefCell::new(HeadlessSurface::new(args.surface, Some(primary_ref))));
    primary.borrow_mut().attach_surface(surface.clone());

    let graphics = RecordingGraphics::new();
    let menu_bar = RecordingMenuBar::new();
    let log = DiagnosticLog::new();
    let controller = FullScreenController::new(
        surface.clone(),
        &windows,
        Box::new(graphics.clone()),
        Box::new(menu_bar.clone()),
        Box::new(log.clone()),
        options,
    )?;

    let mut harness = Harness { controller, surface, primary, menu_bar };
    let mut steps = vec![harness.snapshot("start", 0)];

    harness.controller.enter_full_screen();
    let ticks = harness.settle();
    steps.push(harness.snapshot("enter", ticks));

    harness.controller.exit_full_screen();
    let ticks = harness.settle();
    steps.push(harness.snapshot("exit", ticks));

    let display = harness.controller.display();
    Ok(Simulation {
        display: format!("{} ({}) {}", display.index, display.name, display.resolution),
        steps,
        diagnostics: log.entries().into_iter().map(|d| format!("{}: {}", d.context, d.error)).collect(),
        reallocations: graphics.reallocations(),
    })
}

/// Executes `softscreen simulate`.
///
/// # Errors
///
/// Returns an error if the simulation cannot be set up.
pub fn execute(args: &SimulateArgs) -> Result<(), SoftScreenError> {
    let simulation = run(args, config::get_config())?;

    if args.json {
        let value =
            serde_json::to_value(&simulation).map_err(|e| SoftScreenError::Config(e.to_string()))?;
        output::print_highlighted_json(&value);
        return Ok(());
    }

    println!("{} {}", "Display:".bold(), simulation.display);
    let table = Table::new(&simulation.steps)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..2)).with(Alignment::right()))
        .with(Modify::new(Columns::new(6..7)).with(Alignment::center()))
        .to_string();
    println!("{table}");
    println!("{} {}", "Reallocations:".bold(), simulation.reallocations);

    for diagnostic in &simulation.diagnostics {
        println!("{} {diagnostic}", "warning:".yellow());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;

    fn args(surface: Size) -> SimulateArgs {
        SimulateArgs {
            surface,
            display: None,
            platform: Some(Platform::Linux),
            primary_visible: false,
            json: false,
        }
    }

    fn two_displays() -> SoftScreenConfig {
        let mut config = SoftScreenConfig::default();
        config.headless.displays.push(DisplayConfig {
            name: "D1".to_string(),
            x: 1920,
            y: 0,
            width: 2560,
            height: 1440,
        });
        config
    }

    #[test]
    fn test_round_trip_script() {
        let simulation = run(&args(Size::new(800, 600)), &SoftScreenConfig::default()).unwrap();

        let modes: Vec<Mode> = simulation.steps.iter().map(|s| s.mode).collect();
        assert_eq!(modes, vec![Mode::Windowed, Mode::Fullscreen, Mode::Windowed]);
        assert_eq!(simulation.steps[1].surface_location, Point::new(560, 240));
        assert_eq!(simulation.steps[1].holder, "overlay");
        assert_eq!(simulation.steps[2].surface_location, Point::new(0, TITLE_BAR));
        assert_eq!(simulation.steps[2].holder, "primary");
        assert_eq!(simulation.steps[1].ticks, 2);
        assert_eq!(simulation.reallocations, 2);
        assert!(simulation.diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_display_falls_back_and_warns() {
        let mut simulate = args(Size::new(800, 600));
        simulate.display = Some(5);
        let simulation = run(&simulate, &two_displays()).unwrap();

        assert!(simulation.display.starts_with("0 "));
        assert_eq!(simulation.diagnostics.len(), 1);
    }

    #[test]
    fn test_second_display_places_overlay_at_its_origin() {
        let mut simulate = args(Size::new(800, 600));
        simulate.display = Some(1);
        let simulation = run(&simulate, &two_displays()).unwrap();

        assert!(simulation.steps[1].overlay.contains("(1920, 0)"));
        assert_eq!(simulation.steps[1].overlay_state, WindowState::Maximized);
        assert_eq!(simulation.steps[1].surface_location, Point::new(880, 420));
    }

    #[test]
    fn test_no_displays_is_an_error() {
        let mut config = SoftScreenConfig::default();
        config.headless.displays.clear();
        let result = run(&args(Size::new(800, 600)), &config);
        assert!(matches!(result, Err(SoftScreenError::NoDisplays)));
    }

    #[test]
    fn test_macos_full_display_surface_gets_correction() {
        let mut simulate = args(Size::new(1920, 1080));
        simulate.platform = Some(Platform::MacOs);
        let simulation = run(&simulate, &SoftScreenConfig::default()).unwrap();

        assert_eq!(simulation.steps[1].surface_location, Point::new(0, -1));
        assert!(!simulation.steps[1].menu_bar_visible);
        assert!(simulation.steps[2].menu_bar_visible);
    }

    #[test]
    fn test_visible_primary_keeps_surface_in_place() {
        let mut simulate = args(Size::new(800, 600));
        simulate.primary_visible = true;
        let simulation = run(&simulate, &SoftScreenConfig::default()).unwrap();

        assert_eq!(simulation.steps[1].surface_location, Point::new(100, 100 + TITLE_BAR));
    }
}
