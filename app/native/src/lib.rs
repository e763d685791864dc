//! SoftScreen - borderless "soft" fullscreen for a live rendering surface.
//!
//! Instead of switching the display mode, the surface is moved out of its
//! application window into an undecorated, screen-sized overlay window and
//! back again. The host toolkit plugs in through the traits in [`host`];
//! [`headless`] provides an in-memory host for tests and the CLI.

pub mod cli;
pub mod config;
pub mod constants;
pub mod controller;
pub mod deferred;
pub mod diagnostics;
pub mod display;
pub mod error;
pub mod events;
pub mod forwarder;
pub mod geometry;
pub mod headless;
pub mod host;
pub mod logging;
pub mod notifier;
pub mod platform;
pub mod schema;

pub use controller::{ControllerOptions, FullScreenController, Mode};
pub use error::{SoftScreenError, SoftScreenResult};
