//! SoftScreen developer CLI.
//!
//! Inspects the configuration and runs scripted transitions against the
//! headless host.

fn main() {
    if let Err(err) = softscreen_lib::cli::run() {
        eprintln!("softscreen: {err}");
        std::process::exit(1);
    }
}
