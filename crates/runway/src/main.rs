//! Runway: startup growth trajectory calculator.

use runway_lib::{app, config, errors};

fn main() {
    let config = config::AppConfig::parse();

    // Initialize tracing
    let default_level = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    // RUST_LOG wins when set; otherwise -v picks the level.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level.to_string()));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(e) = app::run(&config) {
        eprintln!("Error: {e:#}");
        std::process::exit(errors::exit_code(&e));
    }
}
