/// CLI argument parsing

use clap::Parser;

// Build timestamp injected at compile time
pub const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");
pub const VERSION_WITH_BUILD: &str = concat!(env!("CARGO_PKG_VERSION"), " (built: ", env!("BUILD_TIMESTAMP"), ")");

/// The dashboard takes no arguments; running it opens the full-screen UI.
/// Tuning lives in the config file.
#[derive(Parser, Debug)]
#[command(name = "current-state")]
#[command(author, version = VERSION_WITH_BUILD, about, long_about = None)]
pub struct Cli {}
