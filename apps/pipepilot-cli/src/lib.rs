pub mod build;
pub mod server;

use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` overrides the verbosity-derived default.
pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}
