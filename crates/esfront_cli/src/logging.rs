//! Tracing setup for the CLI.
//!
//! `ESFRONT_LOG` takes the usual `RUST_LOG` syntax (`debug`,
//! `esfront_parser=trace`) and defaults to `warn`. Logs always go to stderr
//! so they never mix with the JSON on stdout.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

const LOG_ENV: &str = "ESFRONT_LOG";
const DEFAULT_FILTER: &str = "warn";

fn build_filter() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(value) => EnvFilter::builder().parse_lossy(value),
        Err(_) => EnvFilter::new(DEFAULT_FILTER),
    }
}

/// Install the global subscriber, as flat text or as JSON lines.
pub fn init_tracing(json: bool) {
    let filter = build_filter();
    if json {
        let json_layer = fmt::layer().json().with_writer(std::io::stderr);
        Registry::default().with(filter).with(json_layer).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
