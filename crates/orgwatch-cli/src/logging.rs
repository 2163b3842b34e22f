// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the orgwatch CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Per-page request logging
//! RUST_LOG=orgwatch_core=debug orgwatch scan --org mozilla
//!
//! # Per-organization summaries
//! RUST_LOG=orgwatch_core=info orgwatch scan
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is not set.
///
/// Matches both the binary and `orgwatch_core` targets.
const DEFAULT_FILTER: &str = "orgwatch=warn,reqwest=error";

/// Initialize the logging subsystem.
///
/// Logs go to stderr so they never mix with JSON on stdout. `-v` raises the
/// core library to info level when `RUST_LOG` is not set.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose {
        "orgwatch=info,reqwest=error"
    } else {
        DEFAULT_FILTER
    };
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
