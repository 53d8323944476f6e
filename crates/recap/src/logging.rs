//! Tracing subscriber setup shared by the binaries

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_tracing(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if verbose {
      EnvFilter::new("info,recap=debug,lance=warn,lance_datafusion=warn,datafusion=warn")
    } else {
      EnvFilter::new("recap=info,lance=error,lance_datafusion=error,datafusion=error,warn")
    }
  });

  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();
}
