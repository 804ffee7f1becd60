use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Level;

static IS_INIT: AtomicBool = AtomicBool::new(false);

/// Installs a fmt subscriber once per process. `RUST_LOG` narrows the output further, events of
/// the `kitepack` crates are enabled up to `TRACE`.
pub fn init() {
  use tracing_subscriber::{fmt, prelude::*, EnvFilter};
  if !IS_INIT.swap(true, Ordering::SeqCst) {
    tracing_subscriber::registry()
      .with(fmt::layer())
      .with(EnvFilter::from_default_env())
      .with(tracing_subscriber::filter::Targets::new().with_targets(vec![
        ("kitepack", Level::TRACE),
        ("kitepack_resolver", Level::TRACE),
        ("kitepack_plugin", Level::TRACE),
      ]))
      .init();
  }
}
