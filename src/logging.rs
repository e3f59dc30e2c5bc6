use tracing_subscriber::EnvFilter;

use crate::error::{InsightError, Result};

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// For embedding apps and tools that don't set up tracing themselves. Fails
/// if a global subscriber is already installed.
pub fn init_logging() -> Result<()> {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .try_init()
    .map_err(|e| InsightError::Logging(e.to_string()))?;

  tracing::info!("Logging initialized");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_second_init_reports_error() {
    // The first call may win or lose against another installer; the second never wins
    let _ = init_logging();
    assert!(matches!(init_logging(), Err(InsightError::Logging(_))));
  }
}
