use log::{info, warn};
use tokio::process::Command;

use crate::AutomationConfig;

/// Launch the browser automation and wait for it to exit.
///
/// Failures are only logged, a log from an earlier run may still hold a usable link.
pub async fn run_automation(config: &AutomationConfig) {
    info!("Running automation: {} {:?}", config.program, config.args);

    match Command::new(&config.program)
        .args(&config.args)
        .status()
        .await
    {
        Ok(status) if status.success() => info!("Automation finished"),
        Ok(status) => warn!("Automation exited with {}", status),
        Err(e) => warn!("Failed to launch {}: {}", config.program, e),
    }
}
