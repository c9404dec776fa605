//! Library root for `clinic-triage`.
//!
//! Clinic-triage simulates a clinic check-in desk designed to:
//! - Register and log in patients and staff
//! - Queue appointment requests ("turnos") tagged with a clinical priority
//! - Serve patients in a deterministic order: most urgent first, then earliest submitted
//!
//! Everything lives in memory for the lifetime of the process. The services
//! sit behind traits so each one can be swapped or mocked.

pub mod base;
pub mod interaction;
pub mod prelude;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Builds the runtime context (queue, identity provider, clock) and runs the
/// desk until the user quits.
pub async fn start(config: Config) -> Void {
    info!("Starting clinic-triage ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config);

    // Start the desk.
    runtime.start().await?;

    info!("Desk closed.");

    Ok(())
}
