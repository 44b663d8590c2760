//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::WizardError;

/// Exit code for a run the user (or a broken installation) cancelled.
pub const EXIT_CANCELLED: i32 = 2;

/// Exit code for every other failure.
pub const EXIT_FAILURE: i32 = 1;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &WizardError) -> String {
    match e {
        WizardError::Cancelled(cancelled) => format!("Generation cancelled: {}", cancelled.reason),
        other => other.to_string(),
    }
}

pub fn exit_code(e: &WizardError) -> i32 {
    if e.is_cancelled() {
        EXIT_CANCELLED
    } else {
        EXIT_FAILURE
    }
}
