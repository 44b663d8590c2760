//! Retry-or-cancel recovery
//!
//! Every fallible step runs inside [`retry_or_cancel`]. A failed attempt is shown to the
//! user, who either retries (the step runs again from scratch, re-reading settings and the
//! filesystem) or cancels the whole run. Retries are unbounded.

use crate::error::{ResolutionError, ResolutionStep, RunCancelled};
use crate::prompt::{Diagnostic, PromptOption, UserPrompt};
use std::path::PathBuf;
use tracing::{debug, error, warn};

/// States of one recovery loop.
#[derive(Debug)]
pub enum RecoveryState<T> {
    Attempting,
    AwaitingUserChoice(ResolutionError),
    Resolved(T),
    Cancelled,
}

const RETRY_OR_CANCEL: [PromptOption; 2] = [PromptOption::Retry, PromptOption::Cancel];

/// Run `attempt` until it succeeds or the user cancels.
pub fn retry_or_cancel<T, F>(
    prompt: &dyn UserPrompt,
    step: ResolutionStep,
    mut attempt: F,
) -> Result<T, RunCancelled>
where
    F: FnMut() -> Result<T, ResolutionError>,
{
    let mut state = RecoveryState::Attempting;
    let mut attempts: u32 = 0;

    loop {
        state = match state {
            RecoveryState::Attempting => {
                attempts += 1;
                debug!(%step, attempt = attempts, "Attempting step");
                match attempt() {
                    Ok(value) => RecoveryState::Resolved(value),
                    Err(err) => RecoveryState::AwaitingUserChoice(err),
                }
            }
            RecoveryState::AwaitingUserChoice(err) => {
                warn!(%step, attempt = attempts, error = %err, "Step failed, asking user");
                let diagnostic = Diagnostic::from(&err);
                match prompt.ask(&diagnostic, &RETRY_OR_CANCEL) {
                    PromptOption::Retry => RecoveryState::Attempting,
                    _ => RecoveryState::Cancelled,
                }
            }
            RecoveryState::Resolved(value) => return Ok(value),
            RecoveryState::Cancelled => {
                warn!(%step, "Run cancelled by user");
                return Err(RunCancelled::by_user(step));
            }
        };
    }
}

/// Report a missing install resource. No retry is offered; the run is over.
pub fn report_fatal(prompt: &dyn UserPrompt, path: PathBuf) -> RunCancelled {
    let err = ResolutionError::MissingInstallResource(path.clone());
    error!(error = %err, "Installation is incomplete");
    prompt.ask(&Diagnostic::from(&err), &[PromptOption::Ok]);
    RunCancelled::missing_resource(path)
}
