//! Legacy service subprocess supervision.
//!
//! # Responsibilities
//! - Launch the child with the parent's stdout/stderr so its output lands in
//!   the same console/log stream; stdin is /dev/null, the child is not
//!   interactive
//! - Report the child's single terminal outcome over a one-shot channel
//!
//! # Design Decisions
//! - `oneshot` models the "exactly one result, ever" contract
//! - No restart policy, no resource limits, no process-group isolation

use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::Command;
use tokio::sync::oneshot;

/// Errors from running the supervised child.
#[derive(Debug, Error)]
pub enum ChildError {
    /// The child could not be launched at all.
    #[error("failed to start child process: {0}")]
    Spawn(#[from] std::io::Error),

    /// The child ran but exited unsuccessfully.
    #[error("child process exited with {0}")]
    Exited(ExitStatus),
}

/// Launch `program` with `args` and supervise it in the background.
///
/// Returns a receiver that yields the child's terminal outcome exactly once:
/// `Ok(())` for a clean exit, `ChildError` for a launch failure or nonzero
/// exit. The caller is not blocked until it awaits the receiver.
pub fn supervise(program: String, args: Vec<String>) -> oneshot::Receiver<Result<(), ChildError>> {
    let (tx, rx) = oneshot::channel();

    tracing::info!(program = %program, args = ?args, "starting child process");

    tokio::spawn(async move {
        let outcome = run_child(&program, &args).await;
        // Informational only; the outcome decides success or failure.
        tracing::info!(program = %program, "child process finished");
        let _ = tx.send(outcome);
    });

    rx
}

async fn run_child(program: &str, args: &[String]) -> Result<(), ChildError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()?;

    let status = child.wait().await?;
    if status.success() {
        Ok(())
    } else {
        Err(ChildError::Exited(status))
    }
}
