//! Build errors for state machines.

use crate::audit::AuditFinding;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Owner not specified. Call .owner(owner) before .build()")]
    MissingOwner,

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("State graph audit failed with {} finding(s): {}", .findings.len(), summarize(.findings))]
    AuditFailed { findings: Vec<AuditFinding> },
}

fn summarize(findings: &[AuditFinding]) -> String {
    findings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
