//! Batch run models: per-identifier outcomes, the running tally and the
//! progress events handed to reporters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a single downloader invocation did not succeed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvocationFailure {
    /// Process ran and exited non-zero; `code` is `None` when killed by a signal.
    NonZeroExit { code: Option<i32>, stderr: String },
    /// Executable could not be located.
    NotFound { program: String },
    /// Any other launch error reported by the OS.
    Spawn { reason: String },
}

impl fmt::Display for InvocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonZeroExit { code, stderr } => {
                match code {
                    Some(c) => write!(f, "exit status {}", c)?,
                    None => write!(f, "terminated by signal")?,
                }
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            Self::NotFound { program } => write!(f, "{} not found", program),
            Self::Spawn { reason } => write!(f, "failed to launch: {}", reason),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvocationOutcome {
    Succeeded,
    Failed(InvocationFailure),
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Attempted vs succeeded counters for a batch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunTally {
    pub total: usize,
    pub succeeded: usize,
}

impl RunTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &InvocationOutcome) {
        self.total += 1;
        if outcome.is_success() {
            self.succeeded += 1;
        }
    }

    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }
}

/// Progress events emitted while a batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Started { total: usize, tokens: Vec<String> },
    Attempt { identifier: String },
    Succeeded { identifier: String },
    Failed { identifier: String, failure: InvocationFailure },
    Finished { tally: RunTally },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_failures() {
        let mut tally = RunTally::new();
        tally.record(&InvocationOutcome::Succeeded);
        tally.record(&InvocationOutcome::Failed(InvocationFailure::NotFound {
            program: "easyeda2kicad".into(),
        }));
        tally.record(&InvocationOutcome::Succeeded);

        assert_eq!(tally.total, 3);
        assert_eq!(tally.succeeded, 2);
        assert_eq!(tally.failed(), 1);
    }

    #[test]
    fn test_failure_display_keeps_stderr() {
        let failure = InvocationFailure::NonZeroExit {
            code: Some(2),
            stderr: "Failed to fetch data from EasyEDA API".into(),
        };
        assert_eq!(
            failure.to_string(),
            "exit status 2: Failed to fetch data from EasyEDA API"
        );
    }
}
