//! External library downloader client.

use bomfetch_models::{InvocationFailure, InvocationOutcome, InvocationSpec};
use std::io;
use std::process::{Command, Stdio};
use tracing::debug;

/// One blocking download of the libraries for a single identifier.
pub trait Downloader {
    fn invoke(&self, identifier: &str, spec: &InvocationSpec) -> InvocationOutcome;
}

/// Runs the downloader as a child process and waits for it to exit.
pub struct ProcessDownloader {
    program: String,
}

impl ProcessDownloader {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ProcessDownloader {
    fn default() -> Self {
        Self::new("easyeda2kicad")
    }
}

impl Downloader for ProcessDownloader {
    fn invoke(&self, identifier: &str, spec: &InvocationSpec) -> InvocationOutcome {
        let args = spec.args_for(identifier);
        debug!(program = %self.program, args = ?args, "Running downloader");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match output {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                if !stdout.trim().is_empty() {
                    debug!(identifier, stdout = %stdout.trim(), "Downloader output");
                }

                if output.status.success() {
                    InvocationOutcome::Succeeded
                } else {
                    InvocationOutcome::Failed(InvocationFailure::NonZeroExit {
                        code: output.status.code(),
                        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                    })
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                InvocationOutcome::Failed(InvocationFailure::NotFound {
                    program: self.program.clone(),
                })
            }
            Err(e) => InvocationOutcome::Failed(InvocationFailure::Spawn {
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bomfetch_models::DownloadMode;

    #[test]
    fn test_missing_program_is_not_found() {
        let downloader = ProcessDownloader::new("bomfetch-test-no-such-downloader");
        let spec = InvocationSpec::new(DownloadMode::Full, false, None);

        let outcome = downloader.invoke("C25804", &spec);

        assert_eq!(
            outcome,
            InvocationOutcome::Failed(InvocationFailure::NotFound {
                program: "bomfetch-test-no-such-downloader".into()
            })
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_classification() {
        let spec = InvocationSpec::new(DownloadMode::Full, false, None);

        // `true`/`false` ignore their arguments
        assert!(ProcessDownloader::new("true").invoke("C1", &spec).is_success());

        match ProcessDownloader::new("false").invoke("C1", &spec) {
            InvocationOutcome::Failed(InvocationFailure::NonZeroExit { code, .. }) => {
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
