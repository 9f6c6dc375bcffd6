//! Progress reporting for batch runs.

use bomfetch_models::{InvocationFailure, RunEvent};
use tracing::{info, warn};

/// Sink for batch progress events.
pub trait Reporter {
    fn report(&self, event: &RunEvent);
}

/// Prints one line per event to stdout and mirrors it to the log.
pub struct ConsoleReporter {
    install_hint: String,
}

impl ConsoleReporter {
    pub fn new(install_hint: impl Into<String>) -> Self {
        Self {
            install_hint: install_hint.into(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: &RunEvent) {
        match event {
            RunEvent::Started { total, tokens } => {
                info!(total, options = %tokens.join(" "), "Starting batch");
                println!("\n⚙️  Downloader options: {}", tokens.join(" "));
                println!("🔧 Components to process: {}\n", total);
            }
            RunEvent::Attempt { identifier } => {
                println!("⬇️  Downloading {}...", identifier);
            }
            RunEvent::Succeeded { identifier } => {
                info!(identifier = %identifier, "Downloaded");
                println!("✅ Success for {}", identifier);
            }
            RunEvent::Failed { identifier, failure } => {
                warn!(identifier = %identifier, failure = %failure, "Download failed");
                match failure {
                    InvocationFailure::NotFound { program } => {
                        println!(
                            "❌ {} not found. Install it with: {}",
                            program, self.install_hint
                        );
                    }
                    InvocationFailure::NonZeroExit { stderr, .. } if !stderr.is_empty() => {
                        println!("❌ Failed {}: {}", identifier, stderr);
                    }
                    other => println!("❌ Failed {}: {}", identifier, other),
                }
            }
            RunEvent::Finished { tally } => {
                info!(
                    total = tally.total,
                    succeeded = tally.succeeded,
                    failed = tally.failed(),
                    "Batch finished"
                );
                println!("\n🎉 Summary:");
                println!("- Total components: {}", tally.total);
                println!("- Downloaded successfully: {}", tally.succeeded);
                println!("- Failed: {}", tally.failed());
            }
        }
    }
}

/// Discards every event.
#[cfg(test)]
pub struct SilentReporter;

#[cfg(test)]
impl Reporter for SilentReporter {
    fn report(&self, _event: &RunEvent) {}
}
