//! Batch Runner
//!
//! Invokes the downloader once per identifier, strictly in order, and keeps
//! the tally. A failed identifier never stops the batch and is never retried.

use bomfetch_models::{InvocationOutcome, InvocationSpec, RunEvent, RunTally};

use crate::downloader::Downloader;
use crate::reporter::Reporter;

pub struct BatchRunner<'a, D: Downloader, R: Reporter> {
    downloader: &'a D,
    reporter: &'a R,
}

impl<'a, D: Downloader, R: Reporter> BatchRunner<'a, D, R> {
    pub fn new(downloader: &'a D, reporter: &'a R) -> Self {
        Self {
            downloader,
            reporter,
        }
    }

    pub fn run(&self, identifiers: &[String], spec: &InvocationSpec) -> RunTally {
        let mut tally = RunTally::new();

        self.reporter.report(&RunEvent::Started {
            total: identifiers.len(),
            tokens: spec.tokens().to_vec(),
        });

        for identifier in identifiers {
            self.reporter.report(&RunEvent::Attempt {
                identifier: identifier.clone(),
            });

            let outcome = self.downloader.invoke(identifier, spec);
            tally.record(&outcome);

            let event = match outcome {
                InvocationOutcome::Succeeded => RunEvent::Succeeded {
                    identifier: identifier.clone(),
                },
                InvocationOutcome::Failed(failure) => RunEvent::Failed {
                    identifier: identifier.clone(),
                    failure,
                },
            };
            self.reporter.report(&event);
        }

        self.reporter.report(&RunEvent::Finished { tally });
        tally
    }
}
