//! # bomfetch Core Domain Models
//! 
//! Domain types shared between the BOM ingestion pipeline and the
//! library download runner.
//! 
//! ## Key Models
//! 
//! - **Table**: column-oriented, text-only view of a loaded BOM file
//! - **DownloadMode** / **ModeFlags**: artifact selection and its tie-break rules
//! - **InvocationSpec**: the flag tokens shared by every downloader call in a run
//! - **RunTally** / **RunEvent**: batch progress and outcome accounting

pub mod table;
pub mod invocation;
pub mod run;

#[cfg(test)]
pub mod property_tests;

pub use table::*;
pub use invocation::*;
pub use run::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_follows_resolved_mode() {
        let flags = ModeFlags {
            symbol: true,
            footprint: true,
            ..Default::default()
        };
        let spec = InvocationSpec::new(flags.resolve(), false, None);

        assert_eq!(spec.mode(), DownloadMode::SymbolOnly);
        assert_eq!(spec.tokens(), ["--symbol"]);
    }

    #[test]
    fn test_tally_from_default() {
        let tally = RunTally::default();
        assert_eq!(tally.total, 0);
        assert_eq!(tally.failed(), 0);
    }
}
