//! Downloader invocation models.
//!
//! The external library downloader is driven by a small set of flag tokens
//! that stay the same for every identifier in a run. The per-identifier
//! `--lcsc_id=` token is appended by whoever performs the call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which artifact category the downloader should retrieve.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DownloadMode {
    /// Symbol, footprint and 3D model
    #[default]
    Full,
    SymbolOnly,
    FootprintOnly,
    ModelOnly,
}

impl DownloadMode {
    pub fn token(&self) -> &'static str {
        match self {
            Self::Full => "--full",
            Self::SymbolOnly => "--symbol",
            Self::FootprintOnly => "--footprint",
            Self::ModelOnly => "--3d",
        }
    }
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Raw mode switches as the operator typed them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    pub full: bool,
    pub symbol: bool,
    pub footprint: bool,
    pub model: bool,
}

impl ModeFlags {
    /// Collapse the switches into a single mode.
    ///
    /// `full` beats any combination; otherwise symbol, footprint, then model
    /// are checked in that order. No switch at all means `Full`.
    pub fn resolve(&self) -> DownloadMode {
        if self.full {
            DownloadMode::Full
        } else if self.symbol {
            DownloadMode::SymbolOnly
        } else if self.footprint {
            DownloadMode::FootprintOnly
        } else if self.model {
            DownloadMode::ModelOnly
        } else {
            DownloadMode::Full
        }
    }

    /// True when more than one switch was set and a tie-break applied.
    pub fn is_ambiguous(&self) -> bool {
        [self.full, self.symbol, self.footprint, self.model]
            .iter()
            .filter(|f| **f)
            .count()
            > 1
    }
}

/// Ordered flag tokens shared by every invocation of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationSpec {
    mode: DownloadMode,
    tokens: Vec<String>,
}

impl InvocationSpec {
    /// Assemble tokens in the fixed order: mode, overwrite, output.
    ///
    /// `output` is expected to already be absolute.
    pub fn new(mode: DownloadMode, overwrite: bool, output: Option<&str>) -> Self {
        let mut tokens = vec![mode.token().to_string()];
        if overwrite {
            tokens.push("--overwrite".to_string());
        }
        if let Some(dir) = output {
            tokens.push(format!("--output={}", dir));
        }
        Self { mode, tokens }
    }

    pub fn mode(&self) -> DownloadMode {
        self.mode
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Full argument list for one identifier.
    pub fn args_for(&self, identifier: &str) -> Vec<String> {
        let mut args = self.tokens.clone();
        args.push(format!("--lcsc_id={}", identifier));
        args
    }
}

impl fmt::Display for InvocationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}
