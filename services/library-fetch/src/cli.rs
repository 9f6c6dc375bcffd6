use bomfetch_models::ModeFlags;
use bomfetch_utils::PromptMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bom-to-kicad",
    version,
    about = "Download KiCad symbols, footprints and 3D models from LCSC for every part in a BOM",
    after_help = "Examples:\n  \
        bom-to-kicad --bom BOM.csv\n  \
        bom-to-kicad --bom BOM.xlsx --sheet-name 'Elenco componenti'\n  \
        bom-to-kicad --bom BOM.csv --column 'LCSC' --full"
)]
pub struct Cli {
    /// Path to the BOM file (CSV or Excel)
    #[arg(long)]
    pub bom: Option<PathBuf>,

    /// CSV delimiter, or "auto" to detect it from the header line
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Excel sheet name (XLSX/XLS only)
    #[arg(long, alias = "sheet_name")]
    pub sheet_name: Option<String>,

    /// Column holding the LCSC part numbers [default: Supplier Part]
    #[arg(long)]
    pub column: Option<String>,

    /// Download symbol, footprint and 3D model
    #[arg(long)]
    pub full: bool,

    /// Download the symbol only
    #[arg(long)]
    pub symbol: bool,

    /// Download the footprint only
    #[arg(long)]
    pub footprint: bool,

    /// Download the 3D model only
    #[arg(long = "3d")]
    pub model3d: bool,

    /// Overwrite existing library files
    #[arg(long)]
    pub overwrite: bool,

    /// Output directory handed to the downloader (created if missing)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// What to ask for when --bom is not given
    #[arg(long, value_enum)]
    pub prompt: Option<PromptArg>,

    /// Fail instead of prompting when --bom is not given
    #[arg(long)]
    pub no_prompt: bool,

    /// Downloader executable [default: easyeda2kicad]
    #[arg(long)]
    pub downloader: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PromptArg {
    /// Ask for a single LCSC part number
    Identifier,
    /// Ask for a BOM file path
    Bom,
}

impl From<PromptArg> for PromptMode {
    fn from(arg: PromptArg) -> Self {
        match arg {
            PromptArg::Identifier => PromptMode::Identifier,
            PromptArg::Bom => PromptMode::Bom,
        }
    }
}

impl Cli {
    pub fn mode_flags(&self) -> ModeFlags {
        ModeFlags {
            full: self.full,
            symbol: self.symbol,
            footprint: self.footprint,
            model: self.model3d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bomfetch_models::DownloadMode;

    #[test]
    fn test_parse_original_style_flags() {
        let cli = Cli::try_parse_from([
            "bom-to-kicad",
            "--bom",
            "BOM.xlsx",
            "--sheet_name",
            "Elenco componenti",
            "--3d",
            "--overwrite",
        ])
        .unwrap();

        assert_eq!(cli.sheet_name.as_deref(), Some("Elenco componenti"));
        assert_eq!(cli.mode_flags().resolve(), DownloadMode::ModelOnly);
        assert!(cli.overwrite);
        assert!(cli.column.is_none());
    }

    #[test]
    fn test_full_wins_from_command_line() {
        let cli = Cli::try_parse_from(["bom-to-kicad", "--symbol", "--full"]).unwrap();
        assert_eq!(cli.mode_flags().resolve(), DownloadMode::Full);
    }

    #[test]
    fn test_prompt_and_verbosity() {
        let cli = Cli::try_parse_from(["bom-to-kicad", "--prompt", "bom", "-vv"]).unwrap();
        assert_eq!(cli.prompt.map(PromptMode::from), Some(PromptMode::Bom));
        assert_eq!(cli.verbose, 2);
    }
}
