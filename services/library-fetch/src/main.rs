//! bom-to-kicad
//!
//! Downloads KiCad symbols, footprints and 3D models for every LCSC part
//! listed in a BOM, one part at a time, through `easyeda2kicad`.

use anyhow::{Context, Result};
use bomfetch_utils::{
    init_logging, parse_delimiter, AppConfig, BomError, BomReader, IdentifierExtractor,
    InteractiveConfig, PromptMode,
};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

mod cli;
mod downloader;
mod invocation;
mod prompt;
mod reporter;
mod runner;

use cli::Cli;
use downloader::ProcessDownloader;
use invocation::InvocationBuilder;
use reporter::ConsoleReporter;
use runner::BatchRunner;

/// Settings after merging command-line flags over configuration.
struct BomSettings {
    column: String,
    delimiter: Option<u8>,
    sheet_name: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())
        .map_err(BomError::from)
        .context("Failed to load configuration")?;
    init_logging(&config.logging, cli.verbose)?;
    info!("bom-to-kicad starting");

    let settings = BomSettings {
        column: cli.column.clone().unwrap_or_else(|| config.bom.column.clone()),
        delimiter: parse_delimiter(cli.delimiter.as_deref().unwrap_or(&config.bom.delimiter))?,
        sheet_name: cli.sheet_name.clone(),
    };

    let stdin = io::stdin();
    let parts = match resolve_input(
        &cli,
        &config.interactive,
        &settings,
        &mut stdin.lock(),
        &mut io::stdout(),
    )? {
        Some(parts) => parts,
        None => return Ok(()),
    };

    if parts.is_empty() {
        println!("⚠️ No LCSC part numbers found in the BOM");
        return Ok(());
    }

    let flags = cli.mode_flags();
    if flags.is_ambiguous() {
        debug!(?flags, "Several download modes selected, applying priority order");
    }

    let spec = InvocationBuilder::new(flags.resolve())
        .overwrite(cli.overwrite)
        .output_dir(cli.output.clone())
        .build()
        .context("Failed to prepare output directory")?;

    let program = cli.downloader.clone().unwrap_or_else(|| config.downloader.program.clone());
    let downloader = ProcessDownloader::new(program);
    let reporter = ConsoleReporter::new(config.downloader.install_hint.clone());

    let tally = BatchRunner::new(&downloader, &reporter).run(&parts, &spec);
    info!(total = tally.total, succeeded = tally.succeeded, "all done");

    Ok(())
}

/// Work out which identifiers to download. `--bom` always wins; without
/// it the operator is prompted, unless prompting is disabled, in which case
/// the run fails with `MissingInput`. `None` means the operator gave an
/// empty answer and there is nothing to do.
fn resolve_input<R: BufRead, W: Write>(
    cli: &Cli,
    interactive: &InteractiveConfig,
    settings: &BomSettings,
    input: &mut R,
    output: &mut W,
) -> Result<Option<Vec<String>>> {
    if let Some(bom) = &cli.bom {
        return load_identifiers(bom, settings).map(Some);
    }

    if !interactive.enabled || cli.no_prompt {
        return Err(BomError::MissingInput.into());
    }

    let mode = cli.prompt.map(PromptMode::from).unwrap_or(interactive.prompt);
    match mode {
        PromptMode::Identifier => match prompt::ask_identifier(input, output)? {
            Some(part) => {
                writeln!(output, "📦 Component to download: {}", part)?;
                Ok(Some(vec![part]))
            }
            None => {
                writeln!(output, "❌ No LCSC part number given. Exiting.")?;
                Ok(None)
            }
        },
        PromptMode::Bom => match prompt::ask_bom_path(input, output)? {
            Some(path) => {
                writeln!(output, "📂 BOM path: {}", path)?;
                load_identifiers(Path::new(&path), settings).map(Some)
            }
            None => {
                writeln!(output, "❌ No BOM path given. Exiting.")?;
                Ok(None)
            }
        },
    }
}

/// Read the BOM at `path` and pull the unique identifiers out of the
/// configured column.
fn load_identifiers(path: &Path, settings: &BomSettings) -> Result<Vec<String>> {
    let path: PathBuf = std::path::absolute(path)?;

    let bom = BomReader::new()
        .with_delimiter(settings.delimiter)
        .with_sheet_name(settings.sheet_name.clone())
        .read(&path)
        .with_context(|| format!("Failed to read BOM file {}", path.display()))?;

    println!("Detected {} file format", bom.format);
    for warning in &bom.parse_warnings {
        warn!("{}", warning);
    }

    println!("\n📋 Columns available in the BOM:");
    println!("{:?}", bom.table.column_names());

    let extraction = IdentifierExtractor::new(&settings.column).extract(&bom.table)?;
    debug!(
        blank = extraction.blank_count,
        duplicates = extraction.duplicate_count,
        "Identifier extraction"
    );

    println!(
        "\n🔎 Found {} unique LCSC codes in column '{}'",
        extraction.identifiers.len(),
        settings.column
    );
    Ok(extraction.identifiers)
}
