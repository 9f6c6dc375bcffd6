//! BOM File Parser
//!
//! Loads delimited-text and spreadsheet bill of materials files into a
//! text-only [`Table`].

use bomfetch_models::Table;
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::detector::{sniff_delimiter, BomFormat, TextEncoding};
use crate::error::{BomError, BomResult};

/// Complete parsed BOM with metadata
#[derive(Debug, Clone)]
pub struct ParsedBom {
    pub path: PathBuf,
    pub format: BomFormat,
    /// Encoding that decoded the file (delimited text only)
    pub encoding: Option<TextEncoding>,
    /// Delimiter used (delimited text only)
    pub delimiter: Option<u8>,
    /// Sheet that was loaded (spreadsheets only)
    pub sheet: Option<String>,
    pub table: Table,
    pub parse_warnings: Vec<String>,
}

/// Main BOM reader
#[derive(Debug, Clone)]
pub struct BomReader {
    /// Pinned delimiter; `None` sniffs it from the header line
    delimiter: Option<u8>,
    sheet_name: Option<String>,
    encodings: Vec<TextEncoding>,
}

impl Default for BomReader {
    fn default() -> Self {
        Self {
            delimiter: None,
            sheet_name: None,
            encodings: TextEncoding::CANDIDATES.to_vec(),
        }
    }
}

impl BomReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_sheet_name(mut self, sheet_name: Option<String>) -> Self {
        self.sheet_name = sheet_name;
        self
    }

    pub fn with_encodings(mut self, encodings: Vec<TextEncoding>) -> Self {
        self.encodings = encodings;
        self
    }

    /// Load the file at `path`, dispatching on its extension.
    pub fn read(&self, path: &Path) -> BomResult<ParsedBom> {
        if !path.exists() {
            return Err(BomError::file_not_found(path.display().to_string()));
        }

        let format = BomFormat::from_path(path);
        info!(path = %path.display(), format = %format, "Detected BOM file format");

        match format {
            BomFormat::Spreadsheet => self.read_spreadsheet(path),
            BomFormat::DelimitedText => self.read_delimited(path),
        }
    }

    /// Parse delimited text, trying each encoding in order.
    fn read_delimited(&self, path: &Path) -> BomResult<ParsedBom> {
        let delimiter = match self.delimiter {
            Some(d) => d,
            None => sniff_delimiter(path, &self.encodings)?,
        };

        let data = std::fs::read(path)?;
        let mut last_error = String::from("no encodings configured");

        for encoding in &self.encodings {
            let Some(text) = encoding.decode(&data) else {
                debug!(encoding = %encoding, "File does not decode");
                last_error = format!("not valid {}", encoding);
                continue;
            };

            match parse_delimited(text.as_bytes(), delimiter) {
                Ok((table, parse_warnings)) => {
                    info!(
                        encoding = %encoding,
                        rows = table.row_count(),
                        columns = table.columns().len(),
                        "Parsed delimited BOM"
                    );
                    return Ok(ParsedBom {
                        path: path.to_path_buf(),
                        format: BomFormat::DelimitedText,
                        encoding: Some(*encoding),
                        delimiter: Some(delimiter),
                        sheet: None,
                        table,
                        parse_warnings,
                    });
                }
                Err(e) => {
                    debug!(encoding = %encoding, error = %e, "Delimited parse failed");
                    last_error = e.to_string();
                }
            }
        }

        Err(BomError::unreadable(path.display().to_string(), last_error))
    }

    /// Parse a workbook sheet. Failures to load the sheet carry the list of
    /// sheets that do exist.
    fn read_spreadsheet(&self, path: &Path) -> BomResult<ParsedBom> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| BomError::unreadable(path.display().to_string(), e.to_string()))?;

        let available = workbook.sheet_names();
        let sheet_name = match &self.sheet_name {
            Some(name) => name.clone(),
            None => available
                .first()
                .cloned()
                .ok_or_else(|| BomError::sheet_load("<first>", "workbook has no sheets", vec![]))?,
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| BomError::sheet_load(&sheet_name, e.to_string(), available.clone()))?;

        let mut rows_iter = range.rows();

        // First row is headers; an entirely empty sheet yields an empty table
        let headers: Vec<String> = rows_iter
            .next()
            .map(|row| row.iter().map(|cell| cell_text(cell).unwrap_or_default()).collect())
            .unwrap_or_default();

        let rows: Vec<Vec<Option<String>>> = rows_iter
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        let (table, parse_warnings) = build_table(headers, rows);
        info!(
            sheet = %sheet_name,
            rows = table.row_count(),
            columns = table.columns().len(),
            "Parsed spreadsheet BOM"
        );

        Ok(ParsedBom {
            path: path.to_path_buf(),
            format: BomFormat::Spreadsheet,
            encoding: None,
            delimiter: None,
            sheet: Some(sheet_name),
            table,
            parse_warnings,
        })
    }
}

/// Parse decoded delimited text with double-quote quoting.
pub(crate) fn parse_delimited(
    data: &[u8],
    delimiter: u8,
) -> Result<(Table, Vec<String>), csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quote(b'"')
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(
            record
                .iter()
                .map(|field| (!field.is_empty()).then(|| field.to_string()))
                .collect(),
        );
    }

    Ok(build_table(headers, rows))
}

/// Render a cell as text. Integral floats lose their `.0` through `f64`'s
/// `Display`, so `123` stays `123`.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn build_table(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> (Table, Vec<String>) {
    let headers = normalize_headers(headers);
    let warnings: Vec<String> = Table::overflowing_rows(headers.len(), &rows)
        .into_iter()
        .map(|i| format!("Row {}: more cells than header columns, extra cells ignored", i + 2))
        .collect();

    for warning in &warnings {
        warn!("{}", warning);
    }

    (Table::from_rows(headers, rows), warnings)
}

/// Name blank headers `Unnamed: <index>` and suffix repeats with `.<n>`.
pub(crate) fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut normalized = Vec::with_capacity(headers.len());

    for (idx, header) in headers.into_iter().enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            header
        };

        let mut name = base.clone();
        while let Some(count) = seen.get_mut(&base) {
            *count += 1;
            name = format!("{}.{}", base, count);
            if !seen.contains_key(&name) {
                break;
            }
        }
        seen.entry(name.clone()).or_insert(0);
        normalized.push(name);
    }

    normalized
}
