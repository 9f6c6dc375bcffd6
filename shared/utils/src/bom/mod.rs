//! BOM (Bill of Materials) Processing Module
//! 
//! Loads BOM files into text-only tables and extracts distributor part
//! identifiers from them. Supports delimited text (CSV/TSV/semicolon) and
//! Excel workbooks (XLSX/XLS).

pub mod detector;
pub mod parser;
pub mod extractor;

pub use detector::{BomFormat, TextEncoding, parse_delimiter, sniff_delimiter};
pub use parser::{BomReader, ParsedBom};
pub use extractor::{IdentifierExtractor, ExtractionResult, extract_identifiers};
