pub mod singlethreaded;

use std::{io::Read, path::PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Required trait for making a single batch extraction call to Tabula for table(s) extraction.
#[cfg_attr(test, mockall::automock)]
pub trait TabulaExtractor {
    fn extract_tables(&self, request: TabulaExtractionRequest) -> Result<JsonTableSet>;
}

/// Single request to a [TabulaExtractor] to batch extract tables from a PDF file.
#[derive(Clone, Debug, PartialEq)]
pub struct TabulaExtractionRequest {
    pub pdf_path: PathBuf,
    pub password: Option<String>,
    /// Pages to extract from. `None` extracts from every page.
    pub pages: Option<Vec<i32>>,
    pub guess: bool,
    pub use_returns: bool,
    pub method: TabulaExtractionMethod,
}

impl TabulaExtractionRequest {
    /// Creates a request for every table Tabula can detect on every page of the document,
    /// keeping line breaks embedded within cells.
    pub fn whole_document(pdf_path: PathBuf, method: TabulaExtractionMethod) -> Self {
        Self {
            pdf_path,
            password: None,
            pages: None,
            guess: true,
            use_returns: true,
            method,
        }
    }
}

/// Extraction algorithm for Tabula to use.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TabulaExtractionMethod {
    #[default]
    Guess,
    Lattice,
    Stream,
}

impl TabulaExtractionMethod {
    pub fn to_tabula_extraction_method(self) -> tabula::ExtractionMethod {
        match self {
            TabulaExtractionMethod::Stream => tabula::ExtractionMethod::Basic,
            TabulaExtractionMethod::Guess => tabula::ExtractionMethod::Decide,
            TabulaExtractionMethod::Lattice => tabula::ExtractionMethod::Spreadsheet,
        }
    }
}

/// A sequence of extracted tables from a PDF file.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct JsonTableSet(pub Vec<JsonTable>);

impl JsonTableSet {
    /// Decodes the JSON output written by Tabula.
    pub fn from_reader<R: Read>(r: R) -> Result<Self> {
        serde_json::from_reader(r).context("parsing extracted PDF table data")
    }
}

/// A single extracted table from a PDF file.
#[derive(Debug, Deserialize)]
pub struct JsonTable {
    pub extraction_method: String,
    pub page_number: i32,
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    pub right: f32,
    pub bottom: f32,
    pub data: Vec<JsonRow>,
}

/// A single extracted table row from a PDF file.
#[derive(Debug, Deserialize)]
pub struct JsonRow(pub Vec<JsonCell>);

/// A single extracted table cell from a PDF file.
#[derive(Debug, Deserialize)]
pub struct JsonCell {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    pub text: String,
}
