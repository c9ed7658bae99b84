//! Gift-sheet row source.
//!
//! The sheet is an external collaborator: the registry only depends on an
//! ordered sequence of `(name, suggestion, suggestion, colors)` rows. The
//! shipped implementation reads the CSV export of the sheet; other formats
//! plug in behind [`RowSource`].

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One row of the gift sheet, as produced by a [`RowSource`].
///
/// Suggestion values are raw — normalization into navigable links happens at
/// render time, not at import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub presente: String,
    pub sugestao1: String,
    pub sugestao2: String,
    pub cores: String,
}

/// Narrow interface over the tabular source feeding the registry.
pub trait RowSource {
    /// Read all rows, in sheet order. Blank cells come back as `""`.
    fn read_rows(&self) -> Result<Vec<SheetRow>>;
}

// ─── CSV implementation ───────────────────────────────────────────────────────

/// Sheet column headers, as exported from the original gift list.
const COL_NAME: &str = "Presentes";
const COL_SUGGESTION_1: &str = "Sugestão 1";
const COL_SUGGESTION_2: &str = "Sugestão 2";
const COL_COLORS: &str = "Cores";

/// CSV-backed row source. Columns are located by header name, so extra or
/// reordered columns in the export are tolerated.
pub struct CsvSheet {
    path: PathBuf,
}

impl CsvSheet {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl RowSource for CsvSheet {
    fn read_rows(&self) -> Result<Vec<SheetRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .with_context(|| format!("failed to open sheet at '{}'", self.path.display()))?;

        let headers = reader
            .headers()
            .context("failed to read sheet headers")?
            .clone();

        let column = |name: &str| headers.iter().position(|h| h.trim() == name);

        let name_idx = column(COL_NAME)
            .with_context(|| format!("sheet is missing the '{COL_NAME}' column"))?;
        let sug1_idx = column(COL_SUGGESTION_1);
        let sug2_idx = column(COL_SUGGESTION_2);
        let cores_idx = column(COL_COLORS);

        // Missing optional columns and short records both read as "".
        let cell = |record: &csv::StringRecord, idx: Option<usize>| -> String {
            idx.and_then(|i| record.get(i))
                .unwrap_or_default()
                .trim()
                .to_string()
        };

        let mut rows = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let record =
                result.with_context(|| format!("malformed sheet record at row {}", line + 2))?;

            let presente = cell(&record, Some(name_idx));
            if presente.is_empty() {
                debug!(row = line + 2, "skipping sheet row with blank name");
                continue;
            }

            rows.push(SheetRow {
                presente,
                sugestao1: cell(&record, sug1_idx),
                sugestao2: cell(&record, sug2_idx),
                cores: cell(&record, cores_idx),
            });
        }

        Ok(rows)
    }
}
