//! CSV loader for statement line items.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. All three
//! columns are required; cells may be empty.
//!
//! | Column    | Type   | Notes                                                  |
//! |-----------|--------|--------------------------------------------------------|
//! | `section` | string | `revenue`, `variable` / `variable_costs`, `fixed` / `fixed_costs` (any case) |
//! | `name`    | string | Free text, may be empty                                |
//! | `amount`  | string | Kept as text; unusable amounts count as zero in totals |
//!
//! ### Example
//!
//! ```csv
//! section,name,amount
//! revenue,Product sales,1000.00
//! variable,Raw materials,400.00
//! fixed,Rent,200.00
//! ```
use std::path::Path;

use costing_core::Section;
use serde::Deserialize;
use tracing::debug;

use crate::models::LineItemDraft;

#[derive(Debug, Deserialize)]
struct CsvRow {
    section: String,
    name: String,
    amount: String,
}

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Bad structure or a missing column.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based, counting data rows only.
    #[error("unrecognised section '{section}' on row {row}")]
    InvalidSection { section: String, row: usize },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<LineItemDraft, CsvLoadError> {
    let section = Section::parse(&row.section).ok_or_else(|| CsvLoadError::InvalidSection {
        section: row.section.clone(),
        row: row_number,
    })?;

    Ok(LineItemDraft {
        section,
        name: row.name,
        amount: row.amount,
    })
}

/// Parses CSV text into line-item drafts, in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] if the CSV is structurally invalid or a column
///   is missing.
/// * [CsvLoadError::InvalidSection] for an unknown section name.
pub fn load_from_str(input: &str) -> Result<Vec<LineItemDraft>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let drafts = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = drafts.len(), "line items loaded");
    Ok(drafts)
}

/// Reads `path` from disk and delegates to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<LineItemDraft>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}
