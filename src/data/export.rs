use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::error::ExportError;
use super::model::{CellValue, Table};

/// Name of the only worksheet in spreadsheet exports.
pub const SHEET_NAME: &str = "Sheet1";

// ---------------------------------------------------------------------------
// What is exported, and as what
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn ext(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Xlsx => "Excel",
        }
    }
}

/// The three downloadable tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportScope {
    Filtered,
    TopScorers,
    Comparison(String),
}

impl ExportScope {
    pub fn file_name(&self, format: ExportFormat) -> String {
        let stem = match self {
            ExportScope::Filtered => "donnees_filtrees".to_string(),
            ExportScope::TopScorers => "top_scoreurs".to_string(),
            ExportScope::Comparison(player) => format!("comparaison_{}", sanitize_file_stem(player)),
        };
        format!("{stem}.{}", format.ext())
    }
}

/// Replace path separators, characters Windows rejects and control
/// characters with `_`. Letters (accented included) and spaces are kept.
pub fn sanitize_file_stem(name: &str) -> String {
    name.trim()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Encoders
// ---------------------------------------------------------------------------

/// Encode `table` as a delimited-text (CSV) file with a header row.
pub fn to_delimited(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(CellValue::to_field))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}

/// Encode `table` as an `.xlsx` workbook with a single `Sheet1`.
pub fn to_spreadsheet(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (c, name) in table.columns.iter().enumerate() {
            sheet.write_string_with_format(0, col_index(c)?, name, &header)?;
        }

        for (r, row) in table.rows.iter().enumerate() {
            let r = u32::try_from(r + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            for (c, cell) in row.iter().enumerate() {
                let c = col_index(c)?;
                match cell {
                    CellValue::String(s) => {
                        sheet.write_string(r, c, s)?;
                    }
                    CellValue::Integer(i) => {
                        sheet.write_number(r, c, *i as f64)?;
                    }
                    CellValue::Float(v) if v.is_finite() => {
                        sheet.write_number(r, c, *v)?;
                    }
                    CellValue::Bool(b) => {
                        sheet.write_boolean(r, c, *b)?;
                    }
                    // blank cell
                    CellValue::Float(_) | CellValue::Null => {}
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn col_index(c: usize) -> Result<u16, XlsxError> {
    u16::try_from(c).map_err(|_| XlsxError::RowColumnLimitError)
}

/// Encode `table` and write it to `path`, creating parent directories.
pub fn write_export(path: &Path, table: &Table, format: ExportFormat) -> Result<(), ExportError> {
    let bytes = match format {
        ExportFormat::Csv => to_delimited(table)?,
        ExportFormat::Xlsx => to_spreadsheet(table)?,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    log::info!(
        "Exported {} rows to {} ({})",
        table.len(),
        path.display(),
        format.label()
    );
    Ok(())
}
