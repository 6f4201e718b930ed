//! CSV and XLSX writers for [`Table`].
//!
//! Both writers overwrite whatever is at the target path.

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use crate::error::{ExportError, ExportResult};
use crate::types::table::Table;

/// Create `dir` (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> ExportResult<()> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Path of `{dir}/{stem}.{ext}`.
pub fn output_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    dir.join(format!("{stem}.{ext}"))
}

/// Write a table as CSV with a header row.
pub fn write_csv(table: &Table, path: &Path) -> ExportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;

    debug!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Write a table as a single-sheet XLSX workbook with a bold header row.
pub fn write_xlsx(table: &Table, path: &Path) -> ExportResult<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, name) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header)?;
    }
    for (row_idx, row) in table.rows().iter().enumerate() {
        let excel_row = row_idx as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            // Empty cells are left blank rather than written as ""
            if !value.is_empty() {
                worksheet.write_string(excel_row, col as u16, value)?;
            }
        }
    }

    workbook.save(path)?;

    debug!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
