//! Worksheet writing for export tasks
//!
//! Thin wrapper around `rust_xlsxwriter` that owns the workbook for one
//! export: sheet naming, header styling, column auto-fit, and per-row
//! cell writes. Presentation choices (colors, width clamp) live here so
//! the task only drives rows through it.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use crate::error::{ExportError, Result};

/// Column widths are clamped to this many character units.
pub const MAX_COLUMN_WIDTH: usize = 30;

/// Header row style: bold light text on a dark solid background.
fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::Navy)
}

/// Compute per-column display widths in character units.
///
/// Each column gets the maximum of its widest cell and its header label,
/// clamped to [`MAX_COLUMN_WIDTH`]. Fails when there are no rows to
/// measure; the caller treats that as a skippable condition.
pub(crate) fn column_widths(rows: &[Vec<String>], header: &[String]) -> Result<Vec<usize>> {
    let first = rows
        .first()
        .ok_or_else(|| ExportError::ColumnSizing("no rows to measure".into()))?;

    let widths = (0..first.len())
        .map(|ix| {
            let widest_cell = rows
                .iter()
                .map(|row| row.get(ix).map_or(0, |cell| cell.chars().count()))
                .max()
                .unwrap_or(0);
            let label = header.get(ix).map_or(0, |label| label.chars().count());
            widest_cell.max(label).min(MAX_COLUMN_WIDTH)
        })
        .collect();
    Ok(widths)
}

/// Workbook writer for a single export.
pub struct SheetWriter {
    workbook: Workbook,
}

impl SheetWriter {
    /// Create a workbook with a single sheet named after the table.
    ///
    /// The worksheet name restrictions (length, reserved characters) are
    /// the writer tool's own and surface as a setup error.
    pub fn create(table_name: &str) -> Result<Self> {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name(table_name)?;
        Ok(Self { workbook })
    }

    fn sheet(&mut self) -> &mut Worksheet {
        // the one worksheet added in create()
        &mut self.workbook.worksheets_mut()[0]
    }

    /// Apply auto-fit column widths for the given row set.
    ///
    /// Fallible by design (empty row set); callers swallow and log the
    /// failure rather than aborting the export.
    pub fn autofit_columns(&mut self, rows: &[Vec<String>], header: &[String]) -> Result<()> {
        let widths = column_widths(rows, header)?;
        let sheet = self.sheet();
        for (ix, width) in widths.into_iter().enumerate() {
            sheet.set_column_width(ix as u16, width as f64)?;
        }
        Ok(())
    }

    /// Write the styled header row at sheet row 0.
    pub fn write_header(&mut self, header: &[String]) -> Result<()> {
        let style = header_format();
        let sheet = self.sheet();
        for (ix, label) in header.iter().enumerate() {
            sheet.write_string_with_format(0, ix as u16, label, &style)?;
        }
        Ok(())
    }

    /// Write one data row at the given sheet row index.
    ///
    /// Empty cells are left blank (never written as empty strings);
    /// non-empty cells are written with surrounding whitespace trimmed.
    pub fn write_row(&mut self, row_index: u32, cells: &[String]) -> Result<()> {
        let sheet = self.sheet();
        for (ix, cell) in cells.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            sheet.write_string(row_index, ix as u16, cell.trim())?;
        }
        Ok(())
    }

    /// Save the workbook to disk.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.workbook.save(path)?;
        Ok(())
    }
}
