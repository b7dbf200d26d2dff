use anyhow::Result;
use rust_xlsxwriter::{Format, Workbook};
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tickboard_core::{Series, SeriesSet};
use tracing::{debug, trace, warn};

/// Longest sheet name a workbook accepts.
pub const MAX_SHEET_NAME: usize = 31;

const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Worksheet name for `ticker`: characters Excel rejects become `_`, then
/// the name is cut to [`MAX_SHEET_NAME`].
pub fn sheet_name(ticker: &str) -> String {
    ticker
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME)
        .collect()
}

/// Write every series to one `.xlsx` workbook at `path`, one worksheet per
/// ticker.
///
/// Parent directories are created as necessary. A ticker whose sheet name is
/// already taken (Excel compares them case-insensitively) is skipped. The
/// workbook is written next to `path` first and moved over it once complete,
/// so a failed export leaves any previous file untouched.
pub fn write_workbook(path: &Path, data: &SeriesSet) -> Result<()> {
    let dir = match path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            dir
        }
        None => Path::new("."),
    };

    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    let mut sheets = HashSet::new();
    for (ticker, series) in data.iter() {
        let sheet = sheet_name(ticker);
        if !sheets.insert(sheet.to_lowercase()) {
            warn!("[{ticker}] sheet name {sheet:?} already used; skipping export");
            continue;
        }
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet)?;
        write_sheet(worksheet, series, &date_format)?;
        trace!("[{ticker}] written to sheet {sheet:?}");
    }

    let buffer = workbook.save_to_buffer()?;
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&buffer)?;
    file.persist(path)?;

    debug!("{} sheets written to {}", sheets.len(), path.display());
    Ok(())
}

/// `Date` column first, then the series' own columns; missing values stay blank.
fn write_sheet(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    series: &Series,
    date_format: &Format,
) -> Result<()> {
    let fields: Vec<_> = series.fields().collect();

    worksheet.write_string(0, 0, "Date")?;
    for (col, field) in fields.iter().enumerate() {
        worksheet.write_string(0, col as u16 + 1, field.label())?;
    }
    worksheet.set_column_width(0, 20.0)?;

    for (row, time) in series.index().iter().enumerate() {
        let row = row as u32 + 1;
        worksheet.write_datetime_with_format(row, 0, time, date_format)?;
        for (col, field) in fields.iter().enumerate() {
            if let Some(value) = series.value(*field, row as usize - 1) {
                worksheet.write_number(row, col as u16 + 1, value)?;
            }
        }
    }
    Ok(())
}
