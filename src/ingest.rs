use std::fmt;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, Range, Reader, Xls, Xlsx};
use log::{debug, info};

use crate::error::{AppError, Result};
use crate::models::{CellValue, Row, Table};

// ---------------------------------------------------------------------------
// Format detection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
    Xls,
}

impl FileFormat {
    /// Dispatch on the file extension alone; the content is never sniffed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        if ext.eq_ignore_ascii_case("csv") {
            Ok(Self::Csv)
        } else if ext.eq_ignore_ascii_case("xlsx") {
            Ok(Self::Xlsx)
        } else if ext.eq_ignore_ascii_case("xls") {
            Ok(Self::Xls)
        } else if ext.is_empty() {
            Err(AppError::UnsupportedFileType("(no extension)".to_string()))
        } else {
            Err(AppError::UnsupportedFileType(format!(".{ext}")))
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("CSV"),
            Self::Xlsx => f.write_str("XLSX"),
            Self::Xls => f.write_str("XLS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Read and parse a file into a fresh table. The extension is checked before
/// anything is read; no partial table is returned on failure.
pub async fn load_table(path: &Path) -> Result<Table> {
    let format = FileFormat::from_path(path)?;
    info!("Loading {} as {format}", path.display());
    let bytes = tokio::fs::read(path).await?;
    let table = parse_bytes(&bytes, format)?;
    info!(
        "Parsed {} rows x {} columns from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

pub fn parse_bytes(bytes: &[u8], format: FileFormat) -> Result<Table> {
    match format {
        FileFormat::Csv => parse_csv(bytes),
        FileFormat::Xlsx => parse_spreadsheet(bytes, Workbook::Xlsx),
        FileFormat::Xls => parse_spreadsheet(bytes, Workbook::Xls),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// First record is the header row; every later record becomes a row keyed by
/// it. Blank lines are skipped; a record with a different field count is a
/// parse error.
pub fn parse_csv(bytes: &[u8]) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row = Row::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            row.insert(header.as_str(), CellValue::text(field));
        }
        rows.push(row);
    }

    debug!("CSV: {} headers, {} rows", headers.len(), rows.len());
    Ok(Table::new(headers, rows))
}

// ---------------------------------------------------------------------------
// XLSX / XLS
// ---------------------------------------------------------------------------

/// Workbook containers calamine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workbook {
    Xlsx,
    Xls,
}

/// Parse the first worksheet of an in-memory workbook.
pub fn parse_spreadsheet(bytes: &[u8], kind: Workbook) -> Result<Table> {
    let cursor = Cursor::new(bytes);
    let range = match kind {
        Workbook::Xlsx => first_sheet(open_workbook_from_rs::<Xlsx<_>, _>(cursor))?,
        Workbook::Xls => first_sheet(open_workbook_from_rs::<Xls<_>, _>(cursor))?,
    };
    table_from_range(&range)
}

fn first_sheet<'a, R>(opened: std::result::Result<R, R::Error>) -> Result<Range<Data>>
where
    R: Reader<Cursor<&'a [u8]>>,
    R::Error: fmt::Display,
{
    let mut workbook = opened.map_err(|e| AppError::SpreadsheetParse(e.to_string()))?;
    match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => Ok(range),
        Some(Err(e)) => Err(AppError::SpreadsheetParse(e.to_string())),
        None => Err(AppError::EmptySheet),
    }
}

/// First row becomes the headers; each later row becomes a `Row`, with cells
/// past the row's end reading as empty. A sheet without data rows is an error.
pub fn table_from_range(range: &Range<Data>) -> Result<Table> {
    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Err(AppError::EmptySheet);
    };
    let headers: Vec<String> = header_row.iter().map(|c| cell_value(c).to_string()).collect();

    let rows: Vec<Row> = rows_iter
        .map(|cells| {
            let mut row = Row::new();
            for (idx, header) in headers.iter().enumerate() {
                let value = cells.get(idx).map(cell_value).unwrap_or(CellValue::Empty);
                row.insert(header.as_str(), value);
            }
            row
        })
        .collect();

    if rows.is_empty() {
        return Err(AppError::EmptySheet);
    }

    debug!("Sheet: {} headers, {} rows", headers.len(), rows.len());
    Ok(Table::new(headers, rows))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
        Data::Error(e) => CellValue::Text(format!("{e:?}")),
        Data::Empty => CellValue::Empty,
    }
}
