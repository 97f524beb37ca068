use crate::error::{Error, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// One cell of a batch request table, typed the way a spreadsheet types it.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    /// Types a raw CSV field the way a spreadsheet would.
    ///
    /// Only canonical numbers become numeric cells: `007` and `1E5` stay
    /// text, so they survive as prefixes. Blank fields become [`Cell::Empty`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }

        let numeric = trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+'));
        if numeric {
            if let Ok(value) = trimmed.parse::<i64>() {
                if value.to_string() == trimmed {
                    return Cell::Int(value);
                }
            } else if let Ok(value) = trimmed.parse::<f64>() {
                return Cell::Float(value);
            }
        }
        Cell::Text(raw.to_owned())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Renders the cell as a prefix candidate: trimmed and uppercased.
    pub fn to_prefix(&self) -> String {
        let rendered = match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.clone(),
            Cell::Int(value) => value.to_string(),
            Cell::Float(value) => format!("{value:?}"),
            Cell::Bool(value) => value.to_string(),
        };
        rendered.trim().to_ascii_uppercase()
    }

    /// Reads the cell as a quantity.
    ///
    /// Floats truncate toward zero and text must hold an integer. Anything
    /// unreadable counts as zero, which validation then rejects.
    pub fn to_quantity(&self) -> i64 {
        match self {
            Cell::Int(value) => *value,
            Cell::Float(value) if value.is_finite() => value.trunc() as i64,
            Cell::Text(text) => text.trim().parse().unwrap_or(0),
            Cell::Bool(value) => i64::from(*value),
            Cell::Float(_) | Cell::Empty => 0,
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Int(value) => Cell::Int(*value),
            Data::Float(value) => Cell::Float(*value),
            Data::String(text) => Cell::Text(text.clone()),
            Data::Bool(value) => Cell::Bool(*value),
            Data::DateTime(value) => Cell::Float(value.as_f64()),
            Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}

/// One data row of a batch request table.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRow {
    /// 1-based row number in the source table.
    pub row: usize,
    pub cells: Vec<Cell>,
}

impl RequestRow {
    pub fn new(row: usize, cells: Vec<Cell>) -> Self {
        Self { row, cells }
    }

    pub fn prefix(&self) -> Option<&Cell> {
        self.cells.first()
    }

    pub fn quantity(&self) -> Option<&Cell> {
        self.cells.get(1)
    }
}

/// Whether the first row of a table is a `prefix, quantity` header.
///
/// Both leading cells must be text, the first containing "prefix" and the
/// second containing "quantity", compared case-insensitively. Anything else
/// is data.
pub fn is_header(cells: &[Cell]) -> bool {
    match (cells.first(), cells.get(1)) {
        (Some(Cell::Text(prefix)), Some(Cell::Text(quantity))) => {
            prefix.to_lowercase().contains("prefix")
                && quantity.to_lowercase().contains("quantity")
        }
        _ => false,
    }
}

/// Numbers raw rows from 1 and drops a leading header row.
///
/// Fails with [`Error::Empty`] when no data rows remain.
pub fn into_requests(rows: Vec<Vec<Cell>>) -> Result<Vec<RequestRow>> {
    let mut numbered = rows
        .into_iter()
        .enumerate()
        .map(|(index, cells)| RequestRow::new(index + 1, cells))
        .peekable();

    if numbered.peek().is_some_and(|first| is_header(&first.cells)) {
        numbered.next();
    }

    let requests: Vec<RequestRow> = numbered.collect();
    if requests.is_empty() {
        return Err(Error::Empty);
    }
    Ok(requests)
}

/// Reads batch requests from a `.csv` file or the first sheet of a workbook.
pub fn read_requests(path: &Path) -> Result<Vec<RequestRow>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let rows = match extension.as_deref() {
        Some("csv") => read_csv(path)?,
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => read_workbook(path)?,
        _ => return Err(Error::UnsupportedInput(path.to_path_buf())),
    };

    debug!(path = %path.display(), rows = rows.len(), "read batch input");
    into_requests(rows)
}

fn input_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Input {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn read_csv(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let file = File::open(path).map_err(|err| input_error(path, err))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| input_error(path, err))?;
        rows.push(record.iter().map(Cell::parse).collect());
    }
    Ok(rows)
}

fn read_workbook(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut workbook = open_workbook_auto(path).map_err(|err| input_error(path, err))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(Error::Empty)?
        .map_err(|err| input_error(path, err))?;

    let Some((first_row, first_col)) = range.start() else {
        return Ok(Vec::new());
    };

    // The range begins at the first used cell; pad back to row 1, column A
    // so row numbers and column positions match the sheet.
    let leading_cols = first_col as usize;
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); first_row as usize];
    rows.extend(range.rows().map(|row| {
        std::iter::repeat(Cell::Empty)
            .take(leading_cols)
            .chain(row.iter().map(Cell::from))
            .collect()
    }));
    Ok(rows)
}
