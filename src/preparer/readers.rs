//! Row readers for delimited and fixed-width voter files.
//!
//! Values are decoded lossily so files in a state's native single-byte
//! encoding still yield rows.

use crate::config::StateFormat;
use crate::error::Result;
use crate::models::RawRow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

const BOM: char = '\u{feff}';

/// One input row with the 1-based line it started on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedRow {
    pub line: usize,
    pub row: RawRow,
}

pub type RowIter = Box<dyn Iterator<Item = Result<NumberedRow>> + Send>;

/// Rows of a delimited file.
///
/// Column names come from the header row, or from the format's input fields
/// when the file has none. Short rows are padded with empty values and
/// values past the last column are dropped.
pub fn delimited_rows(format: &StateFormat, path: &Path) -> Result<RowIter> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.sep)
        .has_headers(format.has_header)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let columns: Vec<String> = if format.has_header {
        reader
            .byte_headers()?
            .iter()
            .map(|header| String::from_utf8_lossy(header).trim().to_string())
            .collect()
    } else {
        format
            .input_fields
            .unwrap_or_default()
            .iter()
            .map(|field| field.to_string())
            .collect()
    };
    let columns = strip_bom(columns, format.strip_bom);
    debug!("{} columns in {}", columns.len(), path.display());

    let rows = reader.into_byte_records().map(move |record| {
        let record = record?;
        let line = record
            .position()
            .map_or(0, |position| position.line() as usize);
        let row = RawRow::from_pairs(columns.iter().enumerate().map(|(i, column)| {
            let value = record
                .get(i)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default();
            (column.clone(), value)
        }));
        Ok(NumberedRow { line, row })
    });
    Ok(Box::new(rows))
}

/// Rows of a fixed-width file, each value sliced by byte range and trimmed
pub fn fixed_width_rows(
    fields: &'static [&'static str],
    slices: &'static [(usize, usize)],
    path: &Path,
) -> Result<RowIter> {
    let reader = BufReader::new(File::open(path)?);

    let rows = reader
        .split(b'\n')
        .enumerate()
        .filter_map(move |(index, line)| {
            let mut line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if line.iter().all(u8::is_ascii_whitespace) {
                return None;
            }
            Some(Ok(NumberedRow {
                line: index + 1,
                row: slice_line(&line, fields, slices),
            }))
        });
    Ok(Box::new(rows))
}

fn slice_line(line: &[u8], fields: &[&str], slices: &[(usize, usize)]) -> RawRow {
    RawRow::from_pairs(fields.iter().zip(slices).map(|(field, &(start, end))| {
        let value = line
            .get(start.min(line.len())..end.min(line.len()))
            .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
            .unwrap_or_default();
        (*field, value)
    }))
}

fn strip_bom(mut columns: Vec<String>, strip: bool) -> Vec<String> {
    if let Some(first) = columns.first_mut() {
        if strip || first.starts_with(BOM) {
            *first = first.trim_start_matches(BOM).to_string();
        }
    }
    columns
}
