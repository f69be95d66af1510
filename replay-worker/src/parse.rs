use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parquet::file::reader::FileReader;
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::{Field, Row};
use thiserror::Error;

use crate::types::{RawRecord, SourcedRow};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },
    #[error("{path} row {row}, column {column}: {message}")]
    Column {
        path: PathBuf,
        row: usize,
        column: String,
        message: String,
    },
}

/// Streams the rows of one parquet file, each tagged with the file path and
/// its zero-based row index.
///
/// The whole file is decoded into memory before the first row is yielded,
/// which caps the supportable file size at available memory. A decode
/// failure surfaces as the stream's single (and final) element; there is no
/// skip-and-continue for corrupt files.
pub struct RowStream {
    file: PathBuf,
    rows: std::vec::IntoIter<RawRecord>,
    next_index: usize,
    error: Option<ParseError>,
}

impl RowStream {
    pub fn open(path: &Path) -> Self {
        match read_file(path) {
            Ok(rows) => Self {
                file: path.to_path_buf(),
                rows: rows.into_iter(),
                next_index: 0,
                error: None,
            },
            Err(e) => Self {
                file: path.to_path_buf(),
                rows: Vec::new().into_iter(),
                next_index: 0,
                error: Some(e),
            },
        }
    }
}

impl Iterator for RowStream {
    type Item = Result<SourcedRow, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.error.take() {
            return Some(Err(e));
        }
        let record = self.rows.next()?;
        let row_index = self.next_index;
        self.next_index += 1;
        Some(Ok(SourcedRow {
            record,
            file: self.file.clone(),
            row_index,
        }))
    }
}

fn read_file(path: &Path) -> Result<Vec<RawRecord>, ParseError> {
    let file = File::open(path).map_err(|e| ParseError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    let parquet_err = |e| ParseError::Parquet {
        path: path.to_path_buf(),
        source: e,
    };
    let reader = SerializedFileReader::new(file).map_err(parquet_err)?;

    let mut records = Vec::new();
    for (row_index, row) in reader.get_row_iter(None).map_err(parquet_err)?.enumerate() {
        let row = row.map_err(parquet_err)?;
        records.push(convert_row(path, row_index, &row)?);
    }
    Ok(records)
}

fn convert_row(path: &Path, row_index: usize, row: &Row) -> Result<RawRecord, ParseError> {
    let mut fields: HashMap<&str, &Field> = HashMap::new();
    for (name, field) in row.get_column_iter() {
        fields.insert(name.as_str(), field);
    }

    Ok(RawRecord {
        event_time: timestamp_column(path, row_index, &fields, "event_time")?,
        event_type: string_column(path, row_index, &fields, "event_type")?,
        product_id: int_column(path, row_index, &fields, "product_id")?,
        category_id: string_column(path, row_index, &fields, "category_id")?,
        category_code: string_column(path, row_index, &fields, "category_code")?,
        brand: string_column(path, row_index, &fields, "brand")?,
        price: string_column(path, row_index, &fields, "price")?,
        user_id: int_column(path, row_index, &fields, "user_id")?,
        user_session: string_column(path, row_index, &fields, "user_session")?,
    })
}

fn lookup<'a>(
    path: &Path,
    row: usize,
    fields: &HashMap<&str, &'a Field>,
    column: &str,
) -> Result<&'a Field, ParseError> {
    fields
        .get(column)
        .copied()
        .ok_or_else(|| ParseError::Column {
            path: path.to_path_buf(),
            row,
            column: column.to_string(),
            message: "missing column".to_string(),
        })
}

fn column_error(path: &Path, row: usize, column: &str, message: &str) -> ParseError {
    ParseError::Column {
        path: path.to_path_buf(),
        row,
        column: column.to_string(),
        message: message.to_string(),
    }
}

// Nulls in optional columns decode to the field's zero value, same as the
// rest of the dataset tooling treats them.
fn string_column(
    path: &Path,
    row: usize,
    fields: &HashMap<&str, &Field>,
    column: &str,
) -> Result<String, ParseError> {
    match lookup(path, row, fields, column)? {
        Field::Str(s) => Ok(s.clone()),
        Field::Null => Ok(String::new()),
        other => Err(column_error(
            path,
            row,
            column,
            &format!("expected string, got {other}"),
        )),
    }
}

fn int_column(
    path: &Path,
    row: usize,
    fields: &HashMap<&str, &Field>,
    column: &str,
) -> Result<i64, ParseError> {
    match lookup(path, row, fields, column)? {
        Field::Byte(v) => Ok(i64::from(*v)),
        Field::Short(v) => Ok(i64::from(*v)),
        Field::Int(v) => Ok(i64::from(*v)),
        Field::Long(v) => Ok(*v),
        Field::UByte(v) => Ok(i64::from(*v)),
        Field::UShort(v) => Ok(i64::from(*v)),
        Field::UInt(v) => Ok(i64::from(*v)),
        Field::Null => Ok(0),
        other => Err(column_error(
            path,
            row,
            column,
            &format!("expected integer, got {other}"),
        )),
    }
}

fn timestamp_column(
    path: &Path,
    row: usize,
    fields: &HashMap<&str, &Field>,
    column: &str,
) -> Result<DateTime<Utc>, ParseError> {
    match lookup(path, row, fields, column)? {
        Field::TimestampMillis(v) => DateTime::from_timestamp_millis(*v)
            .ok_or_else(|| column_error(path, row, column, "timestamp out of range")),
        Field::TimestampMicros(v) => DateTime::from_timestamp_micros(*v)
            .ok_or_else(|| column_error(path, row, column, "timestamp out of range")),
        Field::Null => Ok(DateTime::UNIX_EPOCH),
        other => Err(column_error(
            path,
            row,
            column,
            &format!("expected timestamp, got {other}"),
        )),
    }
}
