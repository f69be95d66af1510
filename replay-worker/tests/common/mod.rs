use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use parquet::data_type::{ByteArray, ByteArrayType, Int64Type};
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::parser::parse_message_type;

const EVENTS_SCHEMA: &str = r#"
message schema {
  REQUIRED INT64 event_time (TIMESTAMP(MILLIS,true));
  REQUIRED BINARY event_type (UTF8);
  REQUIRED INT64 product_id;
  REQUIRED BINARY category_id (UTF8);
  REQUIRED BINARY category_code (UTF8);
  OPTIONAL BINARY brand (UTF8);
  REQUIRED BINARY price (UTF8);
  REQUIRED INT64 user_id;
  REQUIRED BINARY user_session (UTF8);
}
"#;

/// Writes an events parquet file with `row_count` deterministic rows.
/// `product_id` is the row index and `user_session` is prefixed with the
/// file stem, so tests can tell rows (and their source file) apart. Brand is
/// null on every other row to cover optional-column decoding.
pub fn write_events_parquet(path: &Path, row_count: usize) {
    let stem = path.file_stem().unwrap().to_string_lossy().to_string();

    let event_times: Vec<i64> = (0..row_count)
        .map(|i| 1_609_459_200_000 + i as i64 * 1000)
        .collect();
    let event_types: Vec<ByteArray> = (0..row_count).map(|_| ByteArray::from("view")).collect();
    let product_ids: Vec<i64> = (0..row_count as i64).collect();
    let category_ids: Vec<ByteArray> = (0..row_count)
        .map(|_| ByteArray::from("2103807459595387724"))
        .collect();
    let category_codes: Vec<ByteArray> = (0..row_count)
        .map(|_| ByteArray::from("electronics.smartphone"))
        .collect();
    let brand_def_levels: Vec<i16> = (0..row_count).map(|i| (i % 2 == 0) as i16).collect();
    let brands: Vec<ByteArray> = (0..row_count)
        .filter(|i| i % 2 == 0)
        .map(|_| ByteArray::from("samsung"))
        .collect();
    let prices: Vec<ByteArray> = (0..row_count).map(|_| ByteArray::from("489.07")).collect();
    let user_ids: Vec<i64> = (0..row_count).map(|i| 500_000_000 + i as i64).collect();
    let user_sessions: Vec<ByteArray> = (0..row_count)
        .map(|i| ByteArray::from(format!("{stem}-sess-{i}").as_str()))
        .collect();

    let schema = Arc::new(parse_message_type(EVENTS_SCHEMA).unwrap());
    let props = Arc::new(WriterProperties::builder().build());
    let file = File::create(path).unwrap();
    let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();
    let mut row_group = writer.next_row_group().unwrap();

    let mut col = row_group.next_column().unwrap().unwrap();
    col.typed::<Int64Type>()
        .write_batch(&event_times, None, None)
        .unwrap();
    col.close().unwrap();

    let mut col = row_group.next_column().unwrap().unwrap();
    col.typed::<ByteArrayType>()
        .write_batch(&event_types, None, None)
        .unwrap();
    col.close().unwrap();

    let mut col = row_group.next_column().unwrap().unwrap();
    col.typed::<Int64Type>()
        .write_batch(&product_ids, None, None)
        .unwrap();
    col.close().unwrap();

    let mut col = row_group.next_column().unwrap().unwrap();
    col.typed::<ByteArrayType>()
        .write_batch(&category_ids, None, None)
        .unwrap();
    col.close().unwrap();

    let mut col = row_group.next_column().unwrap().unwrap();
    col.typed::<ByteArrayType>()
        .write_batch(&category_codes, None, None)
        .unwrap();
    col.close().unwrap();

    let mut col = row_group.next_column().unwrap().unwrap();
    col.typed::<ByteArrayType>()
        .write_batch(&brands, Some(&brand_def_levels), None)
        .unwrap();
    col.close().unwrap();

    let mut col = row_group.next_column().unwrap().unwrap();
    col.typed::<ByteArrayType>()
        .write_batch(&prices, None, None)
        .unwrap();
    col.close().unwrap();

    let mut col = row_group.next_column().unwrap().unwrap();
    col.typed::<Int64Type>()
        .write_batch(&user_ids, None, None)
        .unwrap();
    col.close().unwrap();

    let mut col = row_group.next_column().unwrap().unwrap();
    col.typed::<ByteArrayType>()
        .write_batch(&user_sessions, None, None)
        .unwrap();
    col.close().unwrap();

    row_group.close().unwrap();
    writer.close().unwrap();
}
