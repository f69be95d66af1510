use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity;

/// One row of the source dataset, as decoded from a parquet file. Fields are
/// taken at face value; nothing beyond type decoding is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub event_time: DateTime<Utc>,
    pub event_type: String,
    pub product_id: i64,
    pub category_id: String,
    pub category_code: String,
    pub brand: String,
    // Kept opaque - the dataset stores prices as strings and we never do
    // arithmetic on them.
    pub price: String,
    pub user_id: i64,
    pub user_session: String,
}

/// A RawRecord plus its stable row identity. This is the unit that gets
/// serialized onto the wire; `row_id` rides along in the payload but is not
/// the partitioning key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: RawRecord,
    pub row_id: Uuid,
}

/// A decoded row tagged with where it came from.
#[derive(Debug, Clone)]
pub struct SourcedRow {
    pub record: RawRecord,
    pub file: PathBuf,
    pub row_index: usize,
}

impl SourcedRow {
    pub fn enrich(self) -> EnrichedRecord {
        let row_id = identity::row_id(&self.file, self.row_index);
        EnrichedRecord {
            record: self.record,
            row_id,
        }
    }
}
