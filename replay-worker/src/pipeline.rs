use std::path::Path;

use anyhow::Error;
use chrono::NaiveDate;
use tracing::info;

use crate::batch::BatchAccumulator;
use crate::config::Config;
use crate::emit::Emitter;
use crate::parse::RowStream;
use crate::source::discover_files;

/// Replays every matching file under `data_dir` through the emitter. Files
/// are processed strictly one at a time in discovery order, and a fresh
/// accumulator per file means batches never span files.
///
/// Any discovery, decode or submission error aborts the run; batches
/// submitted before the failure stay submitted, there is no rollback.
pub async fn run(
    config: &Config,
    emitter: &dyn Emitter,
    data_dir: &Path,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), Error> {
    for file in discover_files(data_dir, start_date, end_date) {
        let file = file?;
        info!("Processing file: {}", file.display());

        let mut accumulator = BatchAccumulator::new(config.batch_size);
        for row in RowStream::open(&file) {
            let row = row?;
            if let Some(batch) = accumulator.push(row.enrich()) {
                emitter.emit(&batch).await?;
            }
        }
        if let Some(batch) = accumulator.finish() {
            emitter.emit(&batch).await?;
        }

        info!("Ended processing file: {}", file.display());
    }
    Ok(())
}
