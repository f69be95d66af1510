use anyhow::Error;
use async_trait::async_trait;

use crate::types::EnrichedRecord;

pub mod kafka;

/// Sink for flushed batches. The pipeline only ever sees the synchronous
/// submission result; what an implementation does about asynchronous
/// delivery is its own business. Kept narrow on purpose so the
/// fire-and-forget Kafka emitter can later be swapped for an
/// acknowledgment-tracking one without touching the batching logic.
#[async_trait]
pub trait Emitter: Send + Sync {
    async fn emit(&self, batch: &[EnrichedRecord]) -> Result<(), Error>;

    /// Drains anything still queued. Called once at run end, on success and
    /// failure alike.
    async fn close(&self) -> Result<(), Error> {
        Ok(())
    }
}
