use std::time::Duration;

use anyhow::Error;
use async_trait::async_trait;
use common_kafka::config::KafkaConfig;
use common_kafka::kafka_producer::{
    create_kafka_producer, log_delivery_failures, submit_keyed_iter_to_kafka, KafkaContext,
};
use rdkafka::producer::{FutureProducer, Producer};
use rdkafka::util::Timeout;
use tracing::debug;
use uuid::Uuid;

use super::Emitter;
use crate::types::EnrichedRecord;

/// Publishes batches as keyed JSON messages. One producer connection is
/// held for the whole run; delivery is asynchronous and fire-and-forget -
/// `emit` returns once a batch is queued on the producer, and broker-side
/// failures of queued messages are only logged, never retried or surfaced.
pub struct KafkaEmitter {
    producer: FutureProducer<KafkaContext>,
    topic: String,
    flush_timeout: Duration,
}

impl KafkaEmitter {
    pub async fn new(config: &KafkaConfig) -> Result<Self, Error> {
        let producer = create_kafka_producer(config).await?;
        Ok(Self {
            producer,
            topic: config.kafka_topic.clone(),
            flush_timeout: Duration::from_millis(config.kafka_flush_timeout_ms.into()),
        })
    }
}

/// Partitioning key for a record: the session token, or a fresh random id
/// for records without one so they still spread across partitions.
pub fn message_key(record: &EnrichedRecord) -> String {
    if record.record.user_session.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        record.record.user_session.clone()
    }
}

#[async_trait]
impl Emitter for KafkaEmitter {
    async fn emit(&self, batch: &[EnrichedRecord]) -> Result<(), Error> {
        let handles = submit_keyed_iter_to_kafka(
            &self.producer,
            &self.topic,
            |record| message_key(record),
            batch.iter(),
        )?;
        debug!("Queued batch of {} messages", handles.len());
        tokio::spawn(log_delivery_failures(handles));
        Ok(())
    }

    async fn close(&self) -> Result<(), Error> {
        self.producer.flush(Timeout::After(self.flush_timeout))?;
        Ok(())
    }
}
