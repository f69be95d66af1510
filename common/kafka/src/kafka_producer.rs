use crate::config::KafkaConfig;

use rdkafka::error::KafkaError;
use rdkafka::producer::{DeliveryFuture, FutureProducer, FutureRecord, Producer};
use rdkafka::ClientConfig;
use serde::Serialize;
use serde_json::error::Error as SerdeError;
use thiserror::Error;
use tracing::{debug, error, info};

pub struct KafkaContext;

impl rdkafka::ClientContext for KafkaContext {
    fn stats(&self, stats: rdkafka::Statistics) {
        debug!(
            "rdkafka stats: {} messages waiting in producer queue",
            stats.msg_cnt
        );
    }
}

pub async fn create_kafka_producer(
    config: &KafkaConfig,
) -> Result<FutureProducer<KafkaContext>, KafkaError> {
    let mut client_config = ClientConfig::new();
    client_config
        .set("bootstrap.servers", config.brokers())
        .set("statistics.interval.ms", "10000")
        .set("linger.ms", config.kafka_producer_linger_ms.to_string())
        .set(
            "message.timeout.ms",
            config.kafka_message_timeout_ms.to_string(),
        )
        .set(
            "compression.codec",
            config.kafka_compression_codec.to_owned(),
        )
        .set(
            "queue.buffering.max.kbytes",
            (config.kafka_producer_queue_mib * 1024).to_string(),
        )
        .set(
            "queue.buffering.max.messages",
            config.kafka_producer_queue_messages.to_string(),
        );

    if config.kafka_tls {
        client_config
            .set("security.protocol", "ssl")
            .set("enable.ssl.certificate.verification", "false");
    };

    debug!("rdkafka configuration: {:?}", client_config);
    let producer: FutureProducer<KafkaContext> =
        client_config.create_with_context(KafkaContext)?;

    // "Ping" the Kafka brokers by requesting metadata
    match producer
        .client()
        .fetch_metadata(None, std::time::Duration::from_secs(15))
    {
        Ok(metadata) => {
            info!(
                "Connected producer to {}, topic={}. Found {} topics on the broker.",
                config.brokers(),
                config.kafka_topic,
                metadata.topics().len()
            );
        }
        Err(error) => {
            error!("Failed to fetch metadata from Kafka brokers: {:?}", error);
            return Err(error);
        }
    }

    Ok(producer)
}

#[derive(Error, Debug)]
pub enum KafkaProduceError {
    #[error("failed to serialize: {error}")]
    SerializationError { error: SerdeError },
    #[error("failed to produce to kafka: {error}")]
    KafkaProduceError { error: KafkaError },
}

/// Serializes each item to JSON and enqueues it on the producer's internal
/// queue. Returns once every message of the batch is queued, not once it is
/// acknowledged; the returned delivery futures resolve out of band as the
/// broker accepts or rejects each message. A serialization error or an
/// outright enqueue rejection fails the whole submission.
pub fn submit_keyed_iter_to_kafka<T>(
    kafka_producer: &FutureProducer<KafkaContext>,
    topic: &str,
    key_extractor: impl Fn(&T) -> String,
    iter: impl IntoIterator<Item = T>,
) -> Result<Vec<DeliveryFuture>, KafkaProduceError>
where
    T: Serialize,
{
    let mut handles = Vec::new();

    for item in iter {
        let key = key_extractor(&item);
        let payload = serde_json::to_string(&item)
            .map_err(|e| KafkaProduceError::SerializationError { error: e })?;

        let record = FutureRecord {
            topic,
            key: Some(key.as_str()),
            payload: Some(&payload),
            timestamp: None,
            partition: None,
            headers: None,
        };

        match kafka_producer.send_result(record) {
            Ok(handle) => handles.push(handle),
            Err((e, _)) => return Err(KafkaProduceError::KafkaProduceError { error: e }),
        }
    }

    Ok(handles)
}

/// Awaits a batch's delivery futures and logs any broker-side failures.
/// Failures are not retried and are never surfaced to the submitting caller.
pub async fn log_delivery_failures(handles: Vec<DeliveryFuture>) {
    let total = handles.len();
    let mut failed = 0usize;

    for handle in handles {
        match handle.await {
            Ok(Ok(_)) => (),
            Ok(Err((error, _message))) => {
                failed += 1;
                error!("Failed to deliver message: {:?}", error);
            }
            Err(_) => {
                failed += 1;
                error!("Delivery result dropped before completion");
            }
        }
    }

    if failed > 0 {
        error!("Failed to deliver {} of {} messages in batch", failed, total);
    }
}
