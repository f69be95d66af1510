use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct KafkaConfig {
    #[envconfig(default = "localhost")]
    pub kafka_host: String,

    #[envconfig(default = "9092")]
    pub kafka_port: u16,

    #[envconfig(default = "ecomm_events")]
    pub kafka_topic: String,

    #[envconfig(default = "20")]
    pub kafka_producer_linger_ms: u32, // Maximum time between producer batches during low traffic

    #[envconfig(default = "400")]
    pub kafka_producer_queue_mib: u32, // Size of the in-memory producer queue in mebibytes

    #[envconfig(default = "10000000")]
    pub kafka_producer_queue_messages: u32, // Maximum number of messages in the in-memory producer queue

    #[envconfig(default = "20000")]
    pub kafka_message_timeout_ms: u32, // Time before we stop retrying producing a message: 20 seconds

    #[envconfig(default = "none")]
    pub kafka_compression_codec: String, // none, gzip, snappy, lz4, zstd

    #[envconfig(default = "30000")]
    pub kafka_flush_timeout_ms: u32, // Time allowed for draining queued messages on close

    #[envconfig(default = "false")]
    pub kafka_tls: bool,
}

impl KafkaConfig {
    pub fn brokers(&self) -> String {
        format!("{}:{}", self.kafka_host, self.kafka_port)
    }
}
