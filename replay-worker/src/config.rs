use anyhow::anyhow;
use envconfig::Envconfig;

// Re-export so callers only need one config import
pub use common_kafka::config::KafkaConfig;

#[derive(Envconfig, Clone)]
pub struct Config {
    #[envconfig(nested = true)]
    pub kafka: KafkaConfig,

    // Maximum records per published batch
    #[envconfig(default = "1000")]
    pub batch_size: usize,

    #[envconfig(default = "false")]
    pub verbose: bool,
}

impl Config {
    /// A zero batch size would make the accumulator flush never; treat it as
    /// a configuration error before any file is touched.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.batch_size == 0 {
            return Err(anyhow!("BATCH_SIZE must be at least 1"));
        }
        Ok(())
    }
}
