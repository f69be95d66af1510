use std::path::PathBuf;

use anyhow::{anyhow, Error};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::Config;
use crate::emit::kafka::KafkaEmitter;
use crate::emit::Emitter;
use crate::pipeline;

#[derive(Parser)]
#[command(version, about = "Replays historical e-commerce events from parquet files into Kafka", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load events from a directory of dated parquet files into Kafka
    Load {
        /// Directory with parquet files
        #[arg(short = 'd', long)]
        data_dir: PathBuf,

        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },
    /// Print the resolved broker address, topic and batch size
    PrintConfig,
}

pub async fn run(cli: Cli, config: Config) -> Result<(), Error> {
    match cli.command {
        Commands::Load {
            data_dir,
            start_date,
            end_date,
        } => {
            if start_date.is_none() && end_date.is_some() {
                return Err(anyhow!("--end-date requires --start-date"));
            }

            let emitter = KafkaEmitter::new(&config.kafka).await?;
            let result = pipeline::run(&config, &emitter, &data_dir, start_date, end_date).await;
            // Flush queued messages on every exit path before reporting
            let close_result = emitter.close().await;
            result.and(close_result)
        }
        Commands::PrintConfig => {
            info!(
                "Current config: {}@{}, batch_size={}",
                config.kafka.brokers(),
                config.kafka.kafka_topic,
                config.batch_size
            );
            Ok(())
        }
    }
}
