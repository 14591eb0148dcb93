use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use lambda_runtime::{service_fn, LambdaEvent};
use log::{error, info};
use serde_json::Value;

use speeding::logger::{self, Level};
use speeding::producer::{KinesisPublisher, PartitionStrategy, Producer, ProducerConfig};
use speeding::telemetry::RecordGenerator;
use speeding::BANNER;

pub const LOG: &str = "speeding-producer";

const INFO: &str = "
Lambda handler publishing synthetic vehicle speeding telemetry
to a Kinesis stream on every invocation.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PartitionBy {
    /// Every record uses the configured partition key
    Fixed,
    /// Records are keyed by plate
    Plate,
}

#[derive(Debug, Parser)]
#[clap(name = "Speeding producer")]
#[clap(about = INFO, before_help = BANNER, disable_version_flag = true)]
struct ProducerOptions {
    #[clap(
        short,
        long,
        env = "SPEEDING_LOG",
        default_value = "info",
        forbid_empty_values = true,
        help = "The logging level",
        value_enum
    )]
    /// The logging level
    pub log: Level,

    #[clap(
        long = "stream-name",
        env = "streamname",
        forbid_empty_values = true,
        help = "Kinesis stream the records are published to"
    )]
    /// Target stream name
    pub stream_name: String,

    #[clap(
        long = "records",
        env = "SPEEDING_RECORDS",
        default_value = "9",
        help = "Records published per invocation"
    )]
    /// Records published per invocation
    pub records: usize,

    #[clap(
        long = "throttle-ms",
        env = "SPEEDING_THROTTLE_MS",
        default_value = "100",
        help = "Pause before each publish, in milliseconds"
    )]
    /// Pause before each publish
    pub throttle_ms: u64,

    #[clap(
        long = "partition-by",
        env = "SPEEDING_PARTITION_BY",
        default_value = "fixed",
        help = "How records are assigned a partition key",
        value_enum
    )]
    /// Partition strategy
    pub partition_by: PartitionBy,

    #[clap(
        long = "partition-key",
        env = "SPEEDING_PARTITION_KEY",
        default_value = "partitionkey",
        forbid_empty_values = true,
        help = "Partition key used by the fixed strategy"
    )]
    /// Fixed partition key
    pub partition_key: String,
}

impl From<ProducerOptions> for ProducerConfig {
    fn from(o: ProducerOptions) -> Self {
        let partition = match o.partition_by {
            PartitionBy::Fixed => PartitionStrategy::Fixed(o.partition_key),
            PartitionBy::Plate => PartitionStrategy::Plate,
        };

        Self {
            stream_name: o.stream_name,
            records: o.records,
            throttle: Duration::from_millis(o.throttle_ms),
            partition,
        }
    }
}

async fn run(options: ProducerOptions) -> Result<(), lambda_runtime::Error> {
    logger::init(&options.log)?;

    info!("{}", BANNER);
    info!("Starting producer for stream {}...", options.stream_name);

    let publisher = Arc::new(KinesisPublisher::from_env().await);
    let producer = Arc::new(Producer::new(options.into(), publisher)?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let producer = producer.clone();
        async move {
            info!("invocation {}", event.context.request_id);

            let mut generator = RecordGenerator::from_entropy();
            producer.run(&mut generator).await?;

            Ok::<(), lambda_runtime::Error>(())
        }
    }))
    .await
}

#[tokio::main]
async fn main() {
    let options = ProducerOptions::parse();

    if let Err(e) = run(options).await {
        error!(target: LOG, "{}", e);
        std::process::exit(1);
    }
}
