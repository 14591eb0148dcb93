use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::telemetry::{RecordGenerator, TelemetryRecord};
use crate::Error;

pub mod publisher;

pub use publisher::{KinesisPublisher, PutRecord, RecordPublisher};

/// Number of records published per invocation.
pub const DEFAULT_RECORDS: usize = 9;

/// Pause before each publish.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);

/// Partition key used by the fixed strategy.
pub const DEFAULT_PARTITION_KEY: &str = "partitionkey";

/// How records are routed to shards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartitionStrategy {
    /// Every record uses the same key, so everything lands on one shard.
    Fixed(String),
    /// The record's plate is the key.
    Plate,
}

impl PartitionStrategy {
    pub fn key_for(&self, record: &TelemetryRecord) -> String {
        match self {
            PartitionStrategy::Fixed(key) => key.clone(),
            PartitionStrategy::Plate => record.plate.clone(),
        }
    }
}

impl Default for PartitionStrategy {
    fn default() -> Self {
        PartitionStrategy::Fixed(DEFAULT_PARTITION_KEY.to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProducerConfig {
    pub stream_name: String,
    pub records: usize,
    pub throttle: Duration,
    pub partition: PartitionStrategy,
}

impl ProducerConfig {
    pub fn new(stream_name: impl Into<String>) -> Self {
        ProducerConfig {
            stream_name: stream_name.into(),
            records: DEFAULT_RECORDS,
            throttle: DEFAULT_THROTTLE,
            partition: PartitionStrategy::default(),
        }
    }
}

/// Publishes synthetic telemetry to a stream, one invocation at a time.
pub struct Producer {
    config: ProducerConfig,
    publisher: Arc<dyn RecordPublisher + Send + Sync>,
}

impl Producer {
    pub fn new(
        config: ProducerConfig,
        publisher: Arc<dyn RecordPublisher + Send + Sync>,
    ) -> Result<Self, Error> {
        if config.stream_name.trim().is_empty() {
            return Err(Error::Config("stream name must not be empty".to_string()));
        }

        if let PartitionStrategy::Fixed(key) = &config.partition {
            if key.is_empty() {
                return Err(Error::Config("partition key must not be empty".to_string()));
            }
        }

        Ok(Self { config, publisher })
    }

    /// Generate and publish `records` records.
    ///
    /// The first publish failure ends the run and is returned as is; records
    /// already sent stay on the stream.
    pub async fn run<R: Rng + Send>(
        &self,
        generator: &mut RecordGenerator<R>,
    ) -> Result<usize, Error> {
        let mut published = 0;

        for _ in 0..self.config.records {
            let record = generator.next_record();
            let data = record.to_json()?;
            info!("{}", data);

            sleep(self.config.throttle).await;

            let put = PutRecord {
                stream_name: self.config.stream_name.clone(),
                data,
                partition_key: self.config.partition.key_for(&record),
            };
            self.publisher.put_record(put).await?;
            published += 1;
        }

        debug!(
            "published {} records to {}",
            published, self.config.stream_name
        );
        Ok(published)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct Recording {
        puts: Mutex<Vec<PutRecord>>,
        fail_at: Option<usize>,
    }

    #[async_trait]
    impl RecordPublisher for Recording {
        async fn put_record(&self, record: PutRecord) -> Result<(), Error> {
            let mut puts = self.puts.lock().unwrap();
            if Some(puts.len()) == self.fail_at {
                return Err(Error::Config("stream unavailable".to_string()));
            }
            puts.push(record);
            Ok(())
        }
    }

    fn config(stream: &str) -> ProducerConfig {
        ProducerConfig {
            throttle: Duration::from_millis(1),
            ..ProducerConfig::new(stream)
        }
    }

    #[test]
    fn defaults() {
        let config = ProducerConfig::new("vehicle-speed");

        assert_eq!(config.records, 9);
        assert_eq!(config.throttle, Duration::from_millis(100));
        assert_eq!(
            config.partition,
            PartitionStrategy::Fixed("partitionkey".to_string())
        );
    }

    #[test]
    fn rejects_empty_stream_name() {
        let publisher = Arc::new(Recording::default());

        assert!(matches!(
            Producer::new(ProducerConfig::new("  "), publisher),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn rejects_empty_fixed_key() {
        let publisher = Arc::new(Recording::default());
        let config = ProducerConfig {
            partition: PartitionStrategy::Fixed(String::new()),
            ..ProducerConfig::new("vehicle-speed")
        };

        assert!(Producer::new(config, publisher).is_err());
    }

    #[tokio::test]
    async fn publishes_every_record_with_fixed_key() {
        let publisher = Arc::new(Recording::default());
        let producer = Producer::new(config("vehicle-speed"), publisher.clone()).unwrap();

        let published = producer
            .run(&mut RecordGenerator::seeded(3))
            .await
            .unwrap();

        let puts = publisher.puts.lock().unwrap();
        assert_eq!(published, 9);
        assert_eq!(puts.len(), 9);
        for put in puts.iter() {
            assert_eq!(put.stream_name, "vehicle-speed");
            assert_eq!(put.partition_key, "partitionkey");

            let value: serde_json::Value = serde_json::from_str(&put.data).unwrap();
            for field in ["EVENT_TIME", "BRAND", "PLATE", "SPEED"] {
                assert!(value.get(field).is_some(), "missing {}", field);
            }
        }
    }

    #[tokio::test]
    async fn plate_strategy_keys_by_plate() {
        let publisher = Arc::new(Recording::default());
        let config = ProducerConfig {
            partition: PartitionStrategy::Plate,
            ..config("vehicle-speed")
        };
        let producer = Producer::new(config, publisher.clone()).unwrap();

        producer
            .run(&mut RecordGenerator::seeded(11))
            .await
            .unwrap();

        for put in publisher.puts.lock().unwrap().iter() {
            let value: serde_json::Value = serde_json::from_str(&put.data).unwrap();
            assert_eq!(value["PLATE"], put.partition_key.as_str());
        }
    }

    struct Capture(Mutex<Vec<String>>);

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.0.lock().unwrap().push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

    #[tokio::test]
    async fn logs_the_json_it_publishes() {
        // only this test installs a logger in the unit test binary
        log::set_logger(&CAPTURE).ok();
        log::set_max_level(log::LevelFilter::Info);

        let publisher = Arc::new(Recording::default());
        let producer = Producer::new(config("vehicle-speed"), publisher.clone()).unwrap();
        producer
            .run(&mut RecordGenerator::seeded(8))
            .await
            .unwrap();

        let lines = CAPTURE.0.lock().unwrap();
        for put in publisher.puts.lock().unwrap().iter() {
            assert!(lines.contains(&put.data), "{} was not logged", put.data);
        }
    }

    #[tokio::test]
    async fn stops_at_first_failure() {
        let publisher = Arc::new(Recording {
            fail_at: Some(4),
            ..Recording::default()
        });
        let producer = Producer::new(config("vehicle-speed"), publisher.clone()).unwrap();

        let result = producer.run(&mut RecordGenerator::seeded(5)).await;

        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(publisher.puts.lock().unwrap().len(), 4);
    }
}
