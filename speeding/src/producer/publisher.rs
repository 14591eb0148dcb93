use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_kinesis::primitives::Blob;
use aws_sdk_kinesis::Client;

use crate::Error;

/// A single put request against the stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PutRecord {
    pub stream_name: String,
    pub data: String,
    pub partition_key: String,
}

#[async_trait]
pub trait RecordPublisher {
    async fn put_record(&self, record: PutRecord) -> Result<(), Error>;
}

pub struct KinesisPublisher {
    pub inner: Client,
}

impl KinesisPublisher {
    pub fn new(client: Client) -> Self {
        Self { inner: client }
    }

    /// Build a client from the shared AWS config.
    ///
    /// Region and credentials come from the hosting environment.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl RecordPublisher for KinesisPublisher {
    async fn put_record(&self, record: PutRecord) -> Result<(), Error> {
        let output = self
            .inner
            .put_record()
            .stream_name(record.stream_name)
            .data(Blob::new(record.data.into_bytes()))
            .partition_key(record.partition_key)
            .send()
            .await
            .map_err(|e| {
                warn!("Kinesis error: {}", e);
                aws_sdk_kinesis::Error::from(e)
            })?;

        debug!(
            "shard: {:?}, sequence: {:?}",
            output.shard_id(),
            output.sequence_number()
        );

        Ok(())
    }
}
