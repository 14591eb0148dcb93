use std::io::{Stdout, Write};

use serde::Deserialize;

use crate::Error;

/// Batch of stream records handed over by the Lambda event source mapping.
#[derive(PartialEq, Deserialize, Debug, Clone)]
pub struct KinesisBatch {
    #[serde(rename = "Records")]
    pub records: Vec<KinesisEventRecord>,
}

#[derive(PartialEq, Deserialize, Debug, Clone)]
pub struct KinesisEventRecord {
    #[serde(rename = "eventID", default)]
    pub event_id: Option<String>,
    pub kinesis: KinesisPayload,
}

#[derive(PartialEq, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct KinesisPayload {
    /// Base64 encoded record data.
    pub data: String,
    #[serde(default)]
    pub partition_key: Option<String>,
    #[serde(default)]
    pub sequence_number: Option<String>,
}

impl KinesisEventRecord {
    /// Decode the payload into text.
    pub fn decode(&self) -> Result<String, Error> {
        let bytes = base64::decode(&self.kinesis.data)?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// Destination for decoded record text, one line per record.
pub trait RecordSink {
    fn write_line(&mut self, line: &str) -> Result<(), Error>;
}

/// Writes each record as one line to an `io::Write`.
pub struct WriteSink<W> {
    out: W,
}

/// Stdout is what the runtime ships to the log service.
pub type StdoutSink = WriteSink<Stdout>;

impl<W: Write> WriteSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl WriteSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> RecordSink for WriteSink<W> {
    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }
}

impl RecordSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        self.push(line.to_owned());
        Ok(())
    }
}

/// Decode every record of the batch in delivery order and write it to `sink`.
///
/// The first record that fails to decode aborts the batch, so the event
/// source retries it as a whole.
pub fn handle<S: RecordSink>(batch: &KinesisBatch, sink: &mut S) -> Result<usize, Error> {
    for record in &batch.records {
        debug!(
            "event: {:?}, key: {:?}, sequence: {:?}",
            record.event_id, record.kinesis.partition_key, record.kinesis.sequence_number
        );

        let text = record.decode().map_err(|e| {
            warn!("Error while decoding record payload: {}", e);
            e
        })?;
        sink.write_line(&text)?;
    }

    Ok(batch.records.len())
}
