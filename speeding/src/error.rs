use std::io::Error as IoError;
use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The stream rejected or failed a put request
    #[error("Couldn't publish to the stream: {0}")]
    Publish(#[from] aws_sdk_kinesis::Error),

    /// A telemetry record could not be serialized
    #[error("Couldn't encode the record: {0}")]
    Encode(#[from] serde_json::Error),

    /// A record payload was not valid base64
    #[error("Couldn't decode the record payload: {0}")]
    Decode(#[from] base64::DecodeError),

    /// A decoded record payload was not valid UTF-8
    #[error("Record payload is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// Writing to the log sink failed
    #[error("Couldn't write to the sink: {0}")]
    Io(#[from] IoError),

    /// The handler could not be configured
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The global logger was already installed
    #[error("Couldn't install the logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl From<Error> for String {
    fn from(e: Error) -> String {
        e.to_string()
    }
}
