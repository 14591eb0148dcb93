pub mod generator;
pub mod record;

pub use generator::RecordGenerator;
pub use record::{Brand, TelemetryRecord};
