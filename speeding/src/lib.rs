#[macro_use]
extern crate log;

pub mod consumer;
pub mod error;
pub mod logger;
pub mod producer;
pub mod telemetry;

pub use error::Error;

pub const BANNER: &str = r#"
                          _ _
 ___ _ __   ___  ___  __| (_)_ __   __ _
/ __| '_ \ / _ \/ _ \/ _` | | '_ \ / _` |
\__ \ |_) |  __/  __/ (_| | | | | | (_| |
|___/ .__/ \___|\___|\__,_|_|_| |_|\__, |
    |_|                            |___/
"#;
