use chrono::prelude::*;
use serde::Serialize;

use crate::Error;

/// Vehicle manufacturers a synthetic record can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Brand {
    Honda,
    Ford,
    Toyota,
    Tesla,
    Audi,
    #[serde(rename = "BMW")]
    Bmw,
    Nissan,
    Mazda,
}

impl Brand {
    pub const ALL: [Brand; 8] = [
        Brand::Honda,
        Brand::Ford,
        Brand::Toyota,
        Brand::Tesla,
        Brand::Audi,
        Brand::Bmw,
        Brand::Nissan,
        Brand::Mazda,
    ];

    pub fn to_str(&self) -> &str {
        match self {
            Brand::Honda => "Honda",
            Brand::Ford => "Ford",
            Brand::Toyota => "Toyota",
            Brand::Tesla => "Tesla",
            Brand::Audi => "Audi",
            Brand::Bmw => "BMW",
            Brand::Nissan => "Nissan",
            Brand::Mazda => "Mazda",
        }
    }
}

/// A single speeding observation as published to the stream.
///
/// Field names on the wire are upper case, which is what downstream
/// analytics on the stream already query.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TelemetryRecord {
    /// Represents the point in time in UTC, when the record was created.
    pub event_time: DateTime<Utc>,

    /// Manufacturer of the observed vehicle.
    pub brand: Brand,

    /// Synthetic licence plate, e.g. `KT-481`.
    pub plate: String,

    /// Observed speed, two decimal places at most.
    pub speed: f64,
}

impl TelemetryRecord {
    pub fn new(brand: Brand, plate: String, speed: f64) -> Self {
        TelemetryRecord {
            event_time: Utc::now(),
            brand,
            plate,
            speed,
        }
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}
