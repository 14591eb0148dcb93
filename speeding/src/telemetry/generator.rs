use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::record::{Brand, TelemetryRecord};

/// Upper bound (exclusive) of the numeric plate suffix.
pub const PLATE_SUFFIX_LIMIT: u16 = 1_000;

/// Upper bound (exclusive) of the generated speed, in hundredths.
const SPEED_LIMIT_CENTS: u32 = 20_000;

/// Builds synthetic telemetry records from an injected random source.
pub struct RecordGenerator<R> {
    rng: R,
}

impl RecordGenerator<StdRng> {
    /// Generator seeded from the operating system, one per invocation.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RecordGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn next_record(&mut self) -> TelemetryRecord {
        let brand = Brand::ALL[self.rng.gen_range(0..Brand::ALL.len())];
        let plate = self.next_plate();
        // whole hundredths keep the value at two decimals
        let speed = f64::from(self.rng.gen_range(0..SPEED_LIMIT_CENTS)) / 100.0;

        TelemetryRecord::new(brand, plate, speed)
    }

    fn next_plate(&mut self) -> String {
        let first = char::from(b'A' + self.rng.gen_range(0..26u8));
        let second = char::from(b'A' + self.rng.gen_range(0..26u8));
        let suffix = self.rng.gen_range(0..PLATE_SUFFIX_LIMIT);

        format!("{}{}-{}", first, second, suffix)
    }
}

impl<R: Rng> Iterator for RecordGenerator<R> {
    type Item = TelemetryRecord;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_record())
    }
}
