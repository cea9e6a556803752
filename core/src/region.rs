use crate::measurement::Measurement;
use serde_json::{Map, Value};
use std::fmt;

/// A station and the readings scraped from its table.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub measurements: Vec<Measurement>,
}

impl Region {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            measurements: Vec::new(),
        }
    }

    pub fn with_measurements(name: &str, measurements: Vec<Measurement>) -> Self {
        Self {
            measurements,
            ..Self::new(name)
        }
    }

    /// A single `name -> [measurement, ...]` entry, ready to merge into the
    /// document of all regions.
    pub fn to_map(&self) -> Map<String, Value> {
        let measurements = self
            .measurements
            .iter()
            .map(|measurement| Value::Object(measurement.to_map()))
            .collect();
        Map::from_iter([(self.name.clone(), Value::Array(measurements))])
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region \"{}\": {} measurements",
            self.name,
            self.measurements.len()
        )
    }
}
