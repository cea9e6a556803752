use crate::labels::Field;
use chrono::DateTime;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

/// A coerced table cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Epoch(i64),
    Number(f64),
}

impl Reading {
    /// The value an empty cell stands for.
    pub fn zero(field: Field) -> Self {
        match field {
            Field::Timestamp => Reading::Epoch(0),
            _ => Reading::Number(0.0),
        }
    }

    /// Whole seconds. A `Number` only reaches the timestamp when a caller
    /// builds readings by hand; its fractional part is dropped.
    pub fn as_epoch(self) -> i64 {
        match self {
            Reading::Epoch(seconds) => seconds,
            Reading::Number(value) => value.trunc() as i64,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Reading::Epoch(seconds) => seconds as f64,
            Reading::Number(value) => value,
        }
    }
}

/// One row of a station table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    pub timestamp: i64,
    pub rain: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

impl Measurement {
    /// Builds a measurement from whatever fields a row provided; the rest stay 0.
    pub fn from_readings(readings: &HashMap<Field, Reading>) -> Self {
        let number = |field: Field| readings.get(&field).map_or(0.0, |reading| reading.as_f64());
        let timestamp = readings
            .get(&Field::Timestamp)
            .map_or(0, |reading| reading.as_epoch());

        Self {
            timestamp,
            rain: number(Field::Rain),
            wind_speed: number(Field::WindSpeed),
            wind_direction: number(Field::WindDirection),
            temperature: number(Field::Temperature),
            humidity: number(Field::Humidity),
            pressure: number(Field::Pressure),
        }
    }

    pub fn get(&self, field: Field) -> Reading {
        match field {
            Field::Timestamp => Reading::Epoch(self.timestamp),
            Field::Rain => Reading::Number(self.rain),
            Field::WindSpeed => Reading::Number(self.wind_speed),
            Field::WindDirection => Reading::Number(self.wind_direction),
            Field::Temperature => Reading::Number(self.temperature),
            Field::Humidity => Reading::Number(self.humidity),
            Field::Pressure => Reading::Number(self.pressure),
        }
    }

    /// Field name to value pairs. The map orders its keys, so the JSON
    /// encoding is independent of how the measurement was built.
    pub fn to_map(&self) -> Map<String, Value> {
        Field::ALL
            .into_iter()
            .map(|field| {
                let value = match self.get(field) {
                    Reading::Epoch(seconds) => Value::from(seconds),
                    Reading::Number(number) => Value::from(number),
                };
                (field.name().to_string(), value)
            })
            .collect()
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp(self.timestamp, 0) {
            Some(datetime) => write!(f, "{}", datetime.naive_utc())?,
            None => write!(f, "{}", self.timestamp)?,
        }
        write!(
            f,
            "\tRain: {:5.2}mm\tWind speed: {:5.2}m/s\tWind direction: {:5.2}º\tTemperature: {:5.2}ºC\tHumidity: {:5.2}%\tPressure: {:5.2}mbar",
            self.rain,
            self.wind_speed,
            self.wind_direction,
            self.temperature,
            self.humidity,
            self.pressure
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled_readings() -> HashMap<Field, Reading> {
        HashMap::from([
            (Field::Timestamp, Reading::Epoch(5)),
            (Field::Rain, Reading::Number(3.33)),
            (Field::Pressure, Reading::Number(2.22)),
            (Field::WindDirection, Reading::Number(6.66)),
            (Field::Humidity, Reading::Number(1.11)),
            (Field::Temperature, Reading::Number(4.44)),
            (Field::WindSpeed, Reading::Number(7.77)),
        ])
    }

    #[test]
    fn from_readings_defaults_missing_fields_to_zero() {
        let measurement = Measurement::from_readings(&HashMap::from([(
            Field::Rain,
            Reading::Number(1.5),
        )]));
        assert_eq!(
            measurement,
            Measurement {
                rain: 1.5,
                ..Measurement::default()
            }
        );

        let map = Measurement::from_readings(&HashMap::new()).to_map();
        assert_eq!(map.len(), 7);
        assert!(map.values().all(|value| value.as_f64() == Some(0.0)));
    }

    #[test]
    fn timestamp_reading_converts_to_whole_seconds() {
        assert_eq!(Reading::Epoch(1_545_129_000).as_epoch(), 1_545_129_000);
        assert_eq!(Reading::Number(5.55).as_epoch(), 5);
        assert_eq!(Reading::zero(Field::Timestamp).as_epoch(), 0);

        let measurement = Measurement::from_readings(&HashMap::from([(
            Field::Timestamp,
            Reading::Number(1_545_129_000.9),
        )]));
        assert_eq!(measurement.timestamp, 1_545_129_000);
    }

    #[test]
    fn to_map_emits_sorted_keys() {
        let measurement = Measurement::from_readings(&shuffled_readings());
        let json = serde_json::to_string_pretty(&measurement.to_map()).unwrap();
        let expected = r#"{
  "humidity": 1.11,
  "pressure": 2.22,
  "rain": 3.33,
  "temperature": 4.44,
  "timestamp": 5,
  "wind_direction": 6.66,
  "wind_speed": 7.77
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn identical_measurements_serialize_identically() {
        let first = Measurement::from_readings(&shuffled_readings());
        let second = Measurement::from_readings(&HashMap::from([
            (Field::WindSpeed, Reading::Number(7.77)),
            (Field::Humidity, Reading::Number(1.11)),
            (Field::Temperature, Reading::Number(4.44)),
            (Field::Timestamp, Reading::Epoch(5)),
            (Field::WindDirection, Reading::Number(6.66)),
            (Field::Pressure, Reading::Number(2.22)),
            (Field::Rain, Reading::Number(3.33)),
        ]));
        assert_eq!(
            serde_json::to_string(&first.to_map()).unwrap(),
            serde_json::to_string(&second.to_map()).unwrap()
        );
    }

    #[test]
    fn display_renders_readable_line() {
        let measurement = Measurement {
            timestamp: 1_545_129_000,
            rain: 0.2,
            wind_speed: 1.5,
            wind_direction: 180.0,
            temperature: 24.3,
            humidity: 65.0,
            pressure: 925.1,
        };
        assert_eq!(
            measurement.to_string(),
            "2018-12-18 10:30:00\tRain:  0.20mm\tWind speed:  1.50m/s\tWind direction: 180.00º\tTemperature: 24.30ºC\tHumidity: 65.00%\tPressure: 925.10mbar"
        );
    }
}
