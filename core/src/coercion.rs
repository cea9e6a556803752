//! Conversion of table cell text into typed readings.

use crate::error::ParseError;
use crate::labels::Field;
use crate::logging::Logger;
use chrono::{NaiveDate, NaiveTime};

/// Month codes as printed in the station tables, January first.
const MONTHS: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

/// Parses `DD MON YYYY HH:MM` into POSIX seconds.
///
/// The source publishes naive wall-clock times; they are taken as-is, without
/// applying any timezone offset.
pub fn parse_timestamp(value: &str) -> Result<i64, ParseError> {
    let invalid = || ParseError::InvalidTimestamp {
        value: value.to_string(),
    };

    let tokens: Vec<&str> = value.split_whitespace().collect();
    let [day, month, year, hhmm] = tokens[..] else {
        return Err(invalid());
    };
    let Some((hour, minute)) = hhmm.split_once(':') else {
        return Err(invalid());
    };
    if minute.contains(':') {
        return Err(invalid());
    }

    let month = MONTHS
        .iter()
        .position(|code| *code == month)
        .ok_or_else(|| ParseError::UnknownMonth {
            month: month.to_string(),
        })?;

    let day: u32 = day.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;

    let date = NaiveDate::from_ymd_opt(year, month as u32 + 1, day).ok_or_else(invalid)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)?;
    Ok(date.and_time(time).and_utc().timestamp())
}

/// Parses a finite decimal; `NaN` and infinities are rejected like any other
/// malformed text.
pub fn parse_number(value: &str) -> Result<f64, ParseError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber {
            value: value.to_string(),
        })
}

/// Warns when `value` falls outside the plausible range for `field`.
///
/// Out-of-range values are still kept by the caller; the return value only
/// reports whether the reading was within bounds.
pub fn validate(value: f64, field: Field) -> bool {
    let (min, max) = field.bounds();
    let within = (min..=max).contains(&value);
    if !within {
        Logger::new()
            .field(field.name())
            .value(value)
            .bounds(min, max)
            .warn(
                "measurement.out_of_bounds",
                &format!("{field} value outside expected interval [{min:.0}, {max:.0}]: {value:.2}"),
            );
    }
    within
}
