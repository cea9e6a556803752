//! Extraction of readings from a station table page.

use crate::coercion::{parse_number, parse_timestamp, validate};
use crate::error::ParseError;
use crate::labels::{Field, map_label};
use crate::measurement::{Measurement, Reading};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

const TABLE: &str = "#tbDadosTelem";
const HEADER_ROW: &str = "#tbDadosTelem tr";
const HEADER_CELL: &str = "th";
const BODY_ROW: &str = "#tbDadosTelem #tbTelemBody > tr";

pub(crate) fn selector(css: &'static str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::InvalidSelector { selector: css })
}

/// Parses every body row of the table, in page order.
pub(crate) fn parse_measurements(html: &str) -> Result<Vec<Measurement>, ParseError> {
    let document = Html::parse_document(html);
    if document.select(&selector(TABLE)?).next().is_none() {
        return Err(ParseError::MissingElement { selector: TABLE });
    }

    let headers = header_labels(&document)?;
    document
        .select(&selector(BODY_ROW)?)
        .map(|row| parse_row(&headers, row))
        .collect()
}

/// Text of the first row carrying `th` cells.
fn header_labels(document: &Html) -> Result<Vec<String>, ParseError> {
    let cell_selector = selector(HEADER_CELL)?;
    document
        .select(&selector(HEADER_ROW)?)
        .map(|row| {
            row.select(&cell_selector)
                .map(|cell| cell.text().collect::<String>())
                .collect::<Vec<_>>()
        })
        .find(|labels| !labels.is_empty())
        .ok_or(ParseError::MissingElement {
            selector: HEADER_ROW,
        })
}

fn parse_row(headers: &[String], row: ElementRef<'_>) -> Result<Measurement, ParseError> {
    let cells = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| cell.value().name() == "td");

    let mut readings = HashMap::new();
    for (header, cell) in headers.iter().zip(cells) {
        let Some(field) = map_label(header) else {
            continue;
        };
        let text: String = cell.text().collect();
        let reading = coerce(field, text.trim())?;
        validate(reading.as_f64(), field);
        readings.insert(field, reading);
    }
    Ok(Measurement::from_readings(&readings))
}

fn coerce(field: Field, text: &str) -> Result<Reading, ParseError> {
    if text.is_empty() {
        return Ok(Reading::zero(field));
    }
    match field {
        Field::Timestamp => parse_timestamp(text).map(Reading::Epoch),
        _ => parse_number(text).map(Reading::Number),
    }
}
