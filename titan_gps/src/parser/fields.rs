//! Decoders for the individual comma-separated fields.
//!
//! Every decoder returns `Ok(None)` for an empty field: receivers leave fields
//! blank while they have no solution, which is not an error.

use chrono::{NaiveDate, NaiveTime};

use crate::{
    error::DateTimeError,
    nav::{Coordinate, Hemisphere},
};

/// Undecodable field content
#[derive(Debug, PartialEq)]
pub(crate) struct BadField;

impl From<DateTimeError> for BadField {
    fn from(_: DateTimeError) -> Self {
        BadField
    }
}

pub(crate) fn float(field: &str) -> Result<Option<f64>, BadField> {
    if field.is_empty() {
        return Ok(None);
    }
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(BadField),
    }
}

/// Float with an optional trailing unit letter (`545.4M`).
pub(crate) fn float_with_unit(field: &str) -> Result<Option<f64>, BadField> {
    if field.is_empty() {
        return Ok(None);
    }
    let number = field
        .strip_suffix(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(field);
    if !number.bytes().any(|b| b.is_ascii_digit()) {
        return Err(BadField);
    }
    float(number)
}

pub(crate) fn uint<T: core::str::FromStr>(field: &str) -> Result<Option<T>, BadField> {
    if field.is_empty() {
        return Ok(None);
    }
    field.parse::<T>().map(Some).map_err(|_| BadField)
}

/// Decodes `ddmm.mmmm` (or `dddmm.mmmm`) with its hemisphere letter.
///
/// Degrees are the integer hundreds of the value, the remainder is minutes.
/// Both fields have to be present, or both empty.
pub(crate) fn coordinate(
    value: &str,
    hemisphere: &str,
    parse_hemisphere: fn(&str) -> Option<Hemisphere>,
) -> Result<Option<Coordinate>, BadField> {
    if value.is_empty() && hemisphere.is_empty() {
        return Ok(None);
    }
    let raw = float(value)?.ok_or(BadField)?;
    if raw < 0.0 {
        return Err(BadField);
    }
    let hemisphere = parse_hemisphere(hemisphere).ok_or(BadField)?;
    let degrees = (raw / 100.0).trunc();
    let minutes = raw - degrees * 100.0;
    if minutes >= 60.0 {
        return Err(BadField);
    }
    Ok(Some(Coordinate {
        degrees: degrees + minutes / 60.0,
        hemisphere,
    }))
}

pub(crate) fn latitude(value: &str, hemisphere: &str) -> Result<Option<Coordinate>, BadField> {
    coordinate(value, hemisphere, Hemisphere::latitude)
}

pub(crate) fn longitude(value: &str, hemisphere: &str) -> Result<Option<Coordinate>, BadField> {
    coordinate(value, hemisphere, Hemisphere::longitude)
}

/// Decodes `hhmmss[.sss]` into a time of day, keeping milliseconds.
pub(crate) fn time(field: &str) -> Result<Option<NaiveTime>, BadField> {
    if field.is_empty() {
        return Ok(None);
    }
    if field.len() < 6 || !field.is_char_boundary(6) {
        return Err(BadField);
    }
    let (hms, fraction) = field.split_at(6);
    if !hms.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BadField);
    }
    let number = |range: core::ops::Range<usize>| -> u32 {
        hms[range]
            .bytes()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    };
    let millis = if fraction.is_empty() {
        0
    } else {
        let digits = fraction
            .strip_prefix('.')
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or(BadField)?;
        // Sub-millisecond digits are dropped
        digits
            .bytes()
            .chain(core::iter::repeat(b'0'))
            .take(3)
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    };
    NaiveTime::from_hms_milli_opt(number(0..2), number(2..4), number(4..6), millis)
        .ok_or(DateTimeError::InvalidTime)
        .map(Some)
        .map_err(BadField::from)
}

/// Decodes `ddmmyy`, years are taken from the 2000s.
pub(crate) fn date(field: &str) -> Result<Option<NaiveDate>, BadField> {
    if field.is_empty() {
        return Ok(None);
    }
    if field.len() != 6 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BadField);
    }
    let number = |i: usize| -> u32 { field[i..i + 2].parse().unwrap_or(0) };
    NaiveDate::from_ymd_opt(2000 + number(4) as i32, number(2), number(0))
        .ok_or(DateTimeError::InvalidDate)
        .map(Some)
        .map_err(BadField::from)
}
