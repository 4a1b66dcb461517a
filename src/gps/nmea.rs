// src/gps/nmea.rs
//! GPGGA sentence decoding
//!
//! Checksums are not validated: a sentence with a wrong `*hh` suffix is
//! decoded like any other.

use super::coord::{parse_permissive, to_decimal_degrees};
use super::data::{DecodeOutcome, Fix};

/// Marker that identifies a Global Positioning System Fix Data sentence
pub const GGA_MARKER: &str = "$GPGGA";

/// Fewest comma-separated fields a usable GPGGA sentence can have
pub const MIN_GGA_FIELDS: usize = 10;

const LATITUDE: usize = 2;
const LATITUDE_HEMISPHERE: usize = 3;
const LONGITUDE: usize = 4;
const LONGITUDE_HEMISPHERE: usize = 5;
const ALTITUDE: usize = 9;

/// Decode one sentence into a fix.
///
/// Anything that is not a populated GPGGA sentence is `NoFix`, including
/// other sentence types, truncated fragments, and GPGGA sentences with
/// blank position fields (how receivers report "no satellites yet").
pub fn decode(sentence: &str) -> DecodeOutcome {
    if !sentence.contains(GGA_MARKER) {
        return DecodeOutcome::NoFix;
    }

    let fields: Vec<&str> = sentence.split(',').collect();
    parse_gpgga(&fields).into()
}

/// Parse GPGGA (Global Positioning System Fix Data) fields
fn parse_gpgga(fields: &[&str]) -> Option<Fix> {
    if fields.len() < MIN_GGA_FIELDS {
        return None;
    }

    let latitude = fields[LATITUDE];
    let longitude = fields[LONGITUDE];
    let altitude = fields[ALTITUDE];

    if latitude.is_empty() || longitude.is_empty() || altitude.is_empty() {
        return None;
    }

    Some(Fix {
        latitude: to_decimal_degrees(latitude, hemisphere_letter(fields[LATITUDE_HEMISPHERE])),
        longitude: to_decimal_degrees(longitude, hemisphere_letter(fields[LONGITUDE_HEMISPHERE])),
        altitude: parse_permissive(altitude),
    })
}

fn hemisphere_letter(field: &str) -> char {
    field.chars().next().unwrap_or('\0')
}
