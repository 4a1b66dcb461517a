// src/gps/coord.rs
//! Degrees/minutes to decimal degrees conversion

/// Hemisphere letter carried next to an NMEA coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// Sign applied to the decimal value (south and west are negative)
    pub fn sign(self) -> f64 {
        match self {
            Hemisphere::South | Hemisphere::West => -1.0,
            Hemisphere::North | Hemisphere::East => 1.0,
        }
    }
}

/// Convert an NMEA `DDDMM.MMMM` value into signed decimal degrees.
///
/// The degree part is everything above the last two integer digits and the
/// remainder is decimal minutes. Range checks (minutes below 60, degrees
/// within ±90/±180) are left to the receiver. Any letter other than `S` or
/// `W` keeps the result positive.
pub fn to_decimal_degrees(raw: &str, hemisphere: char) -> f64 {
    let value = parse_permissive(raw);

    let whole_degrees = (value / 100.0).trunc();
    let minutes = value - whole_degrees * 100.0;
    let degrees = whole_degrees + minutes / 60.0;

    match Hemisphere::from_letter(hemisphere) {
        Some(h) => degrees * h.sign(),
        None => degrees,
    }
}

/// Permissive decimal parse.
///
/// Reads the longest leading `[+-]digits[.digits][e[+-]digits]` run after
/// optional whitespace and ignores whatever follows, so `"545.4M"` is
/// `545.4` and `"1.5e2"` is `150.0`.
/// Text with no leading number is `0.0`; a malformed field never fails a
/// whole sentence.
pub fn parse_permissive(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        // a bare `e` belongs to the trailing junk
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().unwrap_or(0.0)
}
