// src/gps/data.rs
//! Fix data structures

use serde::Serialize;
use std::fmt;

/// One finalized NMEA sentence, terminator and carriage returns stripped
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentence(String);

impl Sentence {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Sentence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A decoded position fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fix {
    pub latitude: f64,  // signed decimal degrees, south negative
    pub longitude: f64, // signed decimal degrees, west negative
    pub altitude: f64,  // meters above mean sea level
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} (latitude), {:.6} (longitude), {:.1} (altitude)",
            self.latitude, self.longitude, self.altitude
        )
    }
}

/// Result of decoding one sentence or one read cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecodeOutcome {
    Fix(Fix),
    /// No usable position sentence was observed
    NoFix,
}

impl DecodeOutcome {
    pub fn is_fix(&self) -> bool {
        matches!(self, DecodeOutcome::Fix(_))
    }

    pub fn fix(&self) -> Option<&Fix> {
        match self {
            DecodeOutcome::Fix(fix) => Some(fix),
            DecodeOutcome::NoFix => None,
        }
    }
}

impl From<Option<Fix>> for DecodeOutcome {
    fn from(fix: Option<Fix>) -> Self {
        fix.map_or(DecodeOutcome::NoFix, DecodeOutcome::Fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_display_precision() {
        let fix = Fix {
            latitude: 48.1173,
            longitude: -11.516666666,
            altitude: 545.44,
        };
        assert_eq!(
            fix.to_string(),
            "48.117300 (latitude), -11.516667 (longitude), 545.4 (altitude)"
        );
    }

    #[test]
    fn test_outcome_from_option() {
        assert_eq!(DecodeOutcome::from(None), DecodeOutcome::NoFix);

        let fix = Fix { latitude: 1.0, longitude: 2.0, altitude: 3.0 };
        let outcome = DecodeOutcome::from(Some(fix));
        assert!(outcome.is_fix());
        assert_eq!(outcome.fix(), Some(&fix));
    }
}
