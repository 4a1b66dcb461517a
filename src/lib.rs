// src/lib.rs
//! NMEA Fix Library
//! 
//! Reassembles NMEA-0183 sentences from a GNSS byte stream and decodes
//! `$GPGGA` sentences into latitude, longitude and altitude.

pub mod gps;
pub mod source;
pub mod display;
pub mod monitor;
pub mod config;
pub mod error;

// Re-export main types for convenience
pub use gps::data::{DecodeOutcome, Fix, Sentence};
pub use gps::framer::SentenceFramer;
pub use monitor::{FixReader, PollSettings};
pub use error::{Result, GpsError};
