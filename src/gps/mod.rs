// src/gps/mod.rs
//! GPS sentence framing and decoding

pub mod coord;
pub mod data;
pub mod framer;
pub mod nmea;

pub use data::{DecodeOutcome, Fix, Sentence};
