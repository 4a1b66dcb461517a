// src/display/json.rs
//! JSON lines output

use super::FixSink;
use crate::{error::Result, gps::Fix};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Stdout, Write};

#[derive(Serialize)]
struct FixRecord<'a> {
    received_at: DateTime<Utc>,
    #[serde(flatten)]
    fix: &'a Fix,
}

#[derive(Serialize)]
struct StatusRecord {
    status: &'static str,
}

/// Writes one JSON object per line
pub struct JsonSink<W: Write = Stdout> {
    out: W,
}

impl JsonSink<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for JsonSink<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> JsonSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_record<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> FixSink for JsonSink<W> {
    fn fix(&mut self, fix: &Fix, received_at: DateTime<Utc>) -> Result<()> {
        self.write_record(&FixRecord { received_at, fix })
    }

    fn heartbeat(&mut self) -> Result<()> {
        self.write_record(&StatusRecord { status: "no_fix" })
    }
}
