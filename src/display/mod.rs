// src/display/mod.rs
//! Fix sinks for different output formats

pub mod json;
pub mod terminal;

use crate::{error::Result, gps::Fix};
use chrono::{DateTime, Utc};

pub use json::JsonSink;
pub use terminal::TerminalSink;

/// Receives the outcome of each read cycle
pub trait FixSink {
    /// A cycle produced a fix
    fn fix(&mut self, fix: &Fix, received_at: DateTime<Utc>) -> Result<()>;

    /// The link is alive but no fix has been seen for a while
    fn heartbeat(&mut self) -> Result<()>;
}

impl<S: FixSink + ?Sized> FixSink for Box<S> {
    fn fix(&mut self, fix: &Fix, received_at: DateTime<Utc>) -> Result<()> {
        (**self).fix(fix, received_at)
    }

    fn heartbeat(&mut self) -> Result<()> {
        (**self).heartbeat()
    }
}
