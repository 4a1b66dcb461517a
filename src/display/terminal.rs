// src/display/terminal.rs
//! Line-oriented terminal output

use super::FixSink;
use crate::{error::Result, gps::Fix};
use chrono::{DateTime, Utc};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Stdout, Write};

/// Prints one `Coordinates: ...` line per cycle outcome
pub struct TerminalSink<W: Write = Stdout> {
    out: W,
    color: bool,
}

impl TerminalSink<Stdout> {
    pub fn new(color: bool) -> Self {
        Self::with_writer(io::stdout(), color)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn with_writer(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, color: Color, body: String) -> Result<()> {
        if self.color {
            queue!(
                self.out,
                Print("Coordinates: "),
                SetForegroundColor(color),
                Print(body),
                ResetColor,
                Print("\n")
            )?;
        } else {
            queue!(self.out, Print(format!("Coordinates: {}\n", body)))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> FixSink for TerminalSink<W> {
    fn fix(&mut self, fix: &Fix, _received_at: DateTime<Utc>) -> Result<()> {
        self.write_line(Color::Green, fix.to_string())
    }

    fn heartbeat(&mut self) -> Result<()> {
        self.write_line(Color::Yellow, "Connecting...".to_string())
    }
}
