// src/monitor.rs
//! Polling cycle tying a byte source, the framer and a fix sink together

use crate::{
    display::FixSink,
    error::Result,
    gps::{framer::SentenceFramer, nmea, DecodeOutcome},
    source::ByteSource,
};
use chrono::Utc;
use log::{debug, info, trace};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

/// Timing and cadence of the read loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    /// Largest chunk requested from the source per cycle
    pub read_chunk: usize,
    pub read_timeout: Duration,
    /// Pause between cycles
    pub poll_interval: Duration,
    /// Consecutive no-fix cycles between heartbeats
    pub heartbeat_every: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            read_chunk: 127,
            read_timeout: Duration::from_millis(100),
            poll_interval: Duration::from_millis(1000),
            heartbeat_every: 10,
        }
    }
}

/// Reads fixes from a single GNSS stream.
///
/// The reader is the only owner of the framer, so partial sentences carry
/// over between cycles without locking.
pub struct FixReader<S, K> {
    source: S,
    sink: K,
    framer: SentenceFramer,
    settings: PollSettings,
    chunk: Vec<u8>,
    misses: u32,
    running: Arc<AtomicBool>,
}

impl<S: ByteSource, K: FixSink> FixReader<S, K> {
    pub fn new(source: S, sink: K, settings: PollSettings) -> Self {
        let chunk = vec![0; settings.read_chunk.max(1)];
        Self {
            source,
            sink,
            framer: SentenceFramer::new(),
            settings,
            chunk,
            misses: 0,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Run one cycle: a single bounded read, then frame, decode and report.
    ///
    /// Every byte of the chunk is framed; when several fixes complete in one
    /// cycle the last one is reported.
    pub async fn poll_once(&mut self) -> Result<DecodeOutcome> {
        let read = self
            .source
            .read(&mut self.chunk, self.settings.read_timeout)
            .await?;
        trace!("Read {} bytes", read);

        let mut outcome = DecodeOutcome::NoFix;
        for sentence in self.framer.feed(&self.chunk[..read]) {
            match nmea::decode(sentence.as_str()) {
                DecodeOutcome::Fix(fix) => {
                    debug!("Fix from {}", sentence);
                    outcome = DecodeOutcome::Fix(fix);
                }
                DecodeOutcome::NoFix => trace!("Skipped sentence {:?}", sentence.as_str()),
            }
        }

        self.report(&outcome)?;
        Ok(outcome)
    }

    fn report(&mut self, outcome: &DecodeOutcome) -> Result<()> {
        match outcome {
            DecodeOutcome::Fix(fix) => {
                self.misses = 0;
                self.sink.fix(fix, Utc::now())
            }
            DecodeOutcome::NoFix => {
                self.misses = self.misses.wrapping_add(1);
                if self.settings.heartbeat_every > 0 && self.misses % self.settings.heartbeat_every == 0 {
                    debug!("No fix for {} cycles", self.misses);
                    self.sink.heartbeat()?;
                }
                Ok(())
            }
        }
    }

    /// Poll until stopped or the source runs dry
    pub async fn run(&mut self) -> Result<()> {
        info!("Waiting for GPGGA fixes");

        while self.is_running() {
            self.poll_once().await?;

            if self.source.is_exhausted() {
                info!("Source exhausted, stopping");
                break;
            }

            tokio::time::sleep(self.settings.poll_interval).await;
        }

        Ok(())
    }

    /// Stop the loop after the current cycle
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Shared flag; storing `false` stops [`FixReader::run`]
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Consecutive cycles without a fix
    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::Fix;
    use chrono::{DateTime, Utc};
    use std::collections::VecDeque;

    const GPGGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
    const NO_SATS: &str = "$GPGGA,000000.00,,,,,0,00,99.99,,,,,,*66\r\n";

    /// Hands out pre-recorded chunks, one per read
    struct ScriptedSource {
        chunks: VecDeque<Vec<u8>>,
    }

    impl ScriptedSource {
        fn new(chunks: &[&[u8]]) -> Self {
            Self {
                chunks: chunks.iter().map(|c| c.to_vec()).collect(),
            }
        }
    }

    impl ByteSource for ScriptedSource {
        async fn read(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<usize> {
            let Some(mut chunk) = self.chunks.pop_front() else {
                return Ok(0);
            };
            let n = chunk.len().min(buf.len());
            buf[..n].copy_from_slice(&chunk[..n]);
            if n < chunk.len() {
                self.chunks.push_front(chunk.split_off(n));
            }
            Ok(n)
        }

        fn is_exhausted(&self) -> bool {
            self.chunks.is_empty()
        }
    }

    #[derive(Debug, PartialEq)]
    enum Event {
        Fix(Fix),
        Heartbeat,
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<Event>,
    }

    impl FixSink for RecordingSink {
        fn fix(&mut self, fix: &Fix, _received_at: DateTime<Utc>) -> Result<()> {
            self.events.push(Event::Fix(*fix));
            Ok(())
        }

        fn heartbeat(&mut self) -> Result<()> {
            self.events.push(Event::Heartbeat);
            Ok(())
        }
    }

    fn fast_settings(heartbeat_every: u32) -> PollSettings {
        PollSettings {
            poll_interval: Duration::from_millis(1),
            heartbeat_every,
            ..PollSettings::default()
        }
    }

    #[tokio::test]
    async fn test_fix_split_across_cycles() {
        let (head, tail) = GPGGA.as_bytes().split_at(30);
        let source = ScriptedSource::new(&[head, tail]);
        let mut reader = FixReader::new(source, RecordingSink::default(), fast_settings(10));

        assert_eq!(reader.poll_once().await.unwrap(), DecodeOutcome::NoFix);
        let outcome = reader.poll_once().await.unwrap();

        let fix = outcome.fix().copied().unwrap();
        assert!((fix.latitude - 48.1173).abs() < 1e-3);
        assert_eq!(reader.sink().events, vec![Event::Fix(fix)]);
        assert_eq!(reader.misses(), 0);
    }

    #[tokio::test]
    async fn test_heartbeat_every_n_misses() {
        let source = ScriptedSource::new(&[]);
        let mut reader = FixReader::new(source, RecordingSink::default(), fast_settings(3));

        for _ in 0..7 {
            reader.poll_once().await.unwrap();
        }

        assert_eq!(reader.misses(), 7);
        assert_eq!(reader.sink().events, vec![Event::Heartbeat, Event::Heartbeat]);
    }

    #[tokio::test]
    async fn test_fix_resets_miss_counter() {
        let source = ScriptedSource::new(&[b"", b"", GPGGA.as_bytes(), b"", b""]);
        let mut reader = FixReader::new(source, RecordingSink::default(), fast_settings(3));

        for _ in 0..5 {
            reader.poll_once().await.unwrap();
        }

        assert_eq!(reader.misses(), 2);
        let events = &reader.sink().events;
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::Fix(_)));
    }

    #[tokio::test]
    async fn test_blank_gpgga_counts_as_miss() {
        let source = ScriptedSource::new(&[NO_SATS.as_bytes()]);
        let mut reader = FixReader::new(source, RecordingSink::default(), fast_settings(1));

        assert_eq!(reader.poll_once().await.unwrap(), DecodeOutcome::NoFix);
        assert_eq!(reader.sink().events, vec![Event::Heartbeat]);
    }

    #[tokio::test]
    async fn test_last_fix_in_chunk_wins() {
        let south = GPGGA.replace(",N,", ",S,");
        let chunk = format!("{GPGGA}$GPRMC,123519,A*6A\r\n{south}");
        let source = ScriptedSource::new(&[chunk.as_bytes()]);
        let settings = PollSettings {
            read_chunk: 512,
            ..fast_settings(10)
        };
        let mut reader = FixReader::new(source, RecordingSink::default(), settings);

        let fix = reader.poll_once().await.unwrap().fix().copied().unwrap();
        assert!(fix.latitude < 0.0);
        assert_eq!(reader.sink().events.len(), 1);
    }

    #[tokio::test]
    async fn test_run_stops_when_source_exhausted() {
        let data = format!("{NO_SATS}{GPGGA}");
        let source = ScriptedSource::new(&[data.as_bytes()]);
        let mut reader = FixReader::new(source, RecordingSink::default(), fast_settings(10));

        reader.run().await.unwrap();

        let (source, sink) = reader.into_parts();
        assert!(source.is_exhausted());
        assert_eq!(sink.events.len(), 1);
        assert!(matches!(sink.events[0], Event::Fix(_)));
    }

    #[tokio::test]
    async fn test_stop_flag_ends_run() {
        let source = ScriptedSource::new(&[GPGGA.as_bytes(), GPGGA.as_bytes()]);
        let mut reader = FixReader::new(source, RecordingSink::default(), fast_settings(10));

        reader.running_flag().store(false, Ordering::Relaxed);
        reader.run().await.unwrap();

        assert!(!reader.is_running());
        assert!(reader.sink().events.is_empty());
    }
}
