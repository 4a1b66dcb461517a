// src/source.rs
//! Byte sources feeding the sentence framer

use crate::error::{GpsError, Result};
use log::{debug, info};
use std::{path::Path, time::Duration};
use tokio::{fs::File, io::AsyncReadExt};
use tokio_serial::{DataBits, FlowControl, Parity, SerialPortBuilderExt, SerialStream, StopBits};

/// Something that delivers raw receiver bytes in bounded-time reads
#[allow(async_fn_in_trait)]
pub trait ByteSource {
    /// Read up to `buf.len()` bytes, waiting at most `timeout`.
    ///
    /// Returns `Ok(0)` when nothing arrived in time.
    async fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Whether the source has no more bytes to give
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// GNSS receiver on a serial port (8N1, no flow control)
pub struct SerialSource {
    port: String,
    stream: SerialStream,
}

impl SerialSource {
    pub fn open(port: &str, baudrate: u32) -> Result<Self> {
        info!("Opening GPS receiver on {} at {} baud", port, baudrate);

        let stream = tokio_serial::new(port, baudrate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .open_native_async()
            .map_err(|e| GpsError::Connection(format!("Failed to open serial port {}: {}", port, e)))?;

        Ok(Self {
            port: port.to_string(),
            stream,
        })
    }

    pub fn port(&self) -> &str {
        &self.port
    }
}

impl ByteSource for SerialSource {
    async fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        match tokio::time::timeout(timeout, self.stream.read(buf)).await {
            Ok(read) => Ok(read?),
            Err(_) => Ok(0),
        }
    }
}

/// Recorded NMEA log replayed from a file
pub struct ReplaySource {
    file: File,
    exhausted: bool,
}

impl ReplaySource {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .await
            .map_err(|e| GpsError::Connection(format!("Failed to open replay file {}: {}", path.display(), e)))?;

        info!("Replaying NMEA log {}", path.display());
        Ok(Self {
            file,
            exhausted: false,
        })
    }
}

impl ByteSource for ReplaySource {
    async fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        if self.exhausted {
            return Ok(0);
        }

        let read = match tokio::time::timeout(timeout, self.file.read(buf)).await {
            Ok(read) => read?,
            Err(_) => return Ok(0),
        };

        if read == 0 && !buf.is_empty() {
            debug!("Replay file exhausted");
            self.exhausted = true;
        }
        Ok(read)
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// List available serial ports
pub fn list_serial_ports() -> Result<()> {
    let ports = tokio_serial::available_ports()?;

    if ports.is_empty() {
        println!("No serial ports found.");
    } else {
        println!("Available serial ports:");
        for port in ports {
            println!("  {} - {:?}", port.port_name, port.port_type);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replay_reads_until_exhausted() {
        let path = std::env::temp_dir().join(format!("nmea-fix-replay-{}.nmea", std::process::id()));
        std::fs::write(&path, b"$GPGGA,1\r\n$GPGGA,2\r\n").unwrap();

        let mut source = ReplaySource::open(&path).await.unwrap();
        let mut buf = [0u8; 8];
        let mut collected = Vec::new();

        while !source.is_exhausted() {
            let n = source.read(&mut buf, Duration::from_millis(100)).await.unwrap();
            collected.extend_from_slice(&buf[..n]);
        }

        assert_eq!(collected, b"$GPGGA,1\r\n$GPGGA,2\r\n");
        assert_eq!(source.read(&mut buf, Duration::from_millis(100)).await.unwrap(), 0);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_replay_missing_file() {
        let result = ReplaySource::open("/nonexistent/nmea-fix/log.nmea").await;
        assert!(matches!(result, Err(GpsError::Connection(_))));
    }
}
