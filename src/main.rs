// src/main.rs
//! NMEA Fix - prints GPGGA position fixes read from a GNSS receiver

use anyhow::{bail, Context};
use clap::Parser;
use log::info;
use nmea_fix::{
    config::{OutputFormat, ReaderConfig},
    display::{FixSink, JsonSink, TerminalSink},
    source::{self, ByteSource, ReplaySource, SerialSource},
    FixReader,
};
use std::{path::PathBuf, sync::atomic::Ordering};

/// Command line options
#[derive(Debug, Clone, Parser)]
#[command(name = "nmea-fix", version, about = "Read GPGGA fixes from a GNSS receiver")]
struct Opts {
    /// Serial device, e.g. /dev/ttyUSB0
    #[arg(short, long)]
    port: Option<String>,

    #[arg(short, long)]
    baud: Option<u32>,

    /// Replay a recorded NMEA log instead of opening a serial port
    #[arg(long, conflicts_with = "port")]
    replay: Option<PathBuf>,

    #[arg(long)]
    poll_interval_ms: Option<u64>,

    #[arg(long)]
    read_timeout_ms: Option<u64>,

    /// No-fix cycles between "Connecting..." lines
    #[arg(long)]
    heartbeat_every: Option<u32>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    #[arg(long)]
    no_color: bool,

    /// List serial ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Write the effective settings to the config file
    #[arg(long)]
    save_config: bool,
}

impl Opts {
    fn apply(&self, config: &mut ReaderConfig) {
        if let Some(port) = &self.port {
            config.serial_port = Some(port.clone());
        }
        if let Some(baud) = self.baud {
            config.serial_baudrate = baud;
        }
        if let Some(ms) = self.poll_interval_ms {
            config.poll_interval_ms = ms;
        }
        if let Some(ms) = self.read_timeout_ms {
            config.read_timeout_ms = ms;
        }
        if let Some(n) = self.heartbeat_every {
            config.heartbeat_every = n;
        }
        if let Some(format) = self.format {
            config.output = format;
        }
        if self.no_color {
            config.color = false;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();

    if opts.list_ports {
        source::list_serial_ports()?;
        return Ok(());
    }

    let mut config = ReaderConfig::load().context("loading configuration")?;
    opts.apply(&mut config);
    config.validate()?;

    if opts.save_config {
        config.save().context("saving configuration")?;
        info!("Saved configuration to {}", ReaderConfig::get_config_path()?.display());
    }

    let sink: Box<dyn FixSink> = match config.output {
        OutputFormat::Text => Box::new(TerminalSink::new(config.color)),
        OutputFormat::Json => Box::new(JsonSink::new()),
    };

    if let Some(path) = &opts.replay {
        let source = ReplaySource::open(path).await?;
        return read_fixes(source, sink, &config).await;
    }

    let Some(port) = config.serial_port.clone() else {
        bail!("no serial port given; use --port or set serial_port in the config file");
    };
    let source = SerialSource::open(&port, config.serial_baudrate)?;
    info!("Reading fixes from {}", source.port());
    read_fixes(source, sink, &config).await
}

async fn read_fixes<S: ByteSource>(source: S, sink: Box<dyn FixSink>, config: &ReaderConfig) -> anyhow::Result<()> {
    let mut reader = FixReader::new(source, sink, config.poll_settings());

    let running = reader.running_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            running.store(false, Ordering::Relaxed);
        }
    });

    reader.run().await?;
    info!("Shutting down...");
    Ok(())
}
