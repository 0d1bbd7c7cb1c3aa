//! Shuffle command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{events, resolve_inputs, spawn_reader, InputEvent, InputSource};
use crate::interrupt::Interrupt;
use crate::output::{DelimitedWriter, RecordSink};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use sshuf_core::{ShuffleStats, StreamShuffler};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, SyncSender};

/// Arguments for shuffling
#[derive(Debug, Args)]
pub struct ShuffleArgs {
    /// Input files or glob patterns; `-` or none reads standard input
    #[arg(value_name = "FILE/PATTERN")]
    pub inputs: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Line delimiter is NUL, not newline
    #[arg(short = 'z', long)]
    pub zero_terminated: bool,

    /// Minimum window size in lines for shuffling [default: 1024]
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub window_min: Option<i64>,

    /// Maximum window size in lines; the window stops growing here
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub window_max: Option<i64>,

    /// Window growth factor applied on each overflow [default: 2]
    #[arg(long, value_name = "N")]
    pub growth_factor: Option<usize>,

    /// Seed for a reproducible shuffle
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Show a progress spinner on stderr
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ShuffleArgs {
    /// Execute the shuffle
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        let config = self.resolve_config()?;
        if self.print_config {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(config.to_toml()?.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write configuration")?;
            return Ok(());
        }

        log::debug!("Arguments: {:?}", self);
        log::info!(
            "window_min={} window_max={:?} growth_factor={}",
            config.shuffle.window_min,
            config.shuffle.window_max,
            config.shuffle.growth_factor
        );

        let sources = resolve_inputs(&self.inputs)?;
        let mut sink = DelimitedWriter::create(self.output.as_deref(), config.io.delimiter())?;
        let mut progress = ProgressReporter::new(self.progress && !self.quiet);

        let (sender, receiver) = events::channel();
        let interrupt = Interrupt::new();
        interrupt.install(sender.clone())?;

        let stats = run(
            sources,
            &config,
            (sender, receiver),
            &interrupt,
            &mut sink,
            &mut progress,
        )?;
        progress.finish();

        if interrupt.is_triggered() {
            log::warn!(
                "Interrupted: wrote {} records, dropped {} still buffered",
                sink.written(),
                stats.ingested - stats.emitted
            );
        }
        log::info!(
            "Shuffled {} records ({} written, {} overflows, peak buffer {}, final capacity {})",
            stats.ingested,
            sink.written(),
            stats.overflows,
            stats.peak_buffered,
            stats.capacity
        );
        Ok(())
    }

    /// Merge the config file (if any) with command-line overrides
    pub fn resolve_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        if let Some(window_min) = self.window_min {
            config.shuffle.window_min = positive("--window-min", window_min)?;
        }
        if let Some(window_max) = self.window_max {
            config.shuffle.window_max = Some(positive("--window-max", window_max)?);
        }
        if let Some(growth_factor) = self.growth_factor {
            config.shuffle.growth_factor = growth_factor;
        }
        if self.seed.is_some() {
            config.shuffle.seed = self.seed;
        }
        if self.zero_terminated {
            config.io.zero_terminated = true;
        }

        config
            .shuffle
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        if config.io.read_buffer_kb == 0 {
            return Err(
                CliError::ConfigError("read_buffer_kb must be a positive integer".into()).into(),
            );
        }

        Ok(config)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        // A logger may already be installed when running inside tests.
        let _ =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init();
    }
}

fn positive(flag: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or_else(|| CliError::ConfigError(format!("{flag} must be a positive integer")).into())
}

/// Shuffle every record of `sources` into `sink`
///
/// `channel` carries records from the reader thread; its sender may also be
/// held by the interrupt handler.
pub fn run<S: RecordSink>(
    sources: Vec<InputSource>,
    config: &CliConfig,
    channel: (SyncSender<InputEvent>, Receiver<InputEvent>),
    interrupt: &Interrupt,
    sink: &mut S,
    progress: &mut ProgressReporter,
) -> Result<ShuffleStats> {
    let shuffler = StreamShuffler::with_config(config.shuffle.clone())?;
    let (sender, receiver) = channel;

    let buffer_size = config.io.read_buffer_kb * 1024;
    spawn_reader(sources, buffer_size, config.io.delimiter(), sender);

    shuffle_events(shuffler, receiver, interrupt, sink, progress)
}

/// Drive the shuffler from input events, writing everything it emits
///
/// Stops at `Finished` and writes the remaining records. On an interrupt the
/// records emitted so far are flushed and the buffered ones dropped.
pub fn shuffle_events<I, S>(
    mut shuffler: StreamShuffler<Vec<u8>>,
    events: I,
    interrupt: &Interrupt,
    sink: &mut S,
    progress: &mut ProgressReporter,
) -> Result<ShuffleStats>
where
    I: IntoIterator<Item = InputEvent>,
    S: RecordSink,
{
    let mut flushed = Vec::new();

    for event in events {
        if interrupt.is_triggered() {
            return stop(shuffler, sink);
        }
        match event {
            InputEvent::SourceStarted(name) => {
                log::info!("Reading {name}");
                progress.source_started(&name);
            }
            InputEvent::Record(record) => {
                progress.record_read();
                shuffler.ingest(record, |out| flushed.push(out));
                for out in flushed.drain(..) {
                    sink.write_record(&out).context("Failed to write record")?;
                }
            }
            InputEvent::Failed(err) => return Err(err),
            InputEvent::Interrupted => return stop(shuffler, sink),
            InputEvent::Finished => break,
        }
    }

    finish(shuffler, interrupt, sink)
}

fn stop<S: RecordSink>(shuffler: StreamShuffler<Vec<u8>>, sink: &mut S) -> Result<ShuffleStats> {
    sink.finish().context("Failed to flush output")?;
    Ok(shuffler.stats())
}

/// Write the remaining records and flush the sink
///
/// An interrupt during the final write stops it between records.
pub fn finish<S: RecordSink>(
    shuffler: StreamShuffler<Vec<u8>>,
    interrupt: &Interrupt,
    sink: &mut S,
) -> Result<ShuffleStats> {
    let (remaining, mut stats) = shuffler.into_remaining();
    let pending = remaining.len() as u64;
    let mut written = 0u64;
    for record in remaining {
        if interrupt.is_triggered() {
            break;
        }
        sink.write_record(&record).context("Failed to write record")?;
        written += 1;
    }
    stats.emitted -= pending - written;
    sink.finish().context("Failed to flush output")?;
    Ok(stats)
}
