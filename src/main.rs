use std::fs;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use loadtone::config::{AppConfig, ChannelConfig, SweepConfig};
use loadtone::error::{Result, SignalError};
use loadtone::load::ToneGenerator;
use loadtone::modem::Transmitter;
use loadtone::sweep::run_sweep;
use loadtone::timing::MonotonicClock;
use loadtone::ui::{print_banner, progress::symbol_bar};
use loadtone::utils::logging::init_logging;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file; CLI flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Frame a file's bytes and transmit them as BFSK load oscillations
    Send {
        /// File whose bytes form the payload
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long)]
        high_freq: Option<f64>,
        #[arg(long)]
        low_freq: Option<f64>,
        /// Symbols per second
        #[arg(long)]
        symbol_rate: Option<f64>,
        /// Busy fraction of each oscillation period, in (0, 1]
        #[arg(long)]
        duty: Option<f64>,
    },
    /// Hold a single load-oscillation frequency (diagnostic)
    Tone {
        /// Oscillation frequency in Hz
        #[arg(short, long)]
        frequency: f64,
        /// Duration in microseconds
        #[arg(short, long, default_value_t = 1_000_000)]
        duration: u64,
        #[arg(long)]
        duty: Option<f64>,
    },
    /// Step through the spectrum to characterize the channel (diagnostic)
    Sweep {
        /// Duration of each frequency step in microseconds
        #[arg(long)]
        step_duration: Option<u64>,
        #[arg(long)]
        max_freq: Option<f64>,
        #[arg(long)]
        increment: Option<f64>,
        #[arg(long)]
        duty: Option<f64>,
    },
}

fn main() {
    init_logging();
    print_banner();

    if let Err(err) = run(Cli::parse()) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let clock = MonotonicClock::new()?;
    let generator = ToneGenerator::new(clock)?;
    info!("load engine ready: {} logical cores", generator.core_count());

    let stop = generator.stop_flag();
    if let Err(err) = ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst)) {
        warn!("no Ctrl-C handler, transmissions cannot be interrupted: {err}");
    }

    match cli.command {
        Commands::Send {
            input,
            high_freq,
            low_freq,
            symbol_rate,
            duty,
        } => {
            let channel = ChannelConfig {
                high_freq_hz: high_freq.unwrap_or(config.channel.high_freq_hz),
                low_freq_hz: low_freq.unwrap_or(config.channel.low_freq_hz),
                symbol_rate_hz: symbol_rate.unwrap_or(config.channel.symbol_rate_hz),
                duty_ratio: duty.unwrap_or(config.channel.duty_ratio),
            };
            // the whole payload is read up front: the checksum needs it, and
            // a partial frame would desynchronize the receiver
            let payload = fs::read(&input).map_err(|source| SignalError::PayloadUnavailable {
                path: input.display().to_string(),
                source,
            })?;
            info!("transmitting {} bytes from '{}'", payload.len(), input.display());

            let bar = symbol_bar(Transmitter::<ToneGenerator>::frame_len_bits(payload.len()) as u64);
            let mut transmitter = Transmitter::new(generator, &channel)?.with_progress(bar);

            let start = clock.now_micros();
            let summary = transmitter.transmit_frame(&payload)?;
            info!(
                "sent {} bits (checksum 0x{:02X}) in {:.1} s",
                summary.bits_sent,
                summary.checksum,
                (clock.now_micros() - start) as f64 / 1_000_000.0
            );
        }
        Commands::Tone {
            frequency,
            duration,
            duty,
        } => {
            let report = generator.generate_tone(
                duration,
                frequency,
                duty.unwrap_or(config.channel.duty_ratio),
            )?;
            info!(
                "tone held for {:.3} s over {} ticks (requested {:.3} s)",
                report.elapsed_micros as f64 / 1_000_000.0,
                report.ticks,
                duration as f64 / 1_000_000.0
            );
        }
        Commands::Sweep {
            step_duration,
            max_freq,
            increment,
            duty,
        } => {
            let sweep = SweepConfig {
                step_duration_micros: step_duration.unwrap_or(config.sweep.step_duration_micros),
                max_freq_hz: max_freq.unwrap_or(config.sweep.max_freq_hz),
                increment_hz: increment.unwrap_or(config.sweep.increment_hz),
                duty_ratio: duty.unwrap_or(config.sweep.duty_ratio),
            };
            run_sweep(&clock, &generator, &sweep)?;
        }
    }

    Ok(())
}
