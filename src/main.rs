use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use fnordlicht::{serial, Command, Config, Remote};

mod logging;

#[derive(Parser)]
#[command(name = "fnordlicht")]
#[command(about = "Send commands to fnordlicht RGB controllers over a serial line.", long_about = None)]
struct Cli {
    /// Path to configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Serial device, overrides the configuration file
    #[arg(long)]
    port: Option<String>,

    /// Baud rate, overrides the configuration file
    #[arg(long)]
    baud: Option<u32>,

    /// Skip the sync sequence before the command
    #[arg(long)]
    no_sync: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Enable detailed debug (hex dumps every frame)
    #[arg(long)]
    ddebug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stop the running effect and switch the LEDs off
    Powerdown { address: u8 },

    /// Stop the running effect
    Stop { address: u8 },

    /// Fade to an RGB color
    FadeRgb {
        address: u8,
        r: u8,
        g: u8,
        b: u8,
        #[arg(long, default_value_t = 1)]
        step: u8,
        #[arg(long, default_value_t = 1)]
        delay: u8,
    },

    /// Fade to an HSV color
    FadeHsv {
        address: u8,
        h: u16,
        s: u8,
        v: u8,
        #[arg(long, default_value_t = 1)]
        step: u8,
        #[arg(long, default_value_t = 1)]
        delay: u8,
    },

    /// Shift the current color by signed deltas
    Modify {
        address: u8,
        #[arg(long, default_value_t = 1)]
        step: u8,
        #[arg(long, default_value_t = 1)]
        delay: u8,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        red: i8,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        green: i8,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        blue: i8,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        hue: i16,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        saturation: i8,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        value: i8,
    },

    /// Set the global fade offsets
    Offsets {
        address: u8,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        step: i8,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        delay: i8,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        hue: i16,
        #[arg(long, default_value_t = 255)]
        saturation: u8,
        #[arg(long, default_value_t = 255)]
        value: u8,
    },

    /// Start a built-in program
    Program {
        address: u8,
        program: u8,
        /// Up to 12 parameter bytes
        params: Vec<u8>,
    },

    /// Fade up to an RGB color and back down to black
    UpdownRgb {
        address: u8,
        r: u8,
        g: u8,
        b: u8,
        #[arg(long, default_value_t = 1)]
        step: u8,
        #[arg(long, default_value_t = 1)]
        delay: u8,
        /// Hold time after each fade, in milliseconds
        #[arg(long, default_value_t = 1000)]
        hold_ms: u64,
        /// Number of cycles, 0 repeats until Ctrl-C
        #[arg(long, default_value_t = 1)]
        repeat: u32,
    },

    /// Fade up to an HSV color and back down to zero brightness
    UpdownHsv {
        address: u8,
        h: u16,
        s: u8,
        v: u8,
        #[arg(long, default_value_t = 1)]
        step: u8,
        #[arg(long, default_value_t = 1)]
        delay: u8,
        /// Hold time after each fade, in milliseconds
        #[arg(long, default_value_t = 1000)]
        hold_ms: u64,
        /// Number of cycles, 0 repeats until Ctrl-C
        #[arg(long, default_value_t = 1)]
        repeat: u32,
    },
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            // usage errors exit 1 like the other tools on this bus
            let _ = e.print();
            std::process::exit(1);
        }
    };

    logging::init_logging(cli.debug, cli.ddebug);

    // reject bad arguments before anything reaches the bus
    validate(&cli.command)?;

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(baud) = cli.baud {
        config.baud_rate = baud;
    }

    let port = serial::open_port(&config)?;
    let mut remote = Remote::new(port);

    if !cli.no_sync {
        info!("sending sync sequence");
        remote.sync(0).context("Failed to send sync sequence")?;
    }

    run(&mut remote, cli.command)
}

/// Checks that need no serial port. A failure here must leave the bus untouched.
fn validate(command: &Commands) -> Result<()> {
    if let Commands::Program { program, params, .. } = command {
        Command::StartProgram {
            program: *program,
            params: params.clone(),
        }
        .validate()
        .context(format!("Failed to start program {}", program))?;
    }
    Ok(())
}

fn run<W: std::io::Write>(remote: &mut Remote<W>, command: Commands) -> Result<()> {
    match command {
        Commands::Powerdown { address } => {
            info!(address, "powerdown");
            remote.powerdown(address)?;
        }
        Commands::Stop { address } => remote.stop(address)?,
        Commands::FadeRgb {
            address,
            r,
            g,
            b,
            step,
            delay,
        } => remote.fade_rgb(address, r, g, b, step, delay)?,
        Commands::FadeHsv {
            address,
            h,
            s,
            v,
            step,
            delay,
        } => remote.fade_hsv(address, h, s, v, step, delay)?,
        Commands::Modify {
            address,
            step,
            delay,
            red,
            green,
            blue,
            hue,
            saturation,
            value,
        } => remote.modify_current(address, step, delay, red, green, blue, hue, saturation, value)?,
        Commands::Offsets {
            address,
            step,
            delay,
            hue,
            saturation,
            value,
        } => remote.config_offsets(address, step, delay, hue, saturation, value)?,
        Commands::Program {
            address,
            program,
            params,
        } => remote
            .start_program(address, program, &params)
            .context(format!("Failed to start program {}", program))?,
        Commands::UpdownRgb {
            address,
            r,
            g,
            b,
            step,
            delay,
            hold_ms,
            repeat,
        } => {
            let hold = Duration::from_millis(hold_ms);
            repeat_until_interrupted(repeat, || {
                remote.fade_updown_rgb(address, r, g, b, step, delay, hold)
            })?;
        }
        Commands::UpdownHsv {
            address,
            h,
            s,
            v,
            step,
            delay,
            hold_ms,
            repeat,
        } => {
            let hold = Duration::from_millis(hold_ms);
            repeat_until_interrupted(repeat, || {
                remote.fade_updown_hsv(address, h, s, v, step, delay, hold)
            })?;
        }
    }

    Ok(())
}

/// Only an endless run traps Ctrl-C; a bounded run keeps the default SIGINT
/// behaviour so a long hold can still be interrupted.
fn traps_interrupt(repeat: u32) -> bool {
    repeat == 0
}

/// Run `cycle` `repeat` times, or until Ctrl-C when `repeat` is 0.
fn repeat_until_interrupted<F>(repeat: u32, mut cycle: F) -> Result<()>
where
    F: FnMut() -> fnordlicht::Result<()>,
{
    let running = Arc::new(AtomicBool::new(true));
    if traps_interrupt(repeat) {
        let handler_flag = Arc::clone(&running);
        if let Err(e) = ctrlc::set_handler(move || handler_flag.store(false, Ordering::Relaxed)) {
            warn!("could not set Ctrl-C handler: {}", e);
        }
    }

    let mut done = 0u32;
    while running.load(Ordering::Relaxed) && (repeat == 0 || done < repeat) {
        cycle()?;
        done += 1;
    }

    info!(cycles = done, "fade sequence finished");
    Ok(())
}
