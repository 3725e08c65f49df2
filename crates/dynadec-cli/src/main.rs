//! Dynadec Command-Line Interface
//!
//! Converts dynamical decoupling sequence files into gate circuits and
//! time-tagged schedules.
//!
//! ```text
//! dynadec circuit  -i echo.yaml --gate-time 0.4e-6 --measure
//! dynadec schedule -i echo.json --qubits 0,1 --format json -o echo_schedule.json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::convert::{self, ConvertArgs};
use commands::version;

/// Dynadec - convert dynamical decoupling sequences into gates
#[derive(Parser)]
#[command(name = "dynadec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a sequence into a moment-by-moment circuit
    Circuit {
        #[command(flatten)]
        args: ConvertArgs,
    },

    /// Convert a sequence into a schedule of timed operations
    Schedule {
        #[command(flatten)]
        args: ConvertArgs,

        /// Number of qubits on the target device (unlimited if omitted)
        #[arg(long)]
        device_qubits: Option<u32>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Circuit { args } => convert::execute_circuit(&args),
        Commands::Schedule {
            args,
            device_qubits,
        } => convert::execute_schedule(&args, device_qubits),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
