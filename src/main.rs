//! droidcast - send Android broadcast intents via adb
//!
//! This is the binary entry point. All logic lives in the library.

use clap::{Parser, Subcommand};
use droidcast::{load_config, run_devices, run_doctor, run_send};

/// Send Android broadcast intents to devices and emulators via adb
#[derive(Parser, Debug)]
#[command(name = "droidcast")]
#[command(about = "Send Android broadcast intents via adb", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Emit machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Broadcast an intent with the given action
    Send {
        /// Action identifier (e.g. com.example.ACTION_REFRESH) or a
        /// configured alias (e.g. ring-off)
        #[arg(value_name = "ACTION")]
        action: String,

        /// Target device serial (defaults to config, then adb's choice)
        #[arg(long, short = 's', value_name = "SERIAL")]
        device: Option<String>,
    },

    /// List devices known to the adb server
    Devices,

    /// Check that adb is installed and reachable
    Doctor,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    droidcast_core::logging::init()?;

    let args = Args::parse();
    let config = load_config()?;

    let ok = match args.command {
        Command::Send { action, device } => {
            run_send(&config, &action, device.as_deref(), args.json).await?
        }
        Command::Devices => {
            run_devices(&config, args.json).await?;
            true
        }
        Command::Doctor => run_doctor(&config, args.json).await?,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
