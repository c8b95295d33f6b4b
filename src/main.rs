use anyhow::Context;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use touchtrack::config::Config;
use touchtrack::replay::{self, Trace};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TOUCHTRACK_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "touchtrack")]
#[command(version = VERSION, about = "Unified mouse and touch pointer tracking for canvas surfaces")]
struct Cli {
    /// Replay a recorded event trace (JSON) and print the emitted events
    #[arg(long, short = 'r', value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Config file to use instead of ~/.config/touchtrack/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = match cli.config {
            Some(path) => path,
            None => Config::get_config_path()?,
        };
        Config::create_default_file(&path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(trace_path) = cli.replay {
        let trace = Trace::load(&trace_path)?;
        let report = replay::run(&trace, &config)
            .with_context(|| format!("Failed to replay {}", trace_path.display()))?;

        for emitted in &report.events {
            println!("{}", serde_json::to_string(emitted)?);
        }
        log::info!(
            "{} events, {} defaults prevented, {} unhandled dispatches",
            report.events.len(),
            report.default_prevented,
            report.unhandled
        );
    } else {
        println!("touchtrack: Unified mouse and touch pointer tracking");
        println!();
        println!("Usage:");
        println!("  touchtrack --replay trace.json    Print events emitted for a recorded trace");
        println!("  touchtrack --init-config          Write ~/.config/touchtrack/config.toml");
        println!("  touchtrack --help                 Show help");
        println!();
        println!("Tap settings in use:");
        println!("  distance < {} px", config.tracker.tap_distance_threshold);
        println!("  delay   <= {} ms", config.tracker.tap_delay_ms);
    }

    Ok(())
}
