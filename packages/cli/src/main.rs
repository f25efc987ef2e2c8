mod commands;
mod config;
mod demo;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{init, run, InitArgs, RunArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Trellis CLI - render and patch a sample UI tree in memory
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level regardless of config
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default trellis.config.json
    Init(InitArgs),

    /// Render the todo list, apply the configured steps and print the result
    Run(RunArgs),
}

/// `RUST_LOG` wins, then `--verbose`, then the config's log level
fn log_filter(cli: &Cli, cwd: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    if cli.verbose {
        return EnvFilter::new("debug");
    }
    let explicit = match &cli.command {
        Command::Run(args) => args.config.as_deref(),
        Command::Init(_) => None,
    };
    let level = Config::load(cwd, explicit)
        .map(|config| config.log_level)
        .unwrap_or_else(|_| "warn".to_string());
    EnvFilter::new(level)
}

fn main() {
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&cli, &cwd))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Run(args) => run(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
