//! sfxkit CLI - render and vary sfxr-style sound effects
//!
//! This binary parses parameter sets from text, binary or JSON files and
//! renders them to WAV.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli_args::{Cli, Commands};
use sfxkit_cli::commands;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            seed,
            max_seconds,
        } => commands::render::run(&input.source(), &output, seed, max_seconds),
        Commands::Mutate {
            input,
            amount,
            seed,
            output,
            max_seconds,
        } => commands::mutate::run(
            &input.source(),
            amount,
            seed,
            output.as_deref(),
            max_seconds,
        ),
        Commands::Inspect { input, json } => commands::inspect::run(&input.source(), json),
        Commands::Presets { json } => commands::presets::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
