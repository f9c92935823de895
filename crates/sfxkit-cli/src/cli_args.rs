//! CLI argument definitions for the sfxkit command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Args, Parser, Subcommand};

use sfxkit_cli::commands::mutate::DEFAULT_AMOUNT;
use sfxkit_cli::input::{InputFormat, InputSource};

/// sfxkit - procedural sfxr-style sound effects
#[derive(Parser)]
#[command(name = "sfxkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read parameters from
#[derive(Args)]
pub(crate) struct InputArgs {
    /// Parameter file (text, .sfxr binary or .json), or `-` for stdin
    #[arg(short, long)]
    pub input: Option<String>,

    /// Input format (default: guessed from the file extension)
    #[arg(short, long, value_enum)]
    pub format: Option<InputFormat>,

    /// Built-in preset name instead of an input file
    #[arg(short, long, conflicts_with = "input")]
    pub preset: Option<String>,
}

impl InputArgs {
    pub fn source(self) -> InputSource {
        InputSource {
            input: self.input,
            format: self.format,
            preset: self.preset,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Synthesize a parameter set into a WAV file
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Output WAV path
        #[arg(short, long)]
        output: String,

        /// Seed for the noise generator (default: random)
        #[arg(long)]
        seed: Option<u32>,

        /// Cap the rendered length in seconds
        #[arg(long)]
        max_seconds: Option<f64>,
    },

    /// Randomly vary a parameter set and print its text form
    Mutate {
        #[command(flatten)]
        input: InputArgs,

        /// Largest change applied to any parameter
        #[arg(short, long, default_value_t = DEFAULT_AMOUNT)]
        amount: f64,

        /// Seed for the mutation and noise generators (default: random)
        #[arg(long)]
        seed: Option<u32>,

        /// Also render the variant to this WAV path
        #[arg(short, long)]
        output: Option<String>,

        /// Cap the rendered length in seconds
        #[arg(long)]
        max_seconds: Option<f64>,
    },

    /// Show a parameter set and its derived envelope
    Inspect {
        #[command(flatten)]
        input: InputArgs,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// List the built-in presets
    Presets {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}
