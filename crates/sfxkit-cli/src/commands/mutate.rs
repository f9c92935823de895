//! Mutate command implementation
//!
//! Produces a random variation of a parameter set, prints its text form and
//! optionally renders it.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use sfxkit_backend_audio::{SynthOptions, SynthesisEngine};
use sfxkit_spec::ParameterSet;

use super::render::{summary_lines, RenderSummary};
use crate::input::{self, InputSource};

/// Default mutation amount.
pub const DEFAULT_AMOUNT: f64 = 0.05;

/// Outcome of a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct MutateOutcome {
    /// The varied parameters.
    pub params: ParameterSet,
    /// Render details when an output file was requested.
    pub render: Option<RenderSummary>,
}

/// Mutates `source` by `amount`, writing a WAV to `output` if given.
pub fn mutate(
    source: &InputSource,
    amount: f64,
    options: &SynthOptions,
    output: Option<&str>,
) -> Result<MutateOutcome> {
    if !amount.is_finite() {
        bail!("--amount must be a finite number, got {}", amount);
    }

    let loaded = input::load(source)?;
    let engine = SynthesisEngine::from_mutation(&loaded.params, amount, options)?;

    let render = match output {
        Some(path) => {
            let wav = engine.to_wav();
            wav.write_to_file(path)
                .with_context(|| format!("Failed to write output file: {}", path))?;
            Some(RenderSummary {
                origin: loaded.origin,
                num_samples: engine.num_samples(),
                duration_seconds: engine.duration_seconds(),
                seed: engine.seed(),
                stop_reason: engine.stop_reason(),
                pcm_hash: wav.pcm_hash,
            })
        }
        None => None,
    };

    Ok(MutateOutcome {
        params: *engine.params(),
        render,
    })
}

/// Run the mutate command
///
/// The mutated text string goes to stdout on its own line so it can be piped
/// back into `--input -`.
pub fn run(
    source: &InputSource,
    amount: f64,
    seed: Option<u32>,
    output: Option<&str>,
    max_seconds: Option<f64>,
) -> Result<ExitCode> {
    let options = super::synth_options(seed, max_seconds)?;
    let outcome = mutate(source, amount, &options, output)?;

    println!("{}", outcome.params.to_text());
    if let (Some(path), Some(summary)) = (output, &outcome.render) {
        // Status goes to stderr so stdout stays a clean text string.
        eprintln!("{} {}", "Rendered".green().bold(), path);
        for line in summary_lines(summary) {
            eprintln!("{}", line);
        }
    }
    Ok(ExitCode::SUCCESS)
}
