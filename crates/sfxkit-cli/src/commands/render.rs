//! Render command implementation
//!
//! Parses a parameter set, synthesizes it and writes a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use sfxkit_backend_audio::{StopReason, SynthOptions, SynthesisEngine};

use crate::input::{self, InputSource};

/// Facts about a finished render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    /// Where the parameters came from.
    pub origin: String,
    /// Number of samples written.
    pub num_samples: usize,
    /// Length in seconds.
    pub duration_seconds: f64,
    /// Seed used for the noise stream.
    pub seed: u32,
    /// Why synthesis stopped.
    pub stop_reason: StopReason,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
}

/// Renders `source` to a WAV file at `output`.
pub fn render(source: &InputSource, output: &str, options: &SynthOptions) -> Result<RenderSummary> {
    let loaded = input::load(source)?;
    let engine = SynthesisEngine::with_options(&loaded.params, options)?;
    let wav = engine.to_wav();
    wav.write_to_file(output)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    Ok(RenderSummary {
        origin: loaded.origin,
        num_samples: engine.num_samples(),
        duration_seconds: engine.duration_seconds(),
        seed: engine.seed(),
        stop_reason: engine.stop_reason(),
        pcm_hash: wav.pcm_hash,
    })
}

/// Run the render command
///
/// # Arguments
/// * `source` - Where to read parameters from
/// * `output` - WAV file to write
/// * `seed` - Optional noise seed
/// * `max_seconds` - Optional length cap
///
/// # Returns
/// Exit code: 0 on success
pub fn run(
    source: &InputSource,
    output: &str,
    seed: Option<u32>,
    max_seconds: Option<f64>,
) -> Result<ExitCode> {
    let options = super::synth_options(seed, max_seconds)?;
    let summary = render(source, output, &options)?;

    println!("{} {}", "Rendered".green().bold(), output);
    for line in summary_lines(&summary) {
        println!("{}", line);
    }
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn summary_lines(summary: &RenderSummary) -> Vec<String> {
    vec![
        format!("  {} {}", "Source:".dimmed(), summary.origin),
        format!(
            "  {} {} ({:.3}s)",
            "Samples:".dimmed(),
            summary.num_samples,
            summary.duration_seconds
        ),
        format!("  {} {}", "Seed:".dimmed(), summary.seed),
        format!("  {} {}", "Stopped:".dimmed(), summary.stop_reason),
        format!("  {} {}", "PCM hash:".dimmed(), summary.pcm_hash),
    ]
}
