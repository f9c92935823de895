//! Inspect command implementation
//!
//! Shows a parsed parameter set and the values the engine derives from it
//! without rendering any audio.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use sfxkit_backend_audio::rng::create_rng;
use sfxkit_backend_audio::{EngineState, SAMPLE_RATE};
use sfxkit_spec::{Field, ParameterSet};

use crate::input::{self, InputSource};

/// Derived facts about a parameter set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    /// Where the parameters came from.
    pub origin: String,
    /// The parameters as given.
    pub params: ParameterSet,
    /// Text form.
    pub text: String,
    /// Attack, sustain and decay lengths in samples after normalization.
    pub envelope_samples: [f64; 3],
    /// Samples the engine will produce, ignoring an early pitch-floor stop.
    pub expected_samples: usize,
    /// Expected length in seconds.
    pub expected_seconds: f64,
    /// Whether the filter chain is active.
    pub filters: bool,
    /// Whether the phaser is active.
    pub phaser: bool,
    /// Repeat interval in samples, 0 when off.
    pub repeat_samples: u32,
}

/// Builds the report for `source`.
pub fn inspect(source: &InputSource) -> Result<InspectReport> {
    let loaded = input::load(source)?;
    // The noise draw does not affect any reported value.
    let state = EngineState::derive_all(&loaded.params, &mut create_rng(0));
    let envelope = state.envelope();
    let expected_samples = envelope.full_length() as usize;

    Ok(InspectReport {
        origin: loaded.origin,
        params: loaded.params,
        text: loaded.params.to_text(),
        envelope_samples: envelope.lengths(),
        expected_samples,
        expected_seconds: expected_samples as f64 / SAMPLE_RATE as f64,
        filters: state.filters().is_enabled(),
        phaser: state.phaser().is_enabled(),
        repeat_samples: state.repeat_limit(),
    })
}

/// Run the inspect command
pub fn run(source: &InputSource, json: bool) -> Result<ExitCode> {
    let report = inspect(source)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Inspecting".cyan().bold(), report.origin);
    println!("  {} {}", "Shape:".dimmed(), report.params.wave_shape);
    for field in Field::ALL {
        let value = report.params.get(field);
        if value != 0.0 {
            println!("  {:<24} {}", format!("{}:", field.name()).dimmed(), value);
        }
    }

    println!("\n{}", "Derived:".cyan().bold());
    let [attack, sustain, decay] = report.envelope_samples;
    println!(
        "  {} attack {:.0}, sustain {:.0}, decay {:.0}",
        "Envelope:".dimmed(),
        attack,
        sustain,
        decay
    );
    println!(
        "  {} {} ({:.3}s)",
        "Length:".dimmed(),
        report.expected_samples,
        report.expected_seconds
    );
    println!("  {} {}", "Filters:".dimmed(), on_off(report.filters));
    println!("  {} {}", "Phaser:".dimmed(), on_off(report.phaser));
    if report.repeat_samples > 0 {
        println!("  {} every {} samples", "Repeat:".dimmed(), report.repeat_samples);
    }
    println!("\n{} {}", "Text:".dimmed(), report.text);
    Ok(ExitCode::SUCCESS)
}

fn on_off(flag: bool) -> colored::ColoredString {
    if flag {
        "on".green()
    } else {
        "off".dimmed()
    }
}
