//! Presets command implementation

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use sfxkit_spec::Preset;

/// One listed preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetEntry {
    /// Preset name.
    pub name: &'static str,
    /// Text form.
    pub text: &'static str,
}

/// All built-in presets.
pub fn entries() -> Vec<PresetEntry> {
    Preset::ALL
        .iter()
        .map(|p| PresetEntry {
            name: p.name(),
            text: p.text(),
        })
        .collect()
}

/// Run the presets command
pub fn run(json: bool) -> Result<ExitCode> {
    let entries = entries();
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Built-in presets:".cyan().bold());
    for entry in &entries {
        println!("  {:<10} {}", entry.name.bold(), entry.text.dimmed());
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_cover_all_presets() {
        let entries = entries();
        assert_eq!(entries.len(), Preset::ALL.len());
        assert_eq!(entries[0].name, "coin");
        let json = serde_json::to_string(&entries).unwrap();
        assert!(json.contains("\"explosion\""));
    }
}
