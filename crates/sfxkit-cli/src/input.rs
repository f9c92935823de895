//! Loading parameter sets from files, standard input or built-in presets.

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use sfxkit_spec::{ParameterFormat, ParameterSet, Preset};

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// Encoding of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Comma-separated text.
    Text,
    /// Versioned binary `.sfxr` layout.
    Binary,
    /// JSON preset.
    Json,
}

impl InputFormat {
    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Text => "text",
            InputFormat::Binary => "binary",
            InputFormat::Json => "json",
        }
    }

    /// Guesses the format from a file extension; anything unknown is text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("sfxr") | Some("bin") => InputFormat::Binary,
            Some("json") => InputFormat::Json,
            _ => InputFormat::Text,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a command takes its parameters from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSource {
    /// File path, or `-` for standard input.
    pub input: Option<String>,
    /// Explicit format; otherwise guessed from the extension.
    pub format: Option<InputFormat>,
    /// Built-in preset name.
    pub preset: Option<String>,
}

impl InputSource {
    /// Source reading a file.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            input: Some(path.into()),
            ..Default::default()
        }
    }

    /// Source naming a built-in preset.
    pub fn preset(name: impl Into<String>) -> Self {
        Self {
            preset: Some(name.into()),
            ..Default::default()
        }
    }
}

/// A parameter set together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedParams {
    /// The parsed parameters.
    pub params: ParameterSet,
    /// Human-readable origin (path, `<stdin>` or `preset:<name>`).
    pub origin: String,
}

/// Resolves an [`InputSource`] to a parameter set.
pub fn load(source: &InputSource) -> Result<LoadedParams> {
    match (&source.input, &source.preset) {
        (Some(_), Some(_)) => bail!("--input and --preset are mutually exclusive"),
        (None, None) => bail!("no input given; pass --input <file|-> or --preset <name>"),
        (None, Some(name)) => {
            let preset = Preset::from_name(name)?;
            Ok(LoadedParams {
                params: preset.params(),
                origin: format!("preset:{}", preset),
            })
        }
        (Some(path), None) if path == STDIN_PATH => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read standard input")?;
            let format = source.format.unwrap_or(InputFormat::Text);
            Ok(LoadedParams {
                params: parse_bytes(&bytes, format)?,
                origin: "<stdin>".to_string(),
            })
        }
        (Some(path), None) => {
            let file = Path::new(path);
            let bytes =
                fs::read(file).with_context(|| format!("Failed to read input file: {}", path))?;
            let format = source.format.unwrap_or_else(|| InputFormat::from_path(file));
            let params = parse_bytes(&bytes, format)
                .with_context(|| format!("Failed to parse {} as {}", path, format))?;
            Ok(LoadedParams {
                params,
                origin: path.clone(),
            })
        }
    }
}

/// Parses raw bytes in the given format.
pub fn parse_bytes(bytes: &[u8], format: InputFormat) -> Result<ParameterSet> {
    let params = match format {
        InputFormat::Text => ParameterSet::parse(bytes, ParameterFormat::Text)?,
        InputFormat::Binary => ParameterSet::parse(bytes, ParameterFormat::Binary)?,
        InputFormat::Json => {
            let text = std::str::from_utf8(bytes).context("JSON input is not UTF-8")?;
            ParameterSet::from_json(text)?
        }
    };
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sfxkit_spec::LATEST_VERSION;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.sfxr")), InputFormat::Binary);
        assert_eq!(InputFormat::from_path(Path::new("a.JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("a.txt")), InputFormat::Text);
        assert_eq!(InputFormat::from_path(Path::new("noext")), InputFormat::Text);
    }

    #[test]
    fn test_load_preset() {
        let loaded = load(&InputSource::preset("COIN")).unwrap();
        assert_eq!(loaded.params, Preset::Coin.params());
        assert_eq!(loaded.origin, "preset:coin");
    }

    #[test]
    fn test_load_requires_exactly_one_source() {
        assert!(load(&InputSource::default()).is_err());
        let both = InputSource {
            input: Some("x.txt".into()),
            preset: Some("coin".into()),
            ..Default::default()
        };
        assert!(load(&both).is_err());
    }

    #[test]
    fn test_load_files_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let params = Preset::Laser.params();

        let text_path = dir.path().join("laser.txt");
        fs::write(&text_path, params.to_text()).unwrap();
        let loaded = load(&InputSource::file(text_path.to_string_lossy())).unwrap();
        assert_eq!(loaded.params, params);

        let json_path = dir.path().join("laser.json");
        fs::write(&json_path, params.to_json_pretty().unwrap()).unwrap();
        let loaded = load(&InputSource::file(json_path.to_string_lossy())).unwrap();
        assert_eq!(loaded.params, params);

        let bin_path = dir.path().join("laser.sfxr");
        fs::write(&bin_path, params.to_binary(LATEST_VERSION).unwrap()).unwrap();
        let loaded = load(&InputSource::file(bin_path.to_string_lossy())).unwrap();
        assert_eq!(loaded.params.wave_shape, params.wave_shape);
        assert_eq!(loaded.params.start_frequency, params.start_frequency as f32 as f64);
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sound.dat");
        fs::write(&path, Preset::Coin.text()).unwrap();
        let source = InputSource {
            input: Some(path.to_string_lossy().into_owned()),
            format: Some(InputFormat::Binary),
            preset: None,
        };
        assert!(load(&source).is_err());
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load(&InputSource::file("/nonexistent/sound.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
