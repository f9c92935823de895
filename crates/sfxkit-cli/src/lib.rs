//! sfxkit CLI library.
//!
//! Input loading and the command implementations behind the `sfxkit`
//! binary. Commands return `anyhow::Result<ExitCode>` and print their own
//! human-readable or JSON output.

pub mod commands;
pub mod input;
