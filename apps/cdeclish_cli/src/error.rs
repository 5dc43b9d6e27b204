//! The CLI's own error type: every [`cdeclish_engine::EngineError`] already
//! carries its `sysexits.h` code (always 64, a malformed-input condition);
//! this wraps it alongside the categories only the front-end produces —
//! missing `--file` input, an unwritable `--output` path, a poisoned config
//! file — each mapped to the matching `sysexits.h`-style code.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CliError {
    Engine(cdeclish_engine::EngineError),
    /// `--file PATH` named a path that doesn't exist or can't be read.
    MissingInput { path: PathBuf, source: std::io::Error },
    /// `--output PATH` named a location that can't be created or written.
    CannotCreateOutput { path: PathBuf, source: std::io::Error },
    /// The config file at the standard location exists but isn't valid
    /// TOML, or a config key's value didn't parse.
    Config(String),
    /// A `--file` script ran to completion but one or more of its lines
    /// failed; each line already printed its own diagnostic, so this only
    /// carries the process's overall exit code.
    ScriptHadErrors,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::MissingInput { path, source } => {
                write!(f, "cannot read `{}`: {source}", path.display())
            }
            CliError::CannotCreateOutput { path, source } => {
                write!(f, "cannot write `{}`: {source}", path.display())
            }
            CliError::Config(message) => write!(f, "{message}"),
            CliError::ScriptHadErrors => write!(f, "one or more script lines failed"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<cdeclish_engine::EngineError> for CliError {
    fn from(e: cdeclish_engine::EngineError) -> Self {
        CliError::Engine(e)
    }
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(e) => e.exit_code(),
            CliError::MissingInput { .. } => 66,
            CliError::CannotCreateOutput { .. } => 73,
            CliError::Config(_) => 70,
            CliError::ScriptHadErrors => 64,
        }
    }
}
