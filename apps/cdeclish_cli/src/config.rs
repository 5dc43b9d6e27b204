//! The on-disk config file (§6 "Persisted state"): a flat `key = "value"`
//! TOML table at the standard per-user config location, applied to a fresh
//! [`cdeclish_engine::Engine`] one `set` at a time before the first command
//! runs. Mirrors `Credentials::load`/`save` (same `dirs::config_dir` root,
//! same "missing file means defaults" and "unreadable file is an error"
//! split) but read-only: nothing in a `cdeclish` session writes this file
//! back out.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::error::CliError;

/// The config file's contents: whatever key/value pairs it held, applied in
/// file order. Unknown keys are warnings at this layer (§6), not errors —
/// [`apply`] returns them alongside the keys it accepted.
#[derive(Debug, Default, serde::Deserialize)]
pub struct FileConfig {
    #[serde(flatten)]
    pub entries: BTreeMap<String, toml::Value>,
}

impl FileConfig {
    /// Loads the config file at [`config_path`], or an empty table if it
    /// doesn't exist.
    pub fn load() -> Result<Self, CliError> {
        let path = match config_path() {
            Some(p) => p,
            None => return Ok(Self::default()),
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| CliError::Config(format!("reading `{}`: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| CliError::Config(format!("parsing `{}`: {e}", path.display())))
    }

    /// Applies every entry to `engine` via `set`, in the table's iteration
    /// order. Returns one warning string per key `OptionState`/`EngineConfig`
    /// didn't recognize or accept; the caller decides whether to print them.
    pub fn apply(&self, engine: &mut cdeclish_engine::Engine) -> Vec<String> {
        let mut warnings = Vec::new();
        for (key, value) in &self.entries {
            let value = match value {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if let Err(e) = engine.set(key, &value) {
                warnings.push(format!("config: {e}"));
            }
        }
        warnings
    }
}

/// `$XDG_CONFIG_HOME/cdeclish/config.toml` (or the platform equivalent via
/// [`dirs::config_dir`]), unless `CDECLISH_CONFIG_PATH` overrides it.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CDECLISH_CONFIG_PATH") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|p| p.join("cdeclish").join("config.toml"))
}
