//! Command-line argument surface (§6).
//!
//! Unlike `largo`, there is no [`clap::Subcommand`] enum here:
//! every REPL command (`declare`, `cast`, `explain`, `typedef`, `show`,
//! `set`, `help`) is parsed by [`cdeclish_engine::Engine::execute`] itself,
//! the same whether it arrives from an interactive line, a `--file` script,
//! or the trailing words of the process's own argv. [`Cli`] therefore only
//! owns the *session* flags — dialect, rendering options, input/output
//! redirection — plus one [`Vec<String>`] holding whatever trailed them.

use clap::Parser;
use std::path::PathBuf;

/// Session flags for `cdeclish`. Trailing words (anything after the last
/// recognized flag) are joined into a one-shot command line; with none
/// given, and no `--file`, the process starts an interactive REPL.
#[derive(Parser, Debug)]
#[command(name = "cdeclish")]
#[command(about = "Bidirectional translator between C/C++ declarations and the cdeclish English DSL")]
#[command(version)]
pub struct Cli {
    /// Starting dialect, e.g. `c17`, `c++20`, `knr`.
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// When to emit ANSI color: always, auto (default), isatty, never,
    /// not_file, not_isreg, tty.
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Place `const`/`volatile` after the type atom or indirection they
    /// qualify, instead of before it.
    #[arg(long)]
    pub east_const: bool,

    /// Treat the trailing words as a C/C++ declaration to explain, rather
    /// than a full `command ...` line.
    #[arg(long)]
    pub explain: bool,

    /// Width/signedness combinations that always spell out `int`, e.g.
    /// `unsigned,short`.
    #[arg(long, value_name = "FMT")]
    pub explicit_int: Option<String>,

    /// Tag kinds (`struct`, `class`, `union`, `enum`) that always keep
    /// their keyword in a declaration.
    #[arg(long, value_name = "FMT")]
    pub explicit_ecsu: Option<String>,

    /// Rewrite `[`/`]`/`{`/`}` as their digraph spellings on output.
    #[arg(long)]
    pub digraphs: bool,

    /// Rewrite `[`/`]`/`{`/`}`/`#` as their trigraph spellings on output.
    #[arg(long)]
    pub trigraphs: bool,

    /// Use `bitand`/`bitor`/... in place of `&`/`|`/... where they appear.
    #[arg(long)]
    pub alt_tokens: bool,

    /// Suppress the interactive prompt (still reads one command per line).
    #[arg(long)]
    pub no_prompt: bool,

    /// Omit the trailing `;` from rendered declarations.
    #[arg(long)]
    pub no_semicolon: bool,

    /// Start with an empty typedef table instead of the predefined one.
    #[arg(long)]
    pub no_typedefs: bool,

    /// Skip loading the on-disk config file.
    #[arg(long)]
    pub no_config: bool,

    /// Read commands from this file, one per line, instead of stdin.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Write output to this path instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// A one-shot command (or, with `--explain`, a bare declaration).
    #[arg(trailing_var_arg = true)]
    pub words: Vec<String>,
}

impl Cli {
    /// Folds every session flag into the `(key, value)` pairs
    /// [`cdeclish_engine::Engine::set`] expects, in the order `--language`
    /// should be applied before the narrower per-feature flags (so a later
    /// flag's dialect-gated value still wins if the two disagree).
    pub fn option_overrides(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(lang) = &self.language {
            out.push(("language", lang.clone()));
        }
        out.push(("color", self.color.clone()));
        if self.east_const {
            out.push(("east-const", "true".to_string()));
        }
        if let Some(fmt) = &self.explicit_int {
            out.push(("explicit-int", fmt.clone()));
        }
        if let Some(fmt) = &self.explicit_ecsu {
            out.push(("explicit-ecsu", fmt.clone()));
        }
        if self.digraphs {
            out.push(("graphs", "digraphs".to_string()));
        }
        if self.trigraphs {
            out.push(("graphs", "trigraphs".to_string()));
        }
        if self.alt_tokens {
            out.push(("alt-tokens", "true".to_string()));
        }
        if self.no_semicolon {
            out.push(("semicolon", "false".to_string()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_session_flags_and_trailing_words() {
        let cli = Cli::parse_from(["cdeclish", "--language=c11", "--east-const", "explain", "int", "x"]);
        assert_eq!(cli.language.as_deref(), Some("c11"));
        assert!(cli.east_const);
        assert_eq!(cli.words, vec!["explain", "int", "x"]);
    }

    #[test]
    fn option_overrides_include_language_and_east_const() {
        let cli = Cli::parse_from(["cdeclish", "--language=c11", "--east-const"]);
        let overrides = cli.option_overrides();
        assert!(overrides.contains(&("language", "c11".to_string())));
        assert!(overrides.contains(&("east-const", "true".to_string())));
    }
}
