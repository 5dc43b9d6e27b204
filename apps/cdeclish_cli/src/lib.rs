//! # cdeclish-cli
//!
//! The interactive front-end for `cdeclish-engine`: a `rustyline`-backed
//! REPL, a non-interactive `--file` runner, and the config-file/flag layer
//! that assembles an [`cdeclish_engine::Engine`]'s starting
//! [`cdeclish_engine::EngineConfig`] before the first command runs.
//!
//! Mirrors `logicaffeine_cli::run_cli`'s split: [`main.rs`] stays a thin
//! wrapper that prints an error and exits with the matching code;
//! everything else lives here so it can be driven from a test without
//! spawning a process.

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod repl;

use clap::Parser;
use std::fs;
use std::io::Write;

use cdeclish_engine::Engine;
use cli::Cli;
use error::CliError;

/// Parses argv, assembles an [`Engine`], and runs either a one-shot
/// command, a `--file` script, or the interactive REPL.
pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut engine = if cli.no_typedefs { Engine::without_predefined() } else { Engine::new() };

    if !cli.no_config {
        let file_config = config::FileConfig::load()?;
        for warning in file_config.apply(&mut engine) {
            eprintln!("warning: {warning}");
        }
    }
    for (key, value) in cli.option_overrides() {
        engine.set(key, &value)?;
    }

    let mut output: Box<dyn Write> = match &cli.output {
        Some(path) => {
            let file = fs::File::create(path)
                .map_err(|source| CliError::CannotCreateOutput { path: path.clone(), source })?;
            Box::new(file)
        }
        None => Box::new(std::io::stdout()),
    };

    if let Some(path) = &cli.file {
        let script = fs::read_to_string(path)
            .map_err(|source| CliError::MissingInput { path: path.clone(), source })?;
        let color = engine.config().opts.color;
        let all_ok = repl::run_script(&mut engine, &script, color, &mut output)
            .map_err(|source| CliError::CannotCreateOutput { path: cli.output.clone().unwrap_or_default(), source })?;
        return if all_ok { Ok(()) } else { Err(CliError::ScriptHadErrors) };
    }

    if !cli.words.is_empty() {
        let joined = cli.words.join(" ");
        let line = if cli.explain { format!("explain {joined}") } else { joined };
        let result = engine.execute(line.trim())?;
        if !result.is_empty() {
            writeln!(output, "{result}").map_err(|source| CliError::CannotCreateOutput {
                path: cli.output.clone().unwrap_or_default(),
                source,
            })?;
        }
        return Ok(());
    }

    repl::run(&mut engine, cli.no_prompt).map_err(|source| CliError::CannotCreateOutput {
        path: cli.output.clone().unwrap_or_default(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_explain_flag_wraps_trailing_words() {
        let cli = Cli::parse_from(["cdeclish", "--explain", "int", "*x"]);
        run(cli).unwrap();
    }

    #[test]
    fn one_shot_without_explain_runs_a_full_command() {
        let cli = Cli::parse_from(["cdeclish", "declare", "x", "as", "int"]);
        run(cli).unwrap();
    }

    #[test]
    fn missing_file_reports_exit_code_66() {
        let cli = Cli::parse_from(["cdeclish", "--file=/no/such/path.cdecl"]);
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 66);
    }
}
