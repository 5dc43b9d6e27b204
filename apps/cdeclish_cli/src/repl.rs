//! The interactive loop: reads one line at a time with `rustyline`'s line
//! editing and history, feeds each to [`cdeclish_engine::Engine::execute`],
//! and prints the result or a colored diagnostic. `exit`/`quit`/`q` end the
//! session without going through the engine, since they have no AST to
//! produce (§6 lists them alongside the engine's own commands, but they are
//! purely a front-end concern).

use cdeclish_engine::Engine;
use cdeclish_options::ColorMode;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;

use crate::color;

const EXIT_WORDS: &[&str] = &["exit", "quit", "q"];

/// Runs the interactive loop until the user ends the session (`exit`,
/// `Ctrl-D`, `Ctrl-C`) or a command aborts with an internal error.
pub fn run(engine: &mut Engine, no_prompt: bool) -> std::io::Result<()> {
    let mut rl = DefaultEditor::new().map_err(to_io_error)?;
    let color = color::enabled(engine.config().opts.color);

    loop {
        let prompt = if no_prompt { String::new() } else { engine.config().prompt.clone() };
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(to_io_error(e)),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(trimmed);

        if trimmed == "?" || EXIT_WORDS.contains(&trimmed) {
            break;
        }

        if engine.config().echo_commands {
            println!("{trimmed}");
        }

        match engine.execute(trimmed) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}");
                }
            }
            Err(e) => {
                eprintln!("{}", color::bold_red(&format!("error: {e}"), color));
            }
        }
        std::io::stdout().flush()?;
    }
    Ok(())
}

fn to_io_error(e: ReadlineError) -> std::io::Error {
    std::io::Error::other(e)
}

/// `--file PATH`: runs every non-blank, non-comment line through the engine
/// in order, writing each result (or diagnostic) to `out`. Unlike the
/// interactive loop, a single command's failure doesn't end the run — the
/// rest of the script still executes, the way a non-interactive test
/// transcript expects every line's outcome to be visible.
pub fn run_script(engine: &mut Engine, script: &str, color: ColorMode, out: &mut impl Write) -> std::io::Result<bool> {
    let color = color::enabled(color);
    let mut all_ok = true;
    for line in script.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if EXIT_WORDS.contains(&trimmed) || trimmed == "?" {
            break;
        }
        if engine.config().echo_commands {
            writeln!(out, "{trimmed}")?;
        }
        match engine.execute(trimmed) {
            Ok(output) => {
                if !output.is_empty() {
                    writeln!(out, "{output}")?;
                }
            }
            Err(e) => {
                all_ok = false;
                writeln!(out, "{}", color::bold_red(&format!("error: {e}"), color))?;
            }
        }
    }
    Ok(all_ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_runs_every_line_and_reports_overall_success() {
        let mut engine = Engine::new();
        let mut out = Vec::new();
        let ok = run_script(&mut engine, "explain int *x\ndeclare y as int\n", ColorMode::Never, &mut out).unwrap();
        assert!(ok);
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("declare x as pointer to int"));
        assert!(rendered.contains("int y;"));
    }

    #[test]
    fn script_keeps_going_after_a_failing_line() {
        let mut engine = Engine::new();
        let mut out = Vec::new();
        let ok = run_script(&mut engine, "bogus\nexplain int x\n", ColorMode::Never, &mut out).unwrap();
        assert!(!ok);
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("unknown command"));
        assert!(rendered.contains("declare x as int"));
    }
}
