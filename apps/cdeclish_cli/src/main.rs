//! The `cdeclish` binary: parses argv, runs a session, and exits with the
//! `sysexits.h`-style code its error falls under (§6). Mirrors the
//! teacher's `largo` binary — a one-line call into the lib crate's
//! `run_cli` — but maps each error category to its own code instead of a
//! flat `1`.

fn main() {
    if let Err(e) = cdeclish_cli::run_cli() {
        eprintln!("cdeclish: {e}");
        std::process::exit(e.exit_code());
    }
}
