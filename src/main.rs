//! Binary entrypoint for the `treesum` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match treesum::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(treesum::Error::Usage(err)) => {
            // Prints help/version to stdout and real usage errors to stderr.
            let _ = err.print();
            if err.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
