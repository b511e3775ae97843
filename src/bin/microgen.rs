use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = microgen::logging::init_logging() {
        eprintln!("Warning: {e:#}");
    }

    match microgen::cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
