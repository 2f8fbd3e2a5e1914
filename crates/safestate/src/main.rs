use std::process::ExitCode;

fn main() -> ExitCode {
    match safestate_lib::main() {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
