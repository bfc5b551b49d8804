//! chatwrap: turn an exported chat transcript into clean, ordered messages.

use std::process::ExitCode;

use chat_wrapped::cli;

fn main() -> ExitCode {
    // Logging is initialized by cli::run from --log-level and --log-format
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_data_error() {
                eprintln!("Expected lines such as: 31/12/23, 23:59 - Alice: happy new year");
            }

            if std::env::var("RUST_BACKTRACE").is_ok() {
                if let Some(source) = std::error::Error::source(&e) {
                    eprintln!("Caused by: {source}");
                }
            }

            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
