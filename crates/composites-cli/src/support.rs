use crate::config::InputFile;
use serde::Serialize;
use std::fmt::Display;

pub fn exit_with(message: impl Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

pub fn or_exit<T, E: Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| exit_with(e))
}

pub fn load_input_or_exit(path: &str) -> InputFile {
    tracing::debug!(path, "loading input file");
    or_exit(InputFile::load(path))
}

pub fn print_json_or_exit<T: Serialize>(value: &T) {
    let rendered = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| exit_with(format!("failed to render JSON: {e}")));
    println!("{rendered}");
}
