use colored::Colorize;
use memfs::FileSystemError;
use memfs::scenario::{Operation, Outcome};
use supports_color::Stream;

/// Turns coloured output off when stdout cannot display it.
pub fn configure_colors() {
    if supports_color::on(Stream::Stdout).is_none() {
        colored::control::set_override(false);
    }
}

pub fn print_success(operation: &Operation, outcome: &Outcome) {
    println!("{} {} {}", "ok".green().bold(), operation, outcome.to_string().dimmed());
}

pub fn print_failure(operation: &Operation, error: &FileSystemError) {
    println!(
        "{} {} {} (errno {})",
        "err".red().bold(),
        operation,
        error.to_string().red(),
        error.errno()
    );
}
