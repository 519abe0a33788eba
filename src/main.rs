//! mergefield CLI entry point
//!
//! Parses the command line, runs the command and turns failures into colored,
//! user-friendly messages with a non-zero exit status.
//!
//! - `render` - Merge a record into a template
//! - `fields` - Print the fields a template needs fetched
//! - `check` - Validate dotted field paths against a schema

use anyhow::Result;
use clap::Parser;
use mergefield_cli::cli;
use mergefield_cli::core::user_friendly_error;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to user-friendly error with context and suggestions
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
