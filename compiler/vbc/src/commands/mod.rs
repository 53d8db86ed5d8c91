//! Command handlers for the `vb` CLI.
//!
//! Each submodule implements one command. Option parsing and the shared
//! open/report helpers live here in the module root.

use std::path::Path;

use vb_diagnostic::Diagnostic;
use vb_eval::{CycleDetection, Design, Settings};

mod check;
mod explain;
mod simulate;

pub use check::check_file;
pub use explain::explain_error;
pub use simulate::{simulate, simulate_file, Action};

/// Options shared by every command that opens a design.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub settings: Settings,
    /// Positional arguments in order (the design path first).
    pub positional: Vec<String>,
}

/// Split command arguments into settings flags and positional arguments.
///
/// Unknown flags are reported through `Err` with the offending argument.
pub fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    for arg in args {
        if arg == "--comments" {
            options.settings = options.settings.with_simulation_comments(true);
        } else if arg == "--no-semicolons" {
            options.settings.output_semicolons = false;
        } else if let Some(value) = arg.strip_prefix("--cycles=") {
            let Some(mode) = CycleDetection::from_flag(value) else {
                return Err(arg.clone());
            };
            options.settings = options.settings.with_cycle_detection(mode);
        } else if let Some(value) = arg.strip_prefix("--max-depth=") {
            let depth = value.parse().map_err(|_| arg.clone())?;
            options.settings = options.settings.with_max_submodule_depth(depth);
        } else if arg.starts_with('-') && arg.len() > 1 {
            return Err(arg.clone());
        } else {
            options.positional.push(arg.clone());
        }
    }
    Ok(options)
}

/// Open a design file, exiting with a diagnostic on failure.
pub(crate) fn open_design(path: &str, settings: Settings) -> Design {
    match Design::from_file(Path::new(path), settings) {
        Ok(design) => design,
        Err(error) => {
            report_diagnostics(path, std::iter::once(&error.to_diagnostic()));
            std::process::exit(1);
        }
    }
}

/// Format one diagnostic the way the CLI prints it.
pub fn format_diagnostic(path: &str, diagnostic: &Diagnostic) -> String {
    let mut text = match diagnostic.line {
        Some(line) => format!(
            "{}[{}]: {path}:{line}: {}",
            diagnostic.severity, diagnostic.code, diagnostic.message
        ),
        None => format!(
            "{}[{}]: {path}: {}",
            diagnostic.severity, diagnostic.code, diagnostic.message
        ),
    };
    for note in &diagnostic.notes {
        text.push_str("\n  = note: ");
        text.push_str(note);
    }
    text
}

pub(crate) fn report_diagnostics<'a>(
    path: &str,
    diagnostics: impl IntoIterator<Item = &'a Diagnostic>,
) {
    for diagnostic in diagnostics {
        eprintln!("{}", format_diagnostic(path, diagnostic));
    }
}
