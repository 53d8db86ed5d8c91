//! The `check` command: parse a design and report every diagnostic.

use super::{open_design, report_diagnostics};
use vb_eval::Settings;

/// Parse a design without printing its output. Exits with code 1 when the
/// parse fails.
pub fn check_file(path: &str, settings: Settings) {
    let mut design = open_design(path, settings);
    let result = design.parse();
    report_diagnostics(path, design.diagnostics());
    crate::debug::dump_if_enabled(&design);

    if result.is_err() {
        std::process::exit(1);
    }
    println!("{path}: ok ({} statements)", design.statements().len());
}
