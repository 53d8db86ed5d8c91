//! The `run`, `click` and `tick` commands.

use vb_diagnostic::ErrorGuaranteed;
use vb_eval::{render_tokens, Design, Settings};

use super::{open_design, report_diagnostics};

/// What to do after the initial full parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Print the output of the full parse.
    Run,
    /// Click each variable in order.
    Click(Vec<String>),
    /// Advance the primary clock this many times.
    Tick(usize),
}

/// Parse `design`, apply `action` and return the rendered output.
pub fn simulate(design: &mut Design, action: &Action) -> Result<String, ErrorGuaranteed> {
    let mut tokens = design.parse()?;
    crate::debug::dump_if_enabled(design);
    match action {
        Action::Run => {}
        Action::Click(names) => {
            for name in names {
                tokens = design.parse_click(name)?;
            }
        }
        Action::Tick(count) => tokens = design.tick_n(*count)?,
    }
    Ok(render_tokens(&tokens))
}

/// Open the design at `path`, simulate it and print the output.
pub fn simulate_file(path: &str, settings: Settings, action: &Action) {
    let mut design = open_design(path, settings);
    match simulate(&mut design, action) {
        Ok(output) => {
            report_diagnostics(path, design.diagnostics());
            print!("{output}");
        }
        Err(_) => {
            report_diagnostics(path, design.diagnostics());
            std::process::exit(1);
        }
    }
}
