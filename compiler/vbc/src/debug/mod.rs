//! Pipeline dumps selected through the `VB_DEBUG` environment variable.
//!
//! `VB_DEBUG=statements,expanded` prints the typed statements and the
//! expanded statement text to stderr after every successful parse.
//! `VB_DEBUG=all` turns on every dump.

use std::sync::OnceLock;

use bitflags::bitflags;
use vb_eval::Design;

bitflags! {
    /// Intermediate stages to dump.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct DebugFlags: u8 {
        /// Typed statements with their source lines.
        const STATEMENTS = 1 << 0;
        /// Statement text after expansion.
        const EXPANDED = 1 << 1;
        /// Variables and stored expressions.
        const DATABASE = 1 << 2;
    }
}

impl DebugFlags {
    /// Parse a comma-separated list. Unknown names are ignored.
    pub fn parse_list(list: &str) -> DebugFlags {
        list.split(',')
            .map(str::trim)
            .fold(DebugFlags::empty(), |flags, name| {
                flags
                    | match name.to_ascii_lowercase().as_str() {
                        "statements" => DebugFlags::STATEMENTS,
                        "expanded" => DebugFlags::EXPANDED,
                        "database" | "db" => DebugFlags::DATABASE,
                        "all" => DebugFlags::all(),
                        _ => DebugFlags::empty(),
                    }
            })
    }
}

static DEBUG_FLAGS: OnceLock<DebugFlags> = OnceLock::new();

/// Flags from `VB_DEBUG`, read once per process.
pub fn debug_flags() -> DebugFlags {
    *DEBUG_FLAGS.get_or_init(|| {
        std::env::var("VB_DEBUG")
            .map(|value| DebugFlags::parse_list(&value))
            .unwrap_or_default()
    })
}

/// Text of every dump selected by `flags`.
pub fn dump(design: &Design, flags: DebugFlags) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    if flags.contains(DebugFlags::STATEMENTS) {
        let _ = writeln!(out, "== statements ({}) ==", design.name());
        for statement in design.statements() {
            let _ = writeln!(out, "{:>4}  {:?}", statement.line, statement.body);
        }
    }
    if flags.contains(DebugFlags::EXPANDED) {
        let _ = writeln!(out, "== expanded ({}) ==", design.name());
        for expanded in design.expanded() {
            let _ = writeln!(
                out,
                "{:>4}  {:?}  {}",
                expanded.line, expanded.kind, expanded.text
            );
        }
    }
    if flags.contains(DebugFlags::DATABASE) {
        let database = design.database();
        let _ = writeln!(out, "== database ({}) ==", design.name());
        for variable in design.export_state() {
            let _ = writeln!(out, "  {variable}  {}", variable.kind);
        }
        for expression in database.expressions() {
            let inputs = expression
                .stores
                .first()
                .and_then(|store| database.dependencies(store))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "{:>4}  {} <- {}",
                expression.line,
                expression.stores.join(", "),
                inputs.join(", ")
            );
        }
    }
    out
}

/// Print the dumps `VB_DEBUG` asks for to stderr.
pub fn dump_if_enabled(design: &Design) {
    let flags = debug_flags();
    if !flags.is_empty() {
        eprint!("{}", dump(design, flags));
    }
}
