//! Module signatures: the `(inputs : outputs)` part of declarations and
//! instantiations.
//!
//! Signatures are read from expanded statements, where every vector and
//! constant has already been flattened into one component per bit, so the
//! component lists here line up one-to-one between a declaration and an
//! instantiation of it.

use vb_lexer_core::read_statements;

/// Head and flattened ports of a module statement.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ModuleSignature {
    /// Text before the `(`: the design name, or `design.instance`.
    pub head: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl ModuleSignature {
    /// Read `head(inputs : outputs)` with an optional trailing `;`.
    ///
    /// Commas, braces and whitespace all separate components. Returns
    /// `None` when the parentheses or the colon are missing.
    pub fn parse(text: &str) -> Option<ModuleSignature> {
        let text = text.trim();
        let text = text.strip_suffix(';').unwrap_or(text).trim_end();
        let open = text.find('(')?;
        let body = text[open + 1..].strip_suffix(')')?;
        let (inputs, outputs) = body.split_once(':')?;
        Some(ModuleSignature {
            head: text[..open].trim().to_owned(),
            inputs: components(inputs),
            outputs: components(outputs),
        })
    }

    /// `(inputs, outputs)` component counts.
    pub fn arity(&self) -> (usize, usize) {
        (self.inputs.len(), self.outputs.len())
    }

    /// Design and instance names of an instantiation head.
    pub fn instance(&self) -> Option<(&str, &str)> {
        self.head.split_once('.')
    }
}

fn components(list: &str) -> Vec<String> {
    list.split(|c: char| c == ',' || c == '{' || c == '}' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Find the module declaration of the design `name` in `source`.
///
/// Returns the declaration's line and text. Designs that can't be split
/// into statements have no usable declaration.
pub fn find_module_declaration(source: &str, name: &str) -> Option<(u32, String)> {
    let statements = read_statements(source).ok()?;
    statements.into_iter().find_map(|statement| {
        let rest = statement.text.trim_start().strip_prefix(name)?;
        rest.starts_with('(')
            .then(|| (statement.line, statement.text.to_owned()))
    })
}
