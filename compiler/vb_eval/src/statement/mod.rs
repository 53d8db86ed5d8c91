//! Statement variants and how each one renders.
//!
//! Statements are built once per full parse from the expanded source and
//! never change the dependency graph afterwards. Rendering only reads
//! variable values; running a submodule is the one operation that writes
//! them.

use vb_diagnostic::Diagnostic;
use vb_lexer_core::lexeme::{self, Format};
use vb_lexer_core::RawTag;
use vb_parse::{pieces, CommentVisibility, Piece};

use crate::database::Database;
use crate::design::Subdesign;
use crate::errors;
use crate::expr::{self, Rhs};
use crate::{Design, OutputToken, Settings, VariableKind};

/// Output slot of an instantiation that isn't connected to anything.
pub const NO_CONTACT: &str = "NC";

/// One expanded statement of a design.
#[derive(Clone, Debug)]
pub struct Statement {
    pub line: u32,
    /// Expanded text without the terminating `;`.
    pub text: String,
    pub body: StatementBody,
}

#[derive(Clone, Debug)]
pub enum StatementBody {
    /// Index of the statement's stored expression.
    Boolean { expression: usize },
    Clock { expression: usize },
    /// A format specifier statement such as `%h{a3 a2 a1 a0}`.
    Display,
    Submodule(Submodule),
    Module,
    VariableList,
    Comment {
        visibility: CommentVisibility,
        spacing: String,
        text: String,
    },
    Empty,
    Library,
}

impl Statement {
    pub fn render(&self, db: &Database, settings: &Settings, out: &mut Vec<OutputToken>) {
        match &self.body {
            StatementBody::Boolean { expression } | StatementBody::Clock { expression } => {
                let groups = match db.expression(*expression).map(|stored| &stored.assignment.rhs) {
                    Some(Rhs::Logic(logic)) => logic.group_values(&|name| db.get_value(name)),
                    _ => Vec::new(),
                };
                render_text(&self.text, db, Some(&groups), out);
            }
            StatementBody::Display => render_display(&self.text, db, out),
            StatementBody::Module => render_module(&self.text, db, out),
            StatementBody::Submodule(submodule) => submodule.render(&self.text, db, out),
            StatementBody::VariableList => render_text(&self.text, db, None, out),
            StatementBody::Comment {
                visibility,
                spacing,
                text,
            } => {
                let shown = match visibility {
                    CommentVisibility::Shown => true,
                    CommentVisibility::Hidden => false,
                    CommentVisibility::Simulation => settings.simulation_comments,
                };
                if shown {
                    if !spacing.is_empty() {
                        out.push(OutputToken::Spacing(spacing.chars().count()));
                    }
                    out.push(OutputToken::Comment(text.clone()));
                    out.push(OutputToken::LineBreak);
                }
                return;
            }
            StatementBody::Empty => {
                out.push(OutputToken::LineBreak);
                return;
            }
            StatementBody::Library => return,
        }
        if settings.output_semicolons {
            out.push(OutputToken::Punctuation(";".to_owned()));
        }
        out.push(OutputToken::LineBreak);
    }
}

// === Submodules ===

/// An instantiation `design.instance(inputs : outputs)`.
#[derive(Clone, Debug)]
pub struct Submodule {
    pub design: String,
    pub instance: String,
    /// Parent-side input bits: variables or `0`/`1`.
    pub inputs: Vec<String>,
    /// Parent-side output variables, [`NO_CONTACT`] for unconnected slots.
    pub outputs: Vec<String>,
    /// Child values of the unconnected outputs from the last run.
    no_contact: Vec<bool>,
}

impl Submodule {
    pub fn new(
        design: String,
        instance: String,
        inputs: Vec<String>,
        outputs: Vec<String>,
    ) -> Self {
        Submodule {
            design,
            instance,
            inputs,
            outputs,
            no_contact: Vec::new(),
        }
    }

    /// Current values of the inputs in the parent.
    pub fn input_values(&self, db: &Database) -> Vec<bool> {
        let lookup = |name: &str| db.get_value(name);
        self.inputs
            .iter()
            .map(|token| expr::bit(token).is_ok_and(|bit| bit.value(&lookup)))
            .collect()
    }

    /// Evaluate a fresh instance of the child design with the current inputs
    /// and write its outputs back into `db`.
    ///
    /// On failure the child's diagnostics are returned, each noting which
    /// design it came from.
    pub(crate) fn run(
        &mut self,
        subdesign: &Subdesign,
        db: &mut Database,
        settings: &Settings,
        depth: u32,
        line: u32,
    ) -> Result<(), Vec<Diagnostic>> {
        if depth >= settings.max_submodule_depth {
            return Err(vec![errors::nesting_too_deep(
                settings.max_submodule_depth,
                line,
            )]);
        }

        let inputs = self.input_values(db);
        let mut child = Design::from_source(
            &self.design,
            subdesign.dir(),
            subdesign.source.clone(),
            *settings,
        )
        .nested(depth + 1);
        let outputs = vb_stack::ensure_sufficient_stack(|| child.parse_as_module(&inputs))
            .map_err(|_| {
                let note = errors::in_design_note(&self.design);
                child
                    .diagnostics()
                    .map(|diagnostic| diagnostic.clone().with_note(note.clone()))
                    .collect::<Vec<_>>()
            })?;
        tracing::debug!(instance = %self.instance, ?inputs, ?outputs, "submodule ran");

        self.no_contact.clear();
        for (name, value) in self.outputs.iter().zip(outputs) {
            if name == NO_CONTACT {
                self.no_contact.push(value);
                continue;
            }
            db.set_value(name, value)
                .map_err(|error| vec![errors::from_database(&error, line)])?;
        }
        Ok(())
    }

    fn render(&self, text: &str, db: &Database, out: &mut Vec<OutputToken>) {
        let start = out.len();
        render_module(text, db, out);
        let mut recorded = self.no_contact.iter().copied();
        for token in &mut out[start..] {
            if let OutputToken::Variable {
                name, value, kind, ..
            } = token
            {
                if name == NO_CONTACT {
                    *value = recorded.next().unwrap_or(false);
                    *kind = VariableKind::Dependent;
                }
            }
        }
    }
}

// === Rendering ===

/// Render statement text token by token with live values.
///
/// `groups` holds the value of each parenthesized group by `(` order. For
/// statements without groups, parentheses render as punctuation.
fn render_text(text: &str, db: &Database, groups: Option<&[bool]>, out: &mut Vec<OutputToken>) {
    let mut next_group = 0;
    let mut open = Vec::new();
    for piece in pieces(text) {
        match (piece.tag, groups) {
            (RawTag::LeftParen, Some(groups)) => {
                let value = groups.get(next_group).copied().unwrap_or(false);
                open.push(value);
                next_group += 1;
                out.push(OutputToken::Parenthesis { text: '(', value });
            }
            (RawTag::RightParen, Some(_)) => {
                let value = open.pop().unwrap_or(false);
                out.push(OutputToken::Parenthesis { text: ')', value });
            }
            _ => render_piece(&piece, db, out),
        }
    }
}

fn render_piece(piece: &Piece<'_>, db: &Database, out: &mut Vec<OutputToken>) {
    let token = match piece.tag {
        RawTag::Whitespace => OutputToken::Spacing(piece.text.chars().count()),
        RawTag::Newline => OutputToken::LineBreak,
        RawTag::Lexeme => lexeme_token(piece.text, db),
        tag => OutputToken::Punctuation(tag.lexeme().unwrap_or(piece.text).to_owned()),
    };
    out.push(token);
}

fn lexeme_token(text: &str, db: &Database) -> OutputToken {
    if lexeme::operator(text).is_some() {
        return OutputToken::Operator(text.to_owned());
    }
    if let Some(scalar) = lexeme::scalar(text) {
        let negated = scalar.markers.is_negated();
        let variable = db.variable(scalar.ident);
        return OutputToken::Variable {
            name: scalar.ident.to_owned(),
            value: variable.is_some_and(|v| v.value) ^ negated,
            negated,
            kind: variable.map_or(VariableKind::Independent, |v| v.kind),
        };
    }
    match expr::bit(text) {
        Ok(bit) if bit.name.is_none() => OutputToken::Constant {
            text: text.to_owned(),
            value: bit.value(&|_| false),
        },
        _ => OutputToken::Operator(text.to_owned()),
    }
}

/// Declarations and instantiations: the head up to `(` is one token.
fn render_module(text: &str, db: &Database, out: &mut Vec<OutputToken>) {
    let Some(open) = text.find('(') else {
        render_text(text, db, None, out);
        return;
    };
    let head = &text[..open];
    let name = head.trim_start();
    let indent = head.len() - name.len();
    if indent > 0 {
        render_text(&head[..indent], db, None, out);
    }
    out.push(OutputToken::Instantiation(format!("{}(", name.trim_end())));
    render_text(&text[open + 1..], db, None, out);
}

fn render_display(text: &str, db: &Database, out: &mut Vec<OutputToken>) {
    let all = pieces(text);
    let mut index = 0;
    while index < all.len() {
        let piece = &all[index];
        let format = piece
            .is_lexeme()
            .then(|| lexeme::formatter(piece.text))
            .flatten();
        let Some(format) = format else {
            render_piece(piece, db, out);
            index += 1;
            continue;
        };

        let mut members = Vec::new();
        index += 1;
        if all.get(index).is_some_and(|next| next.tag == RawTag::LeftBrace) {
            index += 1;
            while let Some(member) = all.get(index) {
                index += 1;
                match member.tag {
                    RawTag::RightBrace => break,
                    RawTag::Lexeme => members.push(member.text),
                    _ => {}
                }
            }
        }
        out.push(formatter_token(format, &members, db));
    }
}

fn formatter_token(format: Format, members: &[&str], db: &Database) -> OutputToken {
    let lookup = |name: &str| db.get_value(name);
    let mut bits = Vec::with_capacity(members.len());
    let mut variables = Vec::with_capacity(members.len());
    let mut clickable = !members.is_empty();
    for member in members {
        match expr::bit(member) {
            Ok(bit) => {
                bits.push(bit.value(&lookup));
                match &bit.name {
                    Some(name) if !bit.negated => {
                        clickable &= db
                            .variable(name)
                            .is_some_and(|v| v.kind.is_independent());
                        variables.push(name.clone());
                    }
                    _ => clickable = false,
                }
            }
            Err(_) => clickable = false,
        }
    }
    OutputToken::Formatter {
        display: format_bits(format, &bits),
        next_value: clickable.then(|| next_value(&bits)),
        variables,
    }
}

// === Formatting ===

/// Unsigned value of `bits`, most significant first. Bits beyond 128 are
/// shifted out.
fn unsigned(bits: &[bool]) -> u128 {
    bits.iter()
        .fold(0u128, |acc, &bit| (acc << 1) | u128::from(bit))
}

/// Render `bits` in `format`. Decimal is two's complement over the width;
/// hex is uppercase without padding.
pub fn format_bits(format: Format, bits: &[bool]) -> String {
    match format {
        Format::Binary => bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect(),
        Format::Unsigned => unsigned(bits).to_string(),
        Format::Hex => format!("{:X}", unsigned(bits)),
        Format::Decimal => {
            let value = unsigned(bits);
            match bits.first() {
                Some(true) if bits.len() < 128 => {
                    let modulus = 1u128 << bits.len();
                    format!("-{}", modulus - value)
                }
                _ => value.to_string(),
            }
        }
    }
}

/// Binary text of `bits + 1`, wrapping at the same width.
pub fn next_value(bits: &[bool]) -> String {
    let mut next = bits.to_vec();
    for bit in next.iter_mut().rev() {
        *bit = !*bit;
        if *bit {
            break;
        }
    }
    format_bits(Format::Binary, &next)
}
