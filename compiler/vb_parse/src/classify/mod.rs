//! Statement classification.
//!
//! Decides what kind of statement a piece of source is and rejects anything
//! the grammar doesn't allow. Classification works on one statement at a
//! time, left to right, tracking:
//! - a grouping stack for `()` and `{}` (`{}` never nests, `()` never
//!   appears inside `{}`)
//! - a [`Scope`] telling whether the scan is inside a module parameter
//!   list, a formatter's concatenation, or any concatenation
//! - the statement kind decided so far
//!
//! Scalars and vectors claim their names in the [`Namespace`] as they are
//! seen, so a design that uses `a` both ways fails on the second use.

use bitflags::bitflags;
use vb_diagnostic::Diagnostic;
use vb_lexer_core::lexeme::{self, Constant, Markers, Operator, Radix, Scalar, Vector};
use vb_lexer_core::{RawTag, SourceStatement};

use crate::errors;
use crate::{pieces, Namespace, NamespaceEntry, NamespaceError, Piece};

/// Highest bit index a scalar or vector may use.
pub const MAX_BIT: u32 = 31;

/// Widest constant, in bits.
pub const MAX_CONSTANT_WIDTH: u32 = 32;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StatementKind {
    /// `x = expr;`
    Boolean,
    /// `x <= expr;` or `x <=@clk expr;`
    Clock,
    /// `"text";`, optionally flagged with `+` or `-`
    Comment,
    /// A blank line.
    Empty,
    /// `%h{...}` display statements.
    FormatSpecifier,
    /// `#library path;`
    Library,
    /// The design's own `name(inputs : outputs);`
    Module,
    /// `design.instance(inputs : outputs);`
    Submodule,
    /// Anything else: a list of variables to show (and set with `*`).
    VariableList,
}

impl StatementKind {
    /// Statements that never name a variable.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            StatementKind::Comment | StatementKind::Empty | StatementKind::Library
        )
    }

    pub fn is_assignment(self) -> bool {
        matches!(self, StatementKind::Boolean | StatementKind::Clock)
    }

    pub fn is_module(self) -> bool {
        matches!(self, StatementKind::Module | StatementKind::Submodule)
    }
}

/// A statement together with its decided kind.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Classified<'a> {
    pub kind: StatementKind,
    /// Statement text, including the terminating `;`.
    pub text: &'a str,
    /// Line of the statement's first character.
    pub line: u32,
}

/// Classify one statement, claiming its names in `namespace`.
///
/// `design_name` is the file name of the design without its extension; a
/// statement starting with `design_name(` is the module declaration.
pub fn classify<'a>(
    statement: &SourceStatement<'a>,
    design_name: &str,
    namespace: &mut Namespace,
) -> Result<Classified<'a>, Diagnostic> {
    let text = statement.text;
    let kind = if statement.is_blank() {
        StatementKind::Empty
    } else if comment_parts(text).is_some() {
        StatementKind::Comment
    } else if library_path(text).is_some() {
        StatementKind::Library
    } else {
        Classifier::new(design_name, namespace, statement.line).run(text)?
    };
    tracing::trace!(line = statement.line, ?kind, "classified");
    Ok(Classified {
        kind,
        text,
        line: statement.line,
    })
}

// === Statement-level forms ===

/// Who gets to see a comment.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CommentVisibility {
    /// `-"..."`: never shown.
    Hidden,
    /// `+"..."`: always shown.
    Shown,
    /// `"..."`: shown when simulation comments are on.
    Simulation,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CommentParts<'a> {
    pub visibility: CommentVisibility,
    /// Whitespace in front of the comment, kept for layout.
    pub spacing: &'a str,
    pub text: &'a str,
}

/// Split `[spacing][+|-]"text";` into its parts. The `;` is optional.
pub fn comment_parts(statement: &str) -> Option<CommentParts<'_>> {
    let statement = statement.strip_suffix(';').unwrap_or(statement);
    let body = statement.trim_start();
    let spacing = &statement[..statement.len() - body.len()];
    let (visibility, body) = match body.as_bytes().first()? {
        b'+' => (CommentVisibility::Shown, &body[1..]),
        b'-' => (CommentVisibility::Hidden, &body[1..]),
        _ => (CommentVisibility::Simulation, body),
    };
    let text = body.strip_prefix('"')?.strip_suffix('"')?;
    (!text.contains('\n')).then_some(CommentParts {
        visibility,
        spacing,
        text,
    })
}

/// The path of a `#library path;` statement. The `;` is optional.
pub fn library_path(statement: &str) -> Option<&str> {
    let rest = statement.trim_start().strip_prefix("#library")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let path = rest.strip_suffix(';').unwrap_or(rest).trim();
    (!path.is_empty() && !path.contains(char::is_whitespace)).then_some(path)
}

// === Token-level classification ===

bitflags! {
    /// Where in the statement the scan currently is.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Scope: u8 {
        /// Inside the `(...)` of a module declaration or instantiation.
        const MODULE = 1 << 0;
        /// Inside the `{...}` right after a formatter.
        const FORMAT = 1 << 1;
        /// Inside any `{...}`.
        const CONCAT = 1 << 2;
    }
}

struct Classifier<'c> {
    design_name: &'c str,
    namespace: &'c mut Namespace,
    line: u32,
    kind: Option<StatementKind>,
    scope: Scope,
    groups: Vec<char>,
    /// `groups.len()` while directly inside the module parameter list.
    module_depth: Option<usize>,
    module_closed: bool,
    expect_module_paren: bool,
    expect_format_concat: bool,
    colon_seen: bool,
    /// Top-level items (variables or concatenations) before any assignment.
    lhs_items: usize,
    lhs_vars: usize,
    lhs_constant: bool,
    star: bool,
    /// Variables seen outside a formatter before the statement kind was known.
    plain_vars: bool,
    logic: bool,
    math: bool,
    parens: bool,
    last_was_operand: bool,
    last_op: String,
    assignment: String,
}

impl<'c> Classifier<'c> {
    fn new(design_name: &'c str, namespace: &'c mut Namespace, line: u32) -> Self {
        Classifier {
            design_name,
            namespace,
            line,
            kind: None,
            scope: Scope::empty(),
            groups: Vec::new(),
            module_depth: None,
            module_closed: false,
            expect_module_paren: false,
            expect_format_concat: false,
            colon_seen: false,
            lhs_items: 0,
            lhs_vars: 0,
            lhs_constant: false,
            star: false,
            plain_vars: false,
            logic: false,
            math: false,
            parens: false,
            last_was_operand: false,
            last_op: String::new(),
            assignment: String::new(),
        }
    }

    fn run(mut self, text: &str) -> Result<StatementKind, Diagnostic> {
        let mut significant = Vec::new();
        let mut line = self.line;
        for piece in pieces(text) {
            match piece.tag {
                RawTag::Newline => line += 1,
                RawTag::Whitespace => {}
                _ => significant.push((piece, line)),
            }
        }

        for (i, &(piece, line)) in significant.iter().enumerate() {
            self.line = line;
            let next = significant.get(i + 1).map(|&(next, _)| next);
            if self.module_closed && piece.tag != RawTag::Semicolon {
                return Err(self.invalid_module());
            }
            match piece.tag {
                RawTag::Semicolon if i + 1 != significant.len() => {
                    return Err(errors::misplaced_semicolon(line));
                }
                RawTag::InvalidByte | RawTag::InteriorNull => {
                    return Err(errors::invalid_character(line, piece.text));
                }
                RawTag::LeftParen => self.open_paren()?,
                RawTag::RightParen => self.close_paren()?,
                RawTag::LeftBrace => self.open_brace()?,
                RawTag::RightBrace => self.close_brace()?,
                RawTag::Comma => self.comma()?,
                RawTag::Colon => self.colon()?,
                RawTag::Lexeme => self.lexeme(i, piece, next)?,
                RawTag::Semicolon | RawTag::Whitespace | RawTag::Newline | RawTag::Eof => {}
            }
        }
        self.finish()
    }

    fn finish(self) -> Result<StatementKind, Diagnostic> {
        if let Some(&open) = self.groups.last() {
            return Err(errors::unclosed_group(self.line, open));
        }
        match self.kind {
            Some(StatementKind::Module | StatementKind::Submodule) if !self.module_closed => {
                return Err(self.invalid_module());
            }
            Some(StatementKind::Boolean | StatementKind::Clock) => {
                if !self.last_was_operand {
                    return Err(if self.last_op == self.assignment {
                        errors::missing_expression(self.line, &self.assignment)
                    } else {
                        errors::dangling_operator(self.line, &self.last_op)
                    });
                }
                if self.math && self.parens {
                    return Err(errors::mixed_operators(self.line));
                }
            }
            _ => {}
        }
        if self.star && self.kind.is_some() {
            return Err(errors::star_outside_list(self.line));
        }
        Ok(self.kind.unwrap_or(StatementKind::VariableList))
    }

    fn invalid_module(&self) -> Diagnostic {
        errors::invalid_module_statement(self.line, self.kind == Some(StatementKind::Submodule))
    }

    fn in_expression(&self) -> bool {
        self.kind.is_some_and(StatementKind::is_assignment)
    }

    // === Groupings and separators ===

    fn open_paren(&mut self) -> Result<(), Diagnostic> {
        if self.expect_module_paren {
            self.expect_module_paren = false;
            self.groups.push('(');
            self.module_depth = Some(self.groups.len());
            self.scope |= Scope::MODULE;
            return Ok(());
        }
        match self.kind {
            None | Some(StatementKind::FormatSpecifier) => {
                return Err(errors::paren_in_list(self.line, '('));
            }
            Some(StatementKind::Module | StatementKind::Submodule) => {
                return Err(self.invalid_module());
            }
            _ => {}
        }
        if self.scope.contains(Scope::CONCAT) {
            return Err(errors::paren_in_concat(self.line));
        }
        self.parens = true;
        self.last_was_operand = false;
        self.last_op = "(".to_owned();
        self.groups.push('(');
        Ok(())
    }

    fn close_paren(&mut self) -> Result<(), Diagnostic> {
        match self.groups.last() {
            Some('(') => {}
            other => return Err(errors::unmatched_close(self.line, ')', other.copied())),
        }
        if self.module_depth == Some(self.groups.len()) {
            self.groups.pop();
            self.module_depth = None;
            self.scope.remove(Scope::MODULE);
            self.module_closed = true;
            if !self.colon_seen {
                return Err(errors::missing_colon(self.line));
            }
            return Ok(());
        }
        if !self.last_was_operand {
            return Err(errors::missing_expression(self.line, "("));
        }
        self.groups.pop();
        self.last_was_operand = true;
        Ok(())
    }

    fn open_brace(&mut self) -> Result<(), Diagnostic> {
        if self.scope.contains(Scope::CONCAT) {
            return Err(errors::nested_concat(self.line));
        }
        let format = std::mem::take(&mut self.expect_format_concat);
        match self.kind {
            None if !format => {
                self.plain_vars = true;
                self.lhs_items += 1;
            }
            Some(StatementKind::FormatSpecifier) if !format => {
                return Err(errors::variable_outside_formatter(self.line));
            }
            Some(StatementKind::Module | StatementKind::Submodule)
                if !self.scope.contains(Scope::MODULE) =>
            {
                return Err(errors::variable_outside_module(self.line));
            }
            _ => {}
        }
        self.groups.push('{');
        self.scope |= Scope::CONCAT;
        if format {
            self.scope |= Scope::FORMAT;
        }
        self.last_was_operand = false;
        Ok(())
    }

    fn close_brace(&mut self) -> Result<(), Diagnostic> {
        match self.groups.last() {
            Some('{') => {}
            other => return Err(errors::unmatched_close(self.line, '}', other.copied())),
        }
        self.groups.pop();
        self.scope.remove(Scope::CONCAT | Scope::FORMAT);
        self.last_was_operand = true;
        Ok(())
    }

    fn comma(&mut self) -> Result<(), Diagnostic> {
        if self.module_depth != Some(self.groups.len()) {
            return Err(errors::comma_outside_module(self.line));
        }
        Ok(())
    }

    fn colon(&mut self) -> Result<(), Diagnostic> {
        if self.module_depth != Some(self.groups.len()) {
            return Err(errors::colon_outside_module(self.line));
        }
        if self.colon_seen {
            return Err(errors::repeated_colon(self.line));
        }
        self.colon_seen = true;
        Ok(())
    }

    // === Lexemes ===

    fn lexeme(
        &mut self,
        index: usize,
        piece: Piece<'_>,
        next: Option<Piece<'_>>,
    ) -> Result<(), Diagnostic> {
        let text = piece.text;
        let next_touches =
            |tag: RawTag| next.is_some_and(|next| next.tag == tag && piece.touches(&next));

        if let Some(op) = lexeme::operator(text) {
            let opens_group = next_touches(RawTag::LeftParen) || next_touches(RawTag::LeftBrace);
            return self.operator(op, text, opens_group);
        }
        if lexeme::formatter(text).is_some() {
            return self.formatter(text, next_touches(RawTag::LeftBrace));
        }
        if lexeme::instantiation(text).is_some() {
            if index != 0 || !next_touches(RawTag::LeftParen) {
                return Err(errors::invalid_module_statement(self.line, true));
            }
            self.kind = Some(StatementKind::Submodule);
            self.expect_module_paren = true;
            return Ok(());
        }
        if text.contains('[') {
            return match lexeme::vector(text) {
                Some(vector) => self.vector(&vector, text),
                None => Err(errors::unrecognized_token(self.line, text)),
            };
        }
        if let Some(scalar) = lexeme::scalar(text) {
            let declares = index == 0
                && scalar.markers.as_str().is_empty()
                && scalar.ident == self.design_name
                && next_touches(RawTag::LeftParen);
            if declares {
                self.kind = Some(StatementKind::Module);
                self.expect_module_paren = true;
                return Ok(());
            }
            return self.scalar(&scalar, text);
        }
        if let Some(constant) = lexeme::constant(text) {
            return self.constant(&constant, text);
        }
        Err(errors::unrecognized_token(self.line, text))
    }

    fn operator(
        &mut self,
        op: Operator<'_>,
        text: &str,
        opens_group: bool,
    ) -> Result<(), Diagnostic> {
        match op {
            Operator::Assign | Operator::Clock { .. } => {
                if self.scope.contains(Scope::CONCAT) {
                    return Err(errors::operator_in_concat(self.line, text));
                }
                if self.kind.is_some() {
                    return Err(errors::repeated_assignment(self.line, text));
                }
                if self.star {
                    return Err(errors::star_with_assignment(self.line, text));
                }
                let clock = matches!(op, Operator::Clock { .. });
                if self.lhs_constant {
                    return Err(errors::constant_dependent(self.line, clock));
                }
                if self.lhs_vars == 0 {
                    return Err(errors::missing_dependent(self.line, text));
                }
                if self.lhs_items > 1 {
                    return Err(errors::multiple_dependents(self.line));
                }
                if let Operator::Clock {
                    alt_clock: Some(clock_scalar),
                } = op
                {
                    self.claim_scalar(&clock_scalar, clock_scalar.ident)?;
                }
                self.kind = Some(if clock {
                    StatementKind::Clock
                } else {
                    StatementKind::Boolean
                });
                text.clone_into(&mut self.assignment);
                text.clone_into(&mut self.last_op);
                self.last_was_operand = false;
            }
            Operator::Or | Operator::Xor | Operator::Equal | Operator::Plus | Operator::Minus => {
                if self.scope.contains(Scope::CONCAT) {
                    return Err(errors::operator_in_concat(self.line, text));
                }
                if !self.in_expression() {
                    return Err(errors::operator_outside_expression(self.line, text));
                }
                if op.is_math() {
                    if self.logic {
                        return Err(errors::mixed_operators(self.line));
                    }
                    self.math = true;
                } else {
                    if self.math {
                        return Err(errors::mixed_operators(self.line));
                    }
                    self.logic = true;
                }
                if !self.last_was_operand {
                    return Err(errors::dangling_operator(self.line, text));
                }
                text.clone_into(&mut self.last_op);
                self.last_was_operand = false;
            }
            Operator::Negation { .. } => {
                if self.scope.contains(Scope::CONCAT) {
                    return Err(errors::negation_in_concat(self.line));
                }
                if !self.in_expression() {
                    return Err(errors::negation_outside_rhs(self.line));
                }
                if !opens_group {
                    return Err(errors::detached_negation(self.line));
                }
                if self.math {
                    return Err(errors::mixed_operators(self.line));
                }
                self.logic = true;
            }
        }
        Ok(())
    }

    fn formatter(&mut self, text: &str, opens_concat: bool) -> Result<(), Diagnostic> {
        if self.scope.contains(Scope::FORMAT) {
            return Err(errors::formatter_in_formatter(self.line));
        }
        match self.kind {
            None if self.plain_vars => return Err(errors::variable_outside_formatter(self.line)),
            None => self.kind = Some(StatementKind::FormatSpecifier),
            Some(StatementKind::FormatSpecifier) => {}
            Some(_) => return Err(errors::formatter_outside_format(self.line, text)),
        }
        if !opens_concat {
            return Err(errors::formatter_without_concat(self.line, text));
        }
        self.expect_format_concat = true;
        Ok(())
    }

    /// Placement rules shared by scalars, vectors and constants.
    fn operand(&mut self, markers: Markers<'_>) -> Result<(), Diagnostic> {
        if markers.is_starred() {
            self.star = true;
        }
        if self.in_expression() {
            if markers.is_starred() {
                return Err(errors::star_on_rhs(self.line));
            }
            if self.scope.contains(Scope::CONCAT) && markers.has_negation() {
                return Err(errors::negation_in_concat(self.line));
            }
        } else {
            if markers.has_negation() {
                return Err(errors::negation_outside_rhs(self.line));
            }
            match self.kind {
                Some(StatementKind::FormatSpecifier) if !self.scope.contains(Scope::FORMAT) => {
                    return Err(errors::variable_outside_formatter(self.line));
                }
                Some(StatementKind::Module | StatementKind::Submodule)
                    if !self.scope.contains(Scope::MODULE) =>
                {
                    return Err(errors::variable_outside_module(self.line));
                }
                None => {
                    self.plain_vars = true;
                    self.lhs_vars += 1;
                    if !self.scope.contains(Scope::CONCAT) {
                        self.lhs_items += 1;
                    }
                }
                _ => {}
            }
        }
        self.last_was_operand = true;
        Ok(())
    }

    fn scalar(&mut self, scalar: &Scalar<'_>, text: &str) -> Result<(), Diagnostic> {
        self.operand(scalar.markers)?;
        self.claim_scalar(scalar, text)
    }

    fn claim_scalar(&mut self, scalar: &Scalar<'_>, text: &str) -> Result<(), Diagnostic> {
        let claimed = match scalar.bit {
            Some(bit) if bit > MAX_BIT => return Err(errors::bit_out_of_range(self.line, text)),
            Some(bit) => self.namespace.claim_bits(scalar.name, [bit]),
            None => self.namespace.claim_scalar(scalar.ident),
        };
        claimed.map_err(|err| errors::namespace(self.line, &err))
    }

    fn vector(&mut self, vector: &Vector<'_>, text: &str) -> Result<(), Diagnostic> {
        self.operand(vector.markers)?;
        if vector.name_ends_in_digit() {
            return Err(errors::vector_name_ends_in_digit(self.line, vector.name));
        }
        match vector.range {
            Some(range) => {
                if range.left > MAX_BIT || range.right > MAX_BIT {
                    return Err(errors::bounds_out_of_range(self.line, text));
                }
                if range.step.is_some_and(|step| step == 0 || step > MAX_BIT) {
                    return Err(errors::step_out_of_range(self.line, text));
                }
                self.namespace
                    .claim_bits(vector.name, range.bits())
                    .map_err(|err| errors::namespace(self.line, &err))
            }
            None => match self.namespace.entry(vector.name) {
                Some(NamespaceEntry::Scalar) => Err(errors::namespace(
                    self.line,
                    &NamespaceError::UsedByScalar {
                        name: vector.name.to_owned(),
                    },
                )),
                _ => Ok(()),
            },
        }
    }

    fn constant(&mut self, constant: &Constant<'_>, text: &str) -> Result<(), Diagnostic> {
        self.operand(constant.markers)?;
        if self.scope.contains(Scope::CONCAT) && constant.width.is_none() {
            return Err(errors::constant_without_width(self.line));
        }
        match self.kind {
            None => self.lhs_constant = true,
            Some(StatementKind::Module) => {
                return Err(errors::constant_in_declaration(self.line));
            }
            Some(StatementKind::Submodule) if self.colon_seen => {
                return Err(errors::constant_output(self.line));
            }
            _ => {}
        }
        match constant.width {
            Some(width) if width > MAX_CONSTANT_WIDTH => {
                Err(errors::constant_too_wide(self.line, text))
            }
            Some(width) if significant_width(constant) > width => {
                Err(errors::constant_overflows_width(self.line, text, width))
            }
            None if constant.natural_width() > MAX_CONSTANT_WIDTH => {
                Err(errors::constant_too_wide(self.line, text))
            }
            _ => Ok(()),
        }
    }
}

/// Bits needed for the constant's value, ignoring written leading zeros.
fn significant_width(constant: &Constant<'_>) -> u32 {
    match constant.radix {
        Radix::Binary => {
            let digits = constant.digits.trim_start_matches('0');
            u32::try_from(digits.len().max(1)).unwrap_or(u32::MAX)
        }
        Radix::Decimal | Radix::Hex => constant.natural_width(),
    }
}

#[cfg(test)]
mod tests;
