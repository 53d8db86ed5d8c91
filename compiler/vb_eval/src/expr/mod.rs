//! Expressions on the right of boolean and clock statements.
//!
//! Expressions are parsed from expanded statement text, where every operand
//! is a scalar or a single-bit constant. Two shapes exist:
//!
//! - [`Expression`]: boolean logic. Precedence, tightest first: `~`, AND
//!   (juxtaposition), `==`, `^`, `|`.
//! - [`MathExpr`]: `+` and `-` over unsigned operands, each operand a run of
//!   bits read most significant first.

use vb_lexer_core::lexeme::{self, Operator};
use vb_parse::pieces;

/// Why expression text could not be parsed.
///
/// The classifier rejects malformed statements long before this point, so
/// these only surface as internal errors.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ExprError {
    #[error("unexpected '{token}' in expression")]
    Unexpected { token: String },
    #[error("expression ends before it is complete")]
    Incomplete,
    #[error("'{token}' is not a single-bit operand")]
    NotOperand { token: String },
    #[error("statement has no assignment operator")]
    NoAssignment,
}

// === Boolean logic ===

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Expr {
    Const(bool),
    Var(String),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Xor(Vec<Expr>),
    Equal(Box<Expr>, Box<Expr>),
    /// A parenthesized group. `id` numbers groups by their `(` in source
    /// order, so rendering can annotate each parenthesis with its value.
    Group { id: usize, inner: Box<Expr> },
}

/// A parsed boolean expression and the number of groups in it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Expression {
    root: Expr,
    groups: usize,
}

impl Expression {
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        let tokens = significant_tokens(text);
        let mut parser = Parser {
            tokens,
            pos: 0,
            groups: 0,
        };
        let root = parser.or()?;
        if let Some(token) = parser.peek() {
            return Err(ExprError::Unexpected {
                token: token.to_owned(),
            });
        }
        Ok(Expression {
            root,
            groups: parser.groups,
        })
    }

    pub fn root(&self) -> &Expr {
        &self.root
    }

    pub fn evaluate(&self, lookup: &dyn Fn(&str) -> bool) -> bool {
        let mut groups = vec![false; self.groups];
        eval(&self.root, lookup, &mut groups)
    }

    /// Value inside each parenthesized group, indexed by group id.
    pub fn group_values(&self, lookup: &dyn Fn(&str) -> bool) -> Vec<bool> {
        let mut groups = vec![false; self.groups];
        eval(&self.root, lookup, &mut groups);
        groups
    }

    /// Variables read by the expression, first occurrence order.
    pub fn variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect_variables(&self.root, &mut names);
        names
    }
}

fn eval(expr: &Expr, lookup: &dyn Fn(&str) -> bool, groups: &mut [bool]) -> bool {
    match expr {
        Expr::Const(value) => *value,
        Expr::Var(name) => lookup(name),
        Expr::Not(inner) => !eval(inner, lookup, groups),
        // Every operand is evaluated so nested group values are always
        // filled in.
        Expr::And(operands) => operands
            .iter()
            .fold(true, |acc, operand| eval(operand, lookup, groups) & acc),
        Expr::Or(operands) => operands
            .iter()
            .fold(false, |acc, operand| eval(operand, lookup, groups) | acc),
        Expr::Xor(operands) => operands
            .iter()
            .fold(false, |acc, operand| eval(operand, lookup, groups) ^ acc),
        Expr::Equal(left, right) => eval(left, lookup, groups) == eval(right, lookup, groups),
        Expr::Group { id, inner } => {
            let value = vb_stack::ensure_sufficient_stack(|| eval(inner, lookup, groups));
            if let Some(slot) = groups.get_mut(*id) {
                *slot = value;
            }
            value
        }
    }
}

fn collect_variables(expr: &Expr, names: &mut Vec<String>) {
    match expr {
        Expr::Const(_) => {}
        Expr::Var(name) => {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Expr::Not(inner) | Expr::Group { inner, .. } => collect_variables(inner, names),
        Expr::And(operands) | Expr::Or(operands) | Expr::Xor(operands) => {
            for operand in operands {
                collect_variables(operand, names);
            }
        }
        Expr::Equal(left, right) => {
            collect_variables(left, names);
            collect_variables(right, names);
        }
    }
}

fn significant_tokens(text: &str) -> Vec<&str> {
    pieces(text)
        .into_iter()
        .filter(|piece| !piece.is_trivia())
        .map(|piece| piece.text)
        .collect()
}

struct Parser<'t> {
    tokens: Vec<&'t str>,
    pos: usize,
    groups: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t str> {
        self.tokens.get(self.pos).copied()
    }

    fn chain(
        &mut self,
        op: &str,
        next: fn(&mut Self) -> Result<Expr, ExprError>,
        build: fn(Vec<Expr>) -> Expr,
    ) -> Result<Expr, ExprError> {
        let mut operands = vec![next(self)?];
        while self.peek() == Some(op) {
            self.pos += 1;
            operands.push(next(self)?);
        }
        if operands.len() == 1 {
            if let Some(only) = operands.pop() {
                return Ok(only);
            }
        }
        Ok(build(operands))
    }

    fn or(&mut self) -> Result<Expr, ExprError> {
        self.chain("|", Self::xor, Expr::Or)
    }

    fn xor(&mut self) -> Result<Expr, ExprError> {
        self.chain("^", Self::equal, Expr::Xor)
    }

    fn equal(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.and()?;
        while self.peek() == Some("==") {
            self.pos += 1;
            let right = self.and()?;
            left = Expr::Equal(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Expr, ExprError> {
        let mut operands = Vec::new();
        while self
            .peek()
            .is_some_and(|token| !matches!(token, "|" | "^" | "==" | ")"))
        {
            operands.push(self.unary()?);
        }
        match operands.len() {
            0 => match self.peek() {
                Some(token) => Err(ExprError::Unexpected {
                    token: token.to_owned(),
                }),
                None => Err(ExprError::Incomplete),
            },
            1 => operands.pop().ok_or(ExprError::Incomplete),
            _ => Ok(Expr::And(operands)),
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        let token = self.peek().ok_or(ExprError::Incomplete)?;
        if let Some(Operator::Negation { count }) = lexeme::operator(token) {
            self.pos += 1;
            let inner = self.primary()?;
            return Ok(if count % 2 == 1 {
                Expr::Not(Box::new(inner))
            } else {
                inner
            });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let token = self.peek().ok_or(ExprError::Incomplete)?;
        self.pos += 1;
        if token == "(" {
            let id = self.groups;
            self.groups += 1;
            let inner = vb_stack::ensure_sufficient_stack(|| self.or())?;
            if self.peek() != Some(")") {
                return Err(self.peek().map_or(ExprError::Incomplete, |token| {
                    ExprError::Unexpected {
                        token: token.to_owned(),
                    }
                }));
            }
            self.pos += 1;
            return Ok(Expr::Group {
                id,
                inner: Box::new(inner),
            });
        }
        operand(token)
    }
}

/// A scalar or single-bit constant, with its `~` markers applied.
fn operand(token: &str) -> Result<Expr, ExprError> {
    let bit = bit(token)?;
    let base = match bit.name {
        Some(name) => Expr::Var(name),
        None => Expr::Const(bit.constant),
    };
    Ok(if bit.negated {
        Expr::Not(Box::new(base))
    } else {
        base
    })
}

// === Bits ===

/// One operand token of an expanded statement.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Bit {
    /// Variable name, or `None` for a constant.
    pub name: Option<String>,
    /// Value of a constant (ignored for variables).
    pub constant: bool,
    pub negated: bool,
}

impl Bit {
    pub fn value(&self, lookup: &dyn Fn(&str) -> bool) -> bool {
        let raw = match &self.name {
            Some(name) => lookup(name),
            None => self.constant,
        };
        raw ^ self.negated
    }
}

/// Read a scalar or single-bit constant token.
pub fn bit(token: &str) -> Result<Bit, ExprError> {
    if let Some(scalar) = lexeme::scalar(token) {
        return Ok(Bit {
            name: Some(scalar.ident.to_owned()),
            constant: false,
            negated: scalar.markers.is_negated(),
        });
    }
    match lexeme::constant(token) {
        Some(constant) if constant.bit_count() == 1 => Ok(Bit {
            name: None,
            constant: constant.to_bits().first().copied().unwrap_or(false),
            negated: constant.markers.is_negated(),
        }),
        _ => Err(ExprError::NotOperand {
            token: token.to_owned(),
        }),
    }
}

// === Math ===

#[derive(Clone, Eq, PartialEq, Debug)]
struct Term {
    subtract: bool,
    bits: Vec<Bit>,
}

/// `+`/`-` over unsigned operands.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MathExpr {
    terms: Vec<Term>,
}

impl MathExpr {
    /// Parse `{a1 a0} + {b1 b0} - 1`. Juxtaposed operands and braces both
    /// concatenate bits into the current term.
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        let mut terms = Vec::new();
        let mut current = Term {
            subtract: false,
            bits: Vec::new(),
        };
        for token in significant_tokens(text) {
            match token {
                "{" | "}" => {}
                _ => match lexeme::operator(token) {
                    Some(op @ (Operator::Plus | Operator::Minus)) => {
                        if current.bits.is_empty() {
                            return Err(ExprError::Unexpected {
                                token: token.to_owned(),
                            });
                        }
                        let next = Term {
                            subtract: op == Operator::Minus,
                            bits: Vec::new(),
                        };
                        terms.push(std::mem::replace(&mut current, next));
                    }
                    Some(_) => {
                        return Err(ExprError::Unexpected {
                            token: token.to_owned(),
                        })
                    }
                    None => current.bits.push(bit(token)?),
                },
            }
        }
        if current.bits.is_empty() {
            return Err(ExprError::Incomplete);
        }
        terms.push(current);
        Ok(MathExpr { terms })
    }

    /// Result truncated to `width` bits.
    pub fn evaluate(&self, width: u32, lookup: &dyn Fn(&str) -> bool) -> u64 {
        let mask = if width >= u64::BITS {
            u64::MAX
        } else {
            (1u64 << width) - 1
        };
        let total = self.terms.iter().fold(0u64, |acc, term| {
            let value = term
                .bits
                .iter()
                .fold(0u64, |value, bit| (value << 1) | u64::from(bit.value(lookup)));
            if term.subtract {
                acc.wrapping_sub(value)
            } else {
                acc.wrapping_add(value)
            }
        });
        total & mask
    }

    /// Variables read by the expression, first occurrence order.
    pub fn variables(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let bits = self.terms.iter().flat_map(|term| &term.bits);
        for name in bits.filter_map(|bit| bit.name.as_ref()) {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }
}

// === Assignments ===

/// Right-hand side of an assignment.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Rhs {
    Logic(Expression),
    Math(MathExpr),
}

impl Rhs {
    pub fn variables(&self) -> Vec<String> {
        match self {
            Rhs::Logic(expression) => expression.variables(),
            Rhs::Math(math) => math.variables(),
        }
    }
}

/// An expanded `targets = rhs` or `targets <= rhs` statement.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Assignment {
    /// Dependent names, most significant first.
    pub targets: Vec<String>,
    /// `Some` for clock statements, holding the alternate clock if any.
    pub clock: Option<Option<String>>,
    pub rhs: Rhs,
}

impl Assignment {
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        let all = pieces(text);
        let (index, op) = all
            .iter()
            .enumerate()
            .find_map(|(index, piece)| {
                let op = lexeme::operator(piece.text).filter(|op| op.is_assignment())?;
                piece.is_lexeme().then_some((index, op))
            })
            .ok_or(ExprError::NoAssignment)?;

        let targets: Vec<String> = all[..index]
            .iter()
            .filter(|piece| piece.is_lexeme())
            .map(|piece| piece.text.to_owned())
            .collect();
        if targets.is_empty() {
            return Err(ExprError::Incomplete);
        }
        let clock = match op {
            Operator::Clock { alt_clock } => Some(alt_clock.map(|scalar| scalar.ident.to_owned())),
            _ => None,
        };

        let rhs_text = &text[all[index].end()..];
        let is_math = pieces(rhs_text).iter().any(|piece| {
            piece.is_lexeme() && lexeme::operator(piece.text).is_some_and(Operator::is_math)
        });
        let rhs = if is_math {
            Rhs::Math(MathExpr::parse(rhs_text)?)
        } else {
            Rhs::Logic(Expression::parse(rhs_text)?)
        };
        Ok(Assignment {
            targets,
            clock,
            rhs,
        })
    }

    /// Values to store, paired with their targets.
    pub fn evaluate(&self, lookup: &dyn Fn(&str) -> bool) -> Vec<bool> {
        match &self.rhs {
            Rhs::Logic(expression) => {
                let value = expression.evaluate(lookup);
                vec![value; self.targets.len()]
            }
            Rhs::Math(math) => {
                let width = u32::try_from(self.targets.len()).unwrap_or(u32::MAX);
                let value = math.evaluate(width, lookup);
                (0..width)
                    .rev()
                    .map(|shift| shift < u64::BITS && (value >> shift) & 1 == 1)
                    .collect()
            }
        }
    }
}
