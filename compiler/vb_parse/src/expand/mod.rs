//! Expansion of vectors, constants and concatenations into scalar form.
//!
//! Everything downstream of the expander only deals with scalars, bare `0`
//! and `1` constants, and `{...}` groups of those. Two rewrites get a
//! statement there:
//!
//! - **Vertical**: a non-math assignment with a multi-bit dependent turns
//!   into one statement per dependent bit. `q[1..0] = a[1..0] b;` becomes
//!   `q1 = a1 b;` and `q0 = a0 b;`.
//! - **Horizontal**: everything else has each vector and constant replaced
//!   in place by its components. Assignments (math statements by now) get
//!   their bare variable runs wrapped into concatenations, and lists get
//!   their concatenations flattened.
//!
//! Component lists are memoized by literal token text for the lifetime of
//! one [`Expander`], so every occurrence of `a[]` in a design expands the
//! same way.

use rustc_hash::FxHashMap;
use vb_diagnostic::Diagnostic;
use vb_lexer_core::lexeme::{self, Operator};
use vb_lexer_core::RawTag;

use crate::errors;
use crate::{pieces, Classified, Namespace, Piece, StatementKind};

/// One statement after expansion, without its terminating `;`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ExpandedStatement {
    pub kind: StatementKind,
    pub text: String,
    pub line: u32,
}

#[derive(Debug, Default)]
pub struct Expander {
    memo: FxHashMap<String, Vec<String>>,
}

impl Expander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand one classified statement.
    ///
    /// The namespace must already hold every claim of the design, since
    /// `name[]` resolves to all bits `name` is used with anywhere.
    pub fn expand(
        &mut self,
        statement: &Classified<'_>,
        namespace: &Namespace,
    ) -> Result<Vec<ExpandedStatement>, Diagnostic> {
        let body = statement.text.strip_suffix(';').unwrap_or(statement.text);
        let single = |text: String| {
            vec![ExpandedStatement {
                kind: statement.kind,
                text,
                line: statement.line,
            }]
        };
        if statement.kind.is_structural() {
            return Ok(single(body.to_owned()));
        }

        let text = body.replace("~~", "").replace("**", "");
        let pieces = pieces(&text);
        if !needs_expansion(&pieces) {
            return Ok(single(text));
        }

        let has_math = pieces.iter().any(|piece| {
            piece.is_lexeme() && lexeme::operator(piece.text).is_some_and(Operator::is_math)
        });
        if statement.kind.is_assignment() && !has_math {
            let lines = self.vertical(&text, &pieces, statement.line, namespace)?;
            return Ok(lines
                .into_iter()
                .map(|text| ExpandedStatement {
                    kind: statement.kind,
                    text,
                    line: statement.line,
                })
                .collect());
        }
        let text = self.horizontal(&text, statement.kind, statement.line, namespace)?;
        Ok(single(text))
    }

    /// Components of a vector or constant token, `None` for anything else.
    ///
    /// Markers on the token are repeated on every component, so `~a[1..0]`
    /// gives `~a1 ~a0`.
    pub fn components(
        &mut self,
        token: &str,
        namespace: &Namespace,
        line: u32,
    ) -> Result<Option<Vec<String>>, Diagnostic> {
        if let Some(hit) = self.memo.get(token) {
            return Ok(Some(hit.clone()));
        }
        let expanded: Vec<String> = if let Some(vector) = lexeme::vector(token) {
            let markers = vector.markers.as_str();
            let names = match vector.range {
                Some(range) => range
                    .bits()
                    .into_iter()
                    .map(|bit| format!("{}{bit}", vector.name))
                    .collect(),
                None => namespace
                    .components(vector.name)
                    .ok_or_else(|| errors::undimensioned_vector(line, vector.name))?,
            };
            names
                .into_iter()
                .map(|name| format!("{markers}{name}"))
                .collect()
        } else if let Some(constant) = lexeme::constant(token) {
            let markers = constant.markers.as_str();
            constant
                .to_bits()
                .into_iter()
                .map(|bit| format!("{markers}{}", u8::from(bit)))
                .collect()
        } else {
            return Ok(None);
        };
        self.memo.insert(token.to_owned(), expanded.clone());
        Ok(Some(expanded))
    }

    fn vertical(
        &mut self,
        text: &str,
        pieces: &[Piece<'_>],
        line: u32,
        namespace: &Namespace,
    ) -> Result<Vec<String>, Diagnostic> {
        let template = self.template(text, pieces, line, namespace)?;
        let Some(dependent) = template.slots.first() else {
            return Ok(vec![text.to_owned()]);
        };
        let count = dependent.components.len();

        let mut slots = Vec::with_capacity(template.slots.len());
        for slot in &template.slots {
            let mut components = slot.components.clone();
            if components.len() < count && slot.can_pad {
                let mut padded = vec!["0".to_owned(); count - components.len()];
                padded.append(&mut components);
                components = padded;
            }
            if components.len() != count {
                return Err(errors::expansion_mismatch(
                    slot.line,
                    &slot.source,
                    &dependent.source,
                ));
            }
            slots.push(components);
        }

        Ok((0..count)
            .map(|index| {
                template
                    .segments
                    .iter()
                    .map(|segment| match segment {
                        Segment::Text(text) => text.as_str(),
                        Segment::Slot(slot) => slots[*slot][index].as_str(),
                    })
                    .collect()
            })
            .collect())
    }

    /// Split an assignment into fixed text and per-bit slots. The first
    /// slot is always the dependent.
    fn template(
        &mut self,
        text: &str,
        pieces: &[Piece<'_>],
        mut line: u32,
        namespace: &Namespace,
    ) -> Result<Template, Diagnostic> {
        let mut template = Template::default();
        let mut before_assignment = true;
        let mut concat: Option<(usize, u32, Vec<String>)> = None;

        for (index, piece) in pieces.iter().enumerate() {
            if piece.tag == RawTag::Newline {
                line += 1;
            }
            if let Some((start, concat_line, members)) = concat.as_mut() {
                match piece.tag {
                    RawTag::RightBrace => {
                        template.push_slot(Slot {
                            source: text[*start..piece.end()].to_owned(),
                            components: std::mem::take(members),
                            can_pad: false,
                            line: *concat_line,
                        });
                        concat = None;
                    }
                    RawTag::Lexeme => match self.components(piece.text, namespace, line)? {
                        Some(components) => members.extend(components),
                        None => members.push(piece.text.to_owned()),
                    },
                    _ => {}
                }
                continue;
            }

            match piece.tag {
                RawTag::LeftBrace if !after_formatter(pieces, index) => {
                    concat = Some((piece.start, line, Vec::new()));
                }
                RawTag::Lexeme if lexeme::operator(piece.text).is_some() => {
                    if lexeme::operator(piece.text).is_some_and(Operator::is_assignment) {
                        before_assignment = false;
                    }
                    template.push_text(piece.text);
                }
                RawTag::Lexeme => {
                    let constant = lexeme::constant(piece.text);
                    match self.components(piece.text, namespace, line)? {
                        Some(components) => template.push_slot(Slot {
                            source: piece.text.to_owned(),
                            components,
                            can_pad: constant.is_some_and(|c| c.width.is_none()),
                            line,
                        }),
                        None if before_assignment => template.push_slot(Slot {
                            source: piece.text.to_owned(),
                            components: vec![piece.text.to_owned()],
                            can_pad: false,
                            line,
                        }),
                        None => template.push_text(piece.text),
                    }
                }
                _ => template.push_text(piece.text),
            }
        }
        Ok(template)
    }

    fn horizontal(
        &mut self,
        text: &str,
        kind: StatementKind,
        mut line: u32,
        namespace: &Namespace,
    ) -> Result<String, Diagnostic> {
        let (head, body) = match text.find('(') {
            Some(open) if kind.is_module() => text.split_at(open + 1),
            _ => ("", text),
        };
        line += count_newlines(head);

        let mut replaced = String::with_capacity(body.len());
        for piece in pieces(body) {
            if piece.tag == RawTag::Newline {
                line += 1;
            }
            let expandable = piece.is_lexeme()
                && lexeme::operator(piece.text).is_none()
                && !lexeme::constant(piece.text).is_some_and(|c| c.is_single_bit());
            let components = if expandable {
                self.components(piece.text, namespace, line)?
            } else {
                None
            };
            match components {
                Some(components) => replaced.push_str(&components.join(" ")),
                None => replaced.push_str(piece.text),
            }
        }

        let has_assignment = pieces(&replaced).iter().any(|piece| {
            piece.is_lexeme() && lexeme::operator(piece.text).is_some_and(Operator::is_assignment)
        });
        let rewritten = if has_assignment {
            wrap_variable_runs(&replaced)
        } else if kind.is_module() {
            replaced
        } else {
            flatten_concats(&replaced)
        };
        Ok(format!("{head}{rewritten}"))
    }
}

#[derive(Default)]
struct Template {
    segments: Vec<Segment>,
    slots: Vec<Slot>,
}

impl Template {
    fn push_text(&mut self, text: &str) {
        if let Some(Segment::Text(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Text(text.to_owned()));
        }
    }

    fn push_slot(&mut self, slot: Slot) {
        self.segments.push(Segment::Slot(self.slots.len()));
        self.slots.push(slot);
    }
}

enum Segment {
    Text(String),
    Slot(usize),
}

struct Slot {
    /// Token or concatenation text, used in mismatch messages.
    source: String,
    components: Vec<String>,
    /// Bare constants without a width may be zero-extended on the left.
    can_pad: bool,
    line: u32,
}

fn count_newlines(text: &str) -> u32 {
    u32::try_from(text.bytes().filter(|&b| b == b'\n').count()).unwrap_or(u32::MAX)
}

/// `{` directly attached to a formatter like `%h{`.
fn after_formatter(pieces: &[Piece<'_>], index: usize) -> bool {
    index
        .checked_sub(1)
        .and_then(|prev| pieces.get(prev))
        .is_some_and(|prev| {
            prev.is_lexeme()
                && lexeme::formatter(prev.text).is_some()
                && prev.touches(&pieces[index])
        })
}

/// Whether a statement has anything the expander rewrites.
fn needs_expansion(pieces: &[Piece<'_>]) -> bool {
    pieces.iter().enumerate().any(|(index, piece)| match piece.tag {
        RawTag::Colon => true,
        RawTag::LeftBrace => !after_formatter(pieces, index),
        RawTag::Lexeme => {
            lexeme::operator(piece.text).is_none()
                && (lexeme::vector(piece.text).is_some()
                    || lexeme::constant(piece.text).is_some_and(|c| !c.is_single_bit()))
        }
        _ => false,
    })
}

/// Wrap runs of two or more top-level operands in `{}`.
fn wrap_variable_runs(text: &str) -> String {
    let pieces = pieces(text);
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut run: Option<(usize, usize, usize)> = None;
    let mut depth = 0usize;

    let mut flush = |run: &mut Option<(usize, usize, usize)>| {
        if let Some((start, end, count)) = run.take() {
            if count >= 2 {
                runs.push((start, end));
            }
        }
    };
    for piece in &pieces {
        match piece.tag {
            RawTag::Whitespace | RawTag::Newline => {}
            RawTag::Lexeme if depth == 0 && lexeme::operator(piece.text).is_none() => {
                run = Some(match run {
                    Some((start, _, count)) => (start, piece.end(), count + 1),
                    None => (piece.start, piece.end(), 1),
                });
            }
            tag => {
                flush(&mut run);
                match tag {
                    RawTag::LeftBrace => depth += 1,
                    RawTag::RightBrace => depth = depth.saturating_sub(1),
                    _ => {}
                }
            }
        }
    }
    flush(&mut run);

    let mut out = String::with_capacity(text.len() + runs.len() * 2);
    let mut cursor = 0;
    for (start, end) in runs {
        out.push_str(&text[cursor..start]);
        out.push('{');
        out.push_str(&text[start..end]);
        out.push('}');
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Drop the braces of every concatenation not owned by a formatter.
fn flatten_concats(text: &str) -> String {
    let pieces = pieces(text);
    let mut out = String::with_capacity(text.len());
    let mut plain = false;
    for (index, piece) in pieces.iter().enumerate() {
        match piece.tag {
            RawTag::LeftBrace if !after_formatter(&pieces, index) => plain = true,
            RawTag::RightBrace if plain => plain = false,
            _ => out.push_str(piece.text),
        }
    }
    out
}

#[cfg(test)]
mod tests;
