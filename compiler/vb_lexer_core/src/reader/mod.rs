//! Splits a design into `;`-terminated statements.
//!
//! A statement runs from its first character to the next `;` that is not
//! inside a quoted comment, and may span several physical lines. After the
//! `;`, the rest of the physical line must be blank. A physical line that is
//! entirely blank becomes its own (empty) statement so that the rendered
//! output keeps the design's vertical layout.

use std::fmt;

use crate::{strip_bom, SourceBuffer};

/// One logical statement and the line it starts on.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SourceStatement<'a> {
    /// Statement text including the terminating `;` (blank for empty lines).
    pub text: &'a str,
    /// 1-based line of the statement's first character.
    pub line: u32,
}

impl SourceStatement<'_> {
    /// Whether this is a blank line rather than a real statement.
    pub fn is_blank(&self) -> bool {
        is_blank(self.text)
    }
}

/// Why a design couldn't be split into statements.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ReadErrorKind {
    /// Something other than whitespace follows a `;` on the same line.
    TrailingText,
    /// The design ends in the middle of a statement.
    Unterminated,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ReadError {
    pub kind: ReadErrorKind,
    /// 1-based line the error belongs to.
    pub line: u32,
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ReadErrorKind::TrailingText => {
                write!(f, "{}: Only one statement can be on a line.", self.line)
            }
            ReadErrorKind::Unterminated => {
                write!(f, "{}: Statement must end with ';'.", self.line)
            }
        }
    }
}

/// Split `source` into statements.
///
/// A leading byte order mark is ignored. Trailing blank text at the end of
/// the design is dropped; any other unterminated text is an error.
pub fn read_statements(source: &str) -> Result<Vec<SourceStatement<'_>>, ReadError> {
    let source = strip_bom(source);
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();

    let mut statements = Vec::new();
    let mut line = 1u32;
    let mut start = 0usize;
    let mut start_line = 1u32;
    let mut in_quotes = false;

    loop {
        match cursor.skip_to_statement_delim() {
            b'"' => {
                in_quotes = !in_quotes;
                cursor.advance();
            }
            b';' if in_quotes => cursor.advance(),
            b';' => {
                cursor.advance();
                statements.push(SourceStatement {
                    text: &source[start..cursor.pos() as usize],
                    line: start_line,
                });

                cursor.eat_whitespace();
                if cursor.current() == b'\r' {
                    cursor.advance();
                }
                match cursor.current() {
                    b'\n' => {
                        cursor.advance();
                        line += 1;
                    }
                    _ if cursor.is_eof() => {}
                    _ => {
                        return Err(ReadError {
                            kind: ReadErrorKind::TrailingText,
                            line,
                        })
                    }
                }
                start = cursor.pos() as usize;
                start_line = line;
            }
            b'\n' => {
                // A comment can't continue across lines.
                in_quotes = false;
                let pending = &source[start..cursor.pos() as usize];
                cursor.advance();
                line += 1;
                if is_blank(pending) {
                    statements.push(SourceStatement {
                        text: pending,
                        line: start_line,
                    });
                    start = cursor.pos() as usize;
                    start_line = line;
                }
            }
            _ => {
                if is_blank(&source[start..]) {
                    return Ok(statements);
                }
                return Err(ReadError {
                    kind: ReadErrorKind::Unterminated,
                    line: start_line,
                });
            }
        }
    }
}

fn is_blank(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_whitespace() || b == 0x0B)
}

#[cfg(test)]
mod tests;
