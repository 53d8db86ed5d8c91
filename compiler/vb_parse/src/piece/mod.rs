//! Statement text as positioned raw tokens.
//!
//! [`RawToken`](vb_lexer_core::RawToken) only carries a length. Every stage
//! after reading needs the text and offset of each token as well, so this
//! walks the lengths once and hands out [`Piece`]s.

use vb_lexer_core::{tokenize, RawTag};

/// One raw token with its text and byte offset in the statement.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Piece<'a> {
    pub tag: RawTag,
    pub text: &'a str,
    pub start: usize,
}

impl Piece<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn is_trivia(&self) -> bool {
        self.tag.is_trivia()
    }

    pub fn is_lexeme(&self) -> bool {
        self.tag == RawTag::Lexeme
    }

    /// `true` when `next` starts exactly where this piece ends.
    pub fn touches(&self, next: &Piece<'_>) -> bool {
        self.end() == next.start
    }
}

/// Split `text` into pieces, trivia included.
pub fn pieces(text: &str) -> Vec<Piece<'_>> {
    let mut start = 0;
    tokenize(text)
        .into_iter()
        .map(|token| {
            let end = start + token.len as usize;
            let piece = Piece {
                tag: token.tag,
                text: text.get(start..end).unwrap_or_default(),
                start,
            };
            start = end;
            piece
        })
        .collect()
}
