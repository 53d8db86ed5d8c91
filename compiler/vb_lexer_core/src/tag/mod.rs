//! Raw token tags produced by the scanner.

/// Kind of a raw token.
///
/// VisiBoole has very little punctuation: everything that is not a
/// separator is glued into one [`RawTag::Lexeme`] and recognized later by
/// [`lexeme`](crate::lexeme). Discriminants are grouped by role like the
/// other token tags in the workspace.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RawTag {
    /// Run of lexeme bytes: `a0`, `~b[3..0]`, `4'hF`, `<=@clk`, `adder.u1`.
    Lexeme = 0,

    // Delimiters: 80-95
    LeftParen = 80,
    RightParen = 81,
    LeftBrace = 82,
    RightBrace = 83,
    Colon = 84,
    Comma = 85,
    Semicolon = 86,

    // Trivia: 112-113
    Whitespace = 112,
    Newline = 113,

    // Errors: 240-245
    InvalidByte = 240,
    InteriorNull = 245,

    // Control: 255
    Eof = 255,
}

impl RawTag {
    /// Fixed source text of a delimiter tag.
    pub fn lexeme(self) -> Option<&'static str> {
        match self {
            RawTag::LeftParen => Some("("),
            RawTag::RightParen => Some(")"),
            RawTag::LeftBrace => Some("{"),
            RawTag::RightBrace => Some("}"),
            RawTag::Colon => Some(":"),
            RawTag::Comma => Some(","),
            RawTag::Semicolon => Some(";"),
            _ => None,
        }
    }

    /// Whether this tag separates lexemes without carrying meaning of its own.
    pub fn is_trivia(self) -> bool {
        matches!(self, RawTag::Whitespace | RawTag::Newline)
    }
}

/// A token as a `(tag, length)` pair. Positions are recovered by summing lengths.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}
