//! Low-level scanning for VisiBoole source.
//!
//! Three layers, each usable on its own:
//! - [`reader`] splits a design into `;`-terminated statements with line numbers
//! - [`RawScanner`] splits one statement into separators and lexemes
//! - [`lexeme`] recognizes what a lexeme is (scalar, vector, constant, ...)
//!
//! Nothing here reports diagnostics. Failures are plain values
//! ([`ReadError`], `None`, [`RawTag::InvalidByte`]) that the classifier in
//! `vb_parse` turns into line-numbered errors.

mod cursor;
pub mod lexeme;
mod raw_scanner;
pub mod reader;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use raw_scanner::{tokenize, RawScanner};
pub use reader::{read_statements, ReadError, ReadErrorKind, SourceStatement};
pub use source_buffer::{strip_bom, SourceBuffer};
pub use tag::{RawTag, RawToken};
