//! Diagnostic system for VisiBoole designs.
//!
//! Every failure the engine reports is a [`Diagnostic`] carrying:
//! - An error code for searchability (`vb --explain E2004`)
//! - The source line the failure belongs to
//! - A clear message (what went wrong)
//! - Optional notes (where it came from, e.g. a submodule)
//!
//! # Error Guarantees
//!
//! The `ErrorGuaranteed` type provides type-level proof that at least one
//! error was emitted. Pipeline phases return `Result<T, ErrorGuaranteed>` so
//! a parse attempt can only fail after something was written to the log.
//!
//! ```text
//! // Can only get ErrorGuaranteed by emitting an error
//! let guarantee = queue.emit_error(diagnostic);
//!
//! fn classify(..) -> Result<StatementType, ErrorGuaranteed> { ... }
//! ```

mod diagnostic;
mod error_code;
pub mod errors;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
