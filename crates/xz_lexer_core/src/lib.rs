//! Offset-level scanning primitives for the xml-zero lexer.
//!
//! This crate knows nothing about markup. It provides:
//!
//! - [`Scanner`]: character-class and literal search over a byte buffer,
//!   operating purely on integer offsets.
//! - [`balance_expression`]: finds the brace closing an embedded code
//!   expression, skipping nested brackets, strings, template strings and
//!   comments.
//!
//! Positions returned by the scanner may run past the end of the buffer to
//! signal "not found, truncated". Callers clamp when they build spans.

mod balance;
mod scan;

pub use balance::{balance_expression, BalanceError};
pub use scan::{ByteSet, Scanner, LINE_BREAKS, QUOTES, WHITESPACE};
