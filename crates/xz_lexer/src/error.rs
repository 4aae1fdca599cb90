//! Error types.
//!
//! Malformed markup is never an error: truncated and badly closed constructs
//! are lexed permissively. [`LexError`] only reports input the lexer cannot
//! represent and internal scanning faults.

use xz_lexer_core::BalanceError;

use crate::Span;

/// Failure of a whole lexing call. No partial token sequence is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// The source cannot be addressed by 32-bit spans.
    #[error("source is {len} bytes, spans address at most {} bytes", u32::MAX)]
    SourceTooLarge { len: usize },

    /// The dispatcher ran more iterations than the source has bytes, so a
    /// handler failed to advance.
    #[error("lexer stopped advancing at byte {offset} after {iterations} iterations")]
    Stalled { offset: usize, iterations: usize },

    /// An embedded expression exhausted its scan budget.
    #[error(transparent)]
    RunawayExpression(#[from] BalanceError),
}

/// A token was resolved against a source it does not describe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("span {span:?} is outside a source of {len} bytes")]
    OutOfBounds { span: Span, len: usize },

    #[error("span {span:?} does not fall on character boundaries")]
    NotCharBoundary { span: Span },
}
