//! Zero-copy streaming lexer for XML, HTML5 and embedded-expression markup.
//!
//! [`lex`] makes one linear pass over a source string and returns a flat
//! sequence of [`Token`]s. Tokens hold [`Span`]s into the source instead of
//! text, so lexing allocates only the output vector. No tree is built: an
//! element's children are the tokens between its [`Token::ElementOpen`] and
//! the matching [`Token::Close`].
//!
//! The lexer is permissive. Truncated and malformed constructs are lexed up
//! to the end of the buffer instead of failing. See [`LexError`] for the few
//! conditions that do fail.
//!
//! ```
//! use xz_lexer::{describe, lex, NodeKind};
//!
//! let source = "<p>his divine shadow</p>";
//! let tokens = lex(source)?;
//! let (kind, text) = describe(source, &tokens[1])?;
//! assert_eq!(kind, NodeKind::Text);
//! assert_eq!(text, ["his divine shadow"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod lexer;
mod options;
mod resolve;
mod span;
mod token;

pub use error::{LexError, ResolveError};
pub use options::{is_html_void_element, LexOptions, DEFAULT_OPAQUE_ELEMENTS, HTML_VOID_ELEMENTS};
pub use resolve::{describe, resolve};
pub use span::Span;
pub use token::{NodeKind, Token};
pub use xz_lexer_core::BalanceError;

use lexer::Lexer;

/// Lex `source` with the default options.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    lex_with_options(source, &LexOptions::default())
}

/// Lex `source` into a flat token sequence.
///
/// Deterministic: the same source and options always produce the same
/// tokens. Every span satisfies `start <= end <= source.len()`.
///
/// # Errors
///
/// - [`LexError::SourceTooLarge`] if `source` exceeds `u32::MAX` bytes.
/// - [`LexError::RunawayExpression`] if an embedded expression exhausts its
///   scan budget.
/// - [`LexError::Stalled`] if the lexer stops advancing.
///
/// The last two indicate a lexer defect, not bad input.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex_with_options(source: &str, options: &LexOptions) -> Result<Vec<Token>, LexError> {
    if u32::try_from(source.len()).is_err() {
        return Err(LexError::SourceTooLarge { len: source.len() });
    }
    let tokens = Lexer::new(source, options).run()?;
    tracing::debug!(tokens = tokens.len(), "lex complete");
    Ok(tokens)
}
