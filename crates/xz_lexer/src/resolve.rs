//! Slicing tokens back into source text.

use crate::{NodeKind, ResolveError, Span, Token};

/// Slice each of the token's spans out of `source`, name before value.
///
/// `source` must be the text the token was lexed from. A span outside the
/// source, or one that splits a UTF-8 character, is reported as an error
/// rather than a panic.
pub fn resolve<'src>(source: &'src str, token: &Token) -> Result<Vec<&'src str>, ResolveError> {
    token.spans().map(|span| slice(source, span)).collect()
}

/// The token's kind together with its resolved text. Mostly useful for
/// debugging and tests.
pub fn describe<'src>(
    source: &'src str,
    token: &Token,
) -> Result<(NodeKind, Vec<&'src str>), ResolveError> {
    Ok((token.kind(), resolve(source, token)?))
}

fn slice(source: &str, span: Span) -> Result<&str, ResolveError> {
    let range = span.range();
    if range.start > range.end || range.end > source.len() {
        return Err(ResolveError::OutOfBounds {
            span,
            len: source.len(),
        });
    }
    source
        .get(range)
        .ok_or(ResolveError::NotCharBoundary { span })
}

#[cfg(test)]
mod tests;
