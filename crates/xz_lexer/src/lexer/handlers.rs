//! Construct handlers.
//!
//! Each handler starts at a given offset, consumes one construct and returns
//! a [`Step`]. Handlers never fail on malformed input: a construct whose
//! terminator is missing runs to the end of the buffer. The only error is an
//! embedded expression that exhausts its scan budget.

use tracing::trace;
use xz_lexer_core::{balance_expression, ByteSet, QUOTES, WHITESPACE};

use super::{Lexer, Step};
use crate::{LexError, Token};

const TEXT_STOPS: ByteSet = ByteSet::new(b"<");
const TEXT_OR_EXPRESSION_STOPS: ByteSet = ByteSet::new(b"<{");
const ELEMENT_NAME_STOPS: ByteSet = ByteSet::new(b">/ \r\n\t");
const INSTRUCTION_NAME_STOPS: ByteSet = ByteSet::new(b">? \r\n\t");
const ATTRIBUTE_NAME_STOPS: ByteSet = ByteSet::new(b"=/> \r\n\t");
const UNQUOTED_VALUE_STOPS: ByteSet = ByteSet::new(b"> \r\n\t");
const CLOSE_STOPS: ByteSet = ByteSet::new(b">");

/// Attribute under construction.
///
/// Whether an attribute is an expression attribute is only known once its
/// value has been seen, so the token is built at the end.
struct AttributeBuilder {
    expression: bool,
    name: (usize, usize),
    value: Option<(usize, usize)>,
}

impl AttributeBuilder {
    fn named(start: usize, end: usize) -> Self {
        AttributeBuilder {
            expression: false,
            name: (start, end),
            value: None,
        }
    }

    fn build(self, lexer: &Lexer<'_, '_>) -> Token {
        let name = lexer.span(self.name.0, self.name.1);
        let value = self.value.map(|(start, end)| lexer.span(start, end));
        if self.expression {
            Token::ExpressionAttribute { name, value }
        } else {
            Token::Attribute { name, value }
        }
    }
}

impl Lexer<'_, '_> {
    /// Text up to the next `<` (or `{`, with embedded expressions enabled).
    /// A run starting with `{` is an inline expression.
    pub(super) fn on_text(&self, pos: usize) -> Result<Step, LexError> {
        let stops = if self.options.embedded_expressions {
            &TEXT_OR_EXPRESSION_STOPS
        } else {
            &TEXT_STOPS
        };
        let end = self.scanner.seek_byte(pos, stops);
        if end == pos && self.scanner.byte_at(pos) == Some(b'{') {
            let close = balance_expression(&self.scanner, pos)?;
            return Ok(Step::text(
                close + 1,
                Token::Expression(self.span(pos + 1, close)),
            ));
        }
        Ok(Step::text(end, Token::Text(self.span(pos, end))))
    }

    /// `<name`, with `pos` just past the `<`. An empty name is a fragment.
    pub(super) fn on_element(&self, pos: usize) -> Step {
        let end = self.scanner.seek_byte(pos, &ELEMENT_NAME_STOPS);
        let name = (end != pos).then(|| self.span(pos, end));
        Step::header(end, Some(Token::ElementOpen(name)))
    }

    /// `</...>` or `/>`, with `pos` on the `/`. The name is not captured.
    pub(super) fn on_close(&self, pos: usize) -> Step {
        let end = self.scanner.seek_byte(pos, &CLOSE_STOPS);
        Step::text(end + 1, Token::Close)
    }

    /// `<?name`, with `pos` on the `?`. The name `xml` makes it a declaration.
    pub(super) fn on_question(&self, pos: usize) -> Step {
        let start = pos + 1;
        let mut end = self.scanner.seek_byte(start, &INSTRUCTION_NAME_STOPS);
        // `<?xml/>`: the slash belongs to the close, not the name.
        if self.scanner.byte_at(end) == Some(b'>')
            && self.scanner.byte_at(end - 1) == Some(b'/')
        {
            end -= 1;
        }
        let span = self.span(start, end);
        let token = if self.scanner.bytes().get(span.range()) == Some(&b"xml"[..]) {
            Token::XmlDeclaration(span)
        } else {
            Token::ProcessingInstruction(span)
        };
        Step::header(self.scanner.skip_bytes(end, &WHITESPACE), Some(token))
    }

    /// `<!...`, with `pos` on the `!`.
    ///
    /// Comments and CDATA sections are scanned to their closers. `DOCTYPE`,
    /// `ENTITY` and `NOTATION` emit a marker and leave their contents to
    /// attribute scanning.
    pub(super) fn on_bang(&self, pos: usize) -> Step {
        let s = &self.scanner;
        if s.starts_with_at(pos, b"!--") {
            let start = pos + 3;
            let end = s.seek_literal(start, b"-->");
            Step::text(end + 3, Token::Comment(self.span(start, end)))
        } else if s.starts_with_at(pos, b"!DOCTYPE") {
            Step::header(pos + 8, Some(Token::DocumentType))
        } else if s.starts_with_at(pos, b"![CDATA[") {
            let start = pos + 8;
            let end = s.seek_literal(start, b"]]>");
            Step::text(end + 3, Token::CData(self.span(start, end)))
        } else if s.starts_with_at(pos, b"!ENTITY") {
            Step::header(pos + 7, Some(Token::Entity))
        } else if s.starts_with_at(pos, b"!NOTATION") {
            Step::header(pos + 9, Some(Token::Notation))
        } else {
            trace!(pos, "unrecognised <! construct, scanning as attributes");
            Step::header(pos, None)
        }
    }

    /// `<[...]>`, with `pos` on the `[`.
    pub(super) fn on_shorthand_cdata(&self, pos: usize) -> Step {
        let start = pos + 1;
        let end = self.scanner.seek_literal(start, b"]>");
        Step::text(end + 2, Token::CData(self.span(start, end)))
    }

    /// Body of an opaque element, with `pos` just past its header. Runs to
    /// the literal `</name`, which the dispatcher then lexes as a close.
    pub(super) fn on_opaque_body(&self, pos: usize, name: &[u8]) -> Step {
        let mut closing = Vec::with_capacity(name.len() + 2);
        closing.extend_from_slice(b"</");
        closing.extend_from_slice(name);
        let end = self.scanner.seek_literal(pos, &closing);
        trace!(pos, end, "opaque element body");
        Step::header(end, Some(Token::Text(self.span(pos, end))))
    }

    /// One attribute inside a header.
    ///
    /// The name is one of `"quoted"`, `[ ... ]>` (one opaque name, used by
    /// `DOCTYPE` internal subsets), `{expression}`, or a bare run. A value
    /// follows an optional `=` and is quoted, `{expression}` or bare.
    ///
    /// The header's closing `>` is left for the dispatcher.
    pub(super) fn on_attribute(&self, pos: usize) -> Result<Step, LexError> {
        let s = &self.scanner;
        let (mut attr, mut i) = match s.byte_at(pos) {
            Some(quote @ (b'"' | b'\'')) => {
                let end = s.seek_byte(pos + 1, &ByteSet::new(&[quote]));
                (AttributeBuilder::named(pos + 1, end), end + 1)
            }
            Some(b'[') if s.is_at(pos + 1, &WHITESPACE) => {
                let end = s.seek_literal(pos, b"]>") + 1;
                (AttributeBuilder::named(pos, end), end)
            }
            Some(b'{') => {
                let close = balance_expression(s, pos)?;
                let mut attr = AttributeBuilder::named(pos + 1, close);
                attr.expression = true;
                (attr, close + 1)
            }
            _ => {
                let end = s.seek_byte(pos, &ATTRIBUTE_NAME_STOPS);
                (AttributeBuilder::named(pos, end), end)
            }
        };

        match s.byte_at(i) {
            Some(b'>') => {
                // `<?pi name?>`: the `?` is part of the close.
                if s.byte_at(i - 1) == Some(b'?') {
                    attr.name.1 -= 1;
                    i -= 1;
                }
                return Ok(Step::header(i, Some(attr.build(self))));
            }
            Some(b'/') if s.byte_at(i + 1) == Some(b'>') => {
                return Ok(Step::header(i, Some(attr.build(self))));
            }
            _ => {}
        }

        let eq = s.skip_bytes(i, &WHITESPACE);
        if s.byte_at(eq) != Some(b'=') {
            return Ok(Step::header(i, Some(attr.build(self))));
        }

        let start = s.skip_bytes(eq + 1, &WHITESPACE);
        i = match s.byte_at(start) {
            Some(quote) if QUOTES.contains(quote) => {
                let end = s.seek_byte(start + 1, &ByteSet::new(&[quote]));
                attr.value = Some((start + 1, end));
                end + 1
            }
            Some(b'{') => {
                let close = balance_expression(s, start)?;
                attr.expression = true;
                attr.value = Some((start + 1, close));
                close + 1
            }
            _ => {
                let mut end = s.seek_byte(start, &UNQUOTED_VALUE_STOPS);
                if s.byte_at(end) == Some(b'>') && s.byte_at(end - 1) == Some(b'?') {
                    end -= 1;
                }
                attr.value = Some((start, end));
                end
            }
        };
        Ok(Step::header(
            s.skip_bytes(i, &WHITESPACE),
            Some(attr.build(self)),
        ))
    }
}
