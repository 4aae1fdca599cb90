//! The dispatcher: a two-state machine over the source buffer.
//!
//! # States
//!
//! - [`Mode::Text`]: outside markup. Every byte other than `<` starts a text
//!   run (or an inline expression).
//! - [`Mode::Header`]: inside `< ... >`. Whitespace is skipped, `>`, `?>` and
//!   `/>` close the header, anything else starts an attribute.
//!
//! On `<` in text the mode flips to `Header` and the same byte is dispatched
//! again, without being consumed twice. Comments, CDATA sections and opaque
//! bodies are scanned to completion by their handlers, so they need no state
//! of their own.
//!
//! # Termination
//!
//! Every iteration advances the position by at least one byte, so a source of
//! `n` bytes takes at most `n` iterations. Exceeding that is reported as
//! [`LexError::Stalled`] instead of looping.

mod handlers;

use tracing::trace;
use xz_lexer_core::Scanner;

use crate::options::is_html_void_element;
use crate::{LexError, LexOptions, Span, Token};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Text,
    Header,
}

/// Outcome of one construct handler: where to continue, in which mode, and
/// the token to append (if any).
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) pos: usize,
    pub(crate) mode: Mode,
    pub(crate) token: Option<Token>,
}

impl Step {
    fn text(pos: usize, token: Token) -> Self {
        Step {
            pos,
            mode: Mode::Text,
            token: Some(token),
        }
    }

    fn header(pos: usize, token: Option<Token>) -> Self {
        Step {
            pos,
            mode: Mode::Header,
            token,
        }
    }
}

/// Lexing session. Owns the cursor and the output for one call.
pub(crate) struct Lexer<'src, 'opt> {
    scanner: Scanner<'src>,
    options: &'opt LexOptions,
    pos: usize,
    mode: Mode,
    /// Name of the element whose header is being scanned. `None` inside any
    /// other header, and for unnamed fragments.
    open_element: Option<Span>,
    tokens: Vec<Token>,
}

impl<'src, 'opt> Lexer<'src, 'opt> {
    /// The caller guarantees `source.len() <= u32::MAX`.
    pub(crate) fn new(source: &'src str, options: &'opt LexOptions) -> Self {
        Lexer {
            scanner: Scanner::new(source.as_bytes()),
            options,
            pos: 0,
            mode: Mode::Text,
            open_element: None,
            tokens: Vec::new(),
        }
    }

    pub(crate) fn run(mut self) -> Result<Vec<Token>, LexError> {
        let max_iterations = self.scanner.len();
        let mut iterations = 0usize;
        while let Some(byte) = self.scanner.byte_at(self.pos) {
            iterations += 1;
            if iterations > max_iterations {
                return Err(LexError::Stalled {
                    offset: self.pos,
                    iterations,
                });
            }
            if self.mode == Mode::Text && byte != b'<' {
                let step = self.on_text(self.pos)?;
                self.apply(step);
            } else {
                self.mode = Mode::Header;
                self.dispatch_header(byte)?;
            }
        }
        Ok(self.tokens)
    }

    fn dispatch_header(&mut self, byte: u8) -> Result<(), LexError> {
        match byte {
            b'<' => {
                let next = self.pos + 1;
                self.open_element = None;
                let step = match self.scanner.byte_at(next) {
                    Some(b'/') => self.on_close(next),
                    Some(b'?') => self.on_question(next),
                    Some(b'!') => self.on_bang(next),
                    Some(b'[') => self.on_shorthand_cdata(next),
                    _ => self.on_element(next),
                };
                if let Some(Token::ElementOpen(name)) = step.token {
                    self.open_element = name;
                }
                self.apply(step);
            }
            b'/' if self.scanner.byte_at(self.pos + 1) == Some(b'>') => {
                self.open_element = None;
                let step = self.on_close(self.pos);
                self.apply(step);
            }
            b'?' | b'>' => self.close_header(byte),
            // Stray `/` between attributes.
            b' ' | b'\t' | b'\r' | b'\n' | b'/' => self.pos += 1,
            _ => {
                let step = self.on_attribute(self.pos)?;
                self.apply(step);
            }
        }
        Ok(())
    }

    /// Close the current header on `>` or `?>`, then handle opaque and void
    /// elements. An element that is both gets its body text first, then the
    /// synthetic close.
    fn close_header(&mut self, byte: u8) {
        self.pos += 1;
        if byte == b'?' && self.scanner.byte_at(self.pos) == Some(b'>') {
            self.pos += 1;
        }
        self.mode = Mode::Text;

        let Some(name) = self.open_element.take() else {
            return;
        };
        let name = &self.scanner.bytes()[name.range()];
        if self.options.is_opaque(name) {
            let step = self.on_opaque_body(self.pos, name);
            self.apply(step);
        }
        if self.options.html_void_elements && is_html_void_element(name) {
            trace!(pos = self.pos, "void element, synthetic close");
            self.tokens.push(Token::Close);
        }
    }

    fn apply(&mut self, step: Step) {
        self.pos = step.pos;
        self.mode = step.mode;
        if let Some(token) = step.token {
            self.tokens.push(token);
        }
    }

    /// Span for `start..end`, clamped to the source.
    ///
    /// Handlers signal truncation with positions past the end; clamping here
    /// keeps every emitted span inside the buffer.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "source length is checked against u32::MAX before lexing"
    )]
    fn span(&self, start: usize, end: usize) -> Span {
        let len = self.scanner.len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        Span::new(start as u32, end as u32)
    }
}
