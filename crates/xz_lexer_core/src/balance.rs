//! Brace balancing for embedded code expressions.
//!
//! Embedded expressions (`{...}` attribute values and inline content) are not
//! parsed. The balancer only needs to find the brace that closes the
//! expression, which means it must not be fooled by brackets inside:
//!
//! - single, double and backtick quoted strings (backslash escapes one byte)
//! - `${...}` substitutions inside backtick strings, to any depth
//! - `// line` and `/* block */` comments
//!
//! `(` and `)` count toward nesting together with `{` and `}`.
//!
//! # Recovery
//!
//! A single or double quoted string that reaches a line break is abandoned
//! there. Unterminated strings, comments and expressions run to the end of
//! the buffer. None of these are errors.
//!
//! # Termination
//!
//! Every step advances the position, so the number of steps is bounded by the
//! buffer length. The balancer still counts steps against a budget derived
//! from that bound and reports [`BalanceError`] if it is exhausted, turning a
//! scanning defect into an error instead of a hang.

use std::fmt;

use crate::scan::{ByteSet, Scanner, LINE_BREAKS};

/// Bytes that can change the balancer's state.
const EXPRESSION_STOPS: ByteSet = ByteSet::new(b"{}()\"'`/");

const DOUBLE_QUOTE_STOPS: ByteSet = ByteSet::new(b"\"\\\n\r");
const SINGLE_QUOTE_STOPS: ByteSet = ByteSet::new(b"'\\\n\r");
const TEMPLATE_STOPS: ByteSet = ByteSet::new(b"`\\");

/// Steps allowed beyond twice the buffer length. Covers the final step of
/// each nesting level after the scan has run off the end.
const BUDGET_SLACK: usize = 16;

/// The balancer exceeded its step budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceError {
    /// Offset of the opening brace of the outermost expression.
    pub start: usize,
    /// Number of steps that were allowed.
    pub budget: usize,
}

impl fmt::Display for BalanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expression opened at byte {} did not balance within {} steps",
            self.start, self.budget
        )
    }
}

impl std::error::Error for BalanceError {}

/// Step counter shared by an expression and all of its nested substitutions.
struct Budget {
    remaining: usize,
    error: BalanceError,
}

impl Budget {
    fn for_scan(len: usize, start: usize) -> Self {
        let budget = len.saturating_mul(2).saturating_add(BUDGET_SLACK);
        Self {
            remaining: budget,
            error: BalanceError { start, budget },
        }
    }

    #[inline]
    fn step(&mut self) -> Result<(), BalanceError> {
        match self.remaining.checked_sub(1) {
            Some(remaining) => {
                self.remaining = remaining;
                Ok(())
            }
            None => Err(self.error),
        }
    }
}

/// Nesting level in the balancer's explicit stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Frame {
    /// Inside `{...}`, the outermost expression or a `${...}` substitution.
    /// `depth` counts the open `{` and `(` of this level.
    Expression { depth: u32 },
    /// Inside a backtick template string.
    Template,
}

/// Find the brace closing the expression whose opening brace is at `open`.
///
/// Returns the offset of the matching `}`, which is also the exclusive end of
/// the expression body `open + 1..end`. If the expression is never closed the
/// result is at or past the end of the buffer.
///
/// Template strings and their substitutions nest on a heap-allocated stack,
/// so nesting depth is limited by memory rather than by the thread's stack.
pub fn balance_expression(scanner: &Scanner<'_>, open: usize) -> Result<usize, BalanceError> {
    let s = scanner;
    let len = s.len();
    let mut budget = Budget::for_scan(len, open);
    let mut stack = vec![Frame::Expression { depth: 1 }];
    let mut pos = open;

    while let Some(frame) = stack.last_mut() {
        match frame {
            Frame::Expression { depth } => {
                // A finished substitution hands `pos` (its closing brace)
                // back to the enclosing template.
                if *depth == 0 || pos >= len {
                    stack.pop();
                    continue;
                }
                pos = s.seek_byte(pos + 1, &EXPRESSION_STOPS);
                match s.byte_at(pos) {
                    Some(quote @ (b'"' | b'\'')) => {
                        pos = skip_string(s, pos, quote, &mut budget)?;
                    }
                    // The template body starts right after the backtick.
                    Some(b'`') => {
                        stack.push(Frame::Template);
                        pos += 1;
                    }
                    // Leave the position on the line break; the next step moves past it.
                    Some(b'/') if s.starts_with_at(pos, b"//") => {
                        pos = s.seek_byte(pos, &LINE_BREAKS);
                    }
                    // Land on the closing `/` of `*/`.
                    Some(b'/') if s.starts_with_at(pos, b"/*") => {
                        pos = s.seek_literal(pos + 2, b"*/") + 1;
                    }
                    Some(b'}' | b')') => *depth -= 1,
                    Some(b'{' | b'(') => *depth += 1,
                    _ => {}
                }
            }
            Frame::Template => {
                // On the closing backtick, or truncated.
                if pos >= len || s.byte_at(pos) == Some(b'`') {
                    stack.pop();
                    continue;
                }
                pos = s
                    .seek_byte(pos, &TEMPLATE_STOPS)
                    .min(s.seek_literal(pos, b"${"));
                if s.starts_with_at(pos, b"${") {
                    // The substitution scans on from its `{`.
                    stack.push(Frame::Expression { depth: 1 });
                    pos += 1;
                } else if s.byte_at(pos) == Some(b'\\') {
                    pos += 2;
                }
            }
        }
        budget.step()?;
    }
    Ok(pos)
}

/// Skip a single or double quoted string opened by `quote` at `open`.
///
/// Returns the offset of the closing quote, of the line break that abandoned
/// the string, or a position at or past the end of the buffer.
fn skip_string(
    s: &Scanner<'_>,
    open: usize,
    quote: u8,
    budget: &mut Budget,
) -> Result<usize, BalanceError> {
    let len = s.len();
    let stops = if quote == b'"' {
        &DOUBLE_QUOTE_STOPS
    } else {
        &SINGLE_QUOTE_STOPS
    };
    let mut pos = open + 1;
    while pos < len && s.byte_at(pos) != Some(quote) {
        pos = s.seek_byte(pos, stops);
        match s.byte_at(pos) {
            Some(b'\\') => pos += 2,
            Some(b'\n' | b'\r') => break,
            _ => {}
        }
        budget.step()?;
    }
    Ok(pos)
}
