//! Lexer configuration.

/// Elements whose body is not lexed as markup unless configured otherwise.
pub const DEFAULT_OPAQUE_ELEMENTS: &[&str] = &["script", "style"];

/// HTML elements that never have a close tag in source text.
pub const HTML_VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "hr", "img", "input", "link", "meta", "param", "command", "keygen",
    "source",
];

/// Options controlling how [`lex_with_options`](crate::lex_with_options)
/// treats HTML and embedded-expression markup.
///
/// Read once at the start of a lexing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexOptions {
    /// Tag names whose body runs verbatim to the matching `</name`.
    /// Matched exactly (case-sensitive).
    pub opaque_elements: Vec<String>,

    /// Lex `{...}` in content as [`Token::Expression`](crate::Token::Expression).
    ///
    /// Brace-led attribute names and values are always lexed as expressions;
    /// this only affects text content.
    pub embedded_expressions: bool,

    /// Emit a synthetic close after the header of an HTML void element.
    pub html_void_elements: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            opaque_elements: DEFAULT_OPAQUE_ELEMENTS
                .iter()
                .map(|&name| name.to_owned())
                .collect(),
            embedded_expressions: false,
            html_void_elements: false,
        }
    }
}

impl LexOptions {
    /// Defaults plus HTML void-element handling.
    pub fn html() -> Self {
        Self {
            html_void_elements: true,
            ..Default::default()
        }
    }

    /// Defaults plus inline embedded expressions.
    pub fn embedded() -> Self {
        Self {
            embedded_expressions: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_embedded_expressions(mut self, enabled: bool) -> Self {
        self.embedded_expressions = enabled;
        self
    }

    #[must_use]
    pub fn with_html_void_elements(mut self, enabled: bool) -> Self {
        self.html_void_elements = enabled;
        self
    }

    /// Replace the opaque element set.
    #[must_use]
    pub fn with_opaque_elements<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opaque_elements = names.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if an element named `name` has an opaque body.
    pub fn is_opaque(&self, name: &[u8]) -> bool {
        self.opaque_elements
            .iter()
            .any(|opaque| opaque.as_bytes() == name)
    }
}

/// Returns `true` if `name` is an HTML void element, ignoring ASCII case.
pub fn is_html_void_element(name: &[u8]) -> bool {
    HTML_VOID_ELEMENTS
        .iter()
        .any(|void| void.as_bytes().eq_ignore_ascii_case(name))
}
