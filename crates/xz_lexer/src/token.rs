//! Token and node-kind definitions.
//!
//! A [`Token`] never holds text. It names a construct and carries zero, one or
//! two [`Span`]s into the source it was lexed from. The shape of each variant
//! is fixed, so a consumer can never read a pair that a kind does not declare.

use crate::Span;

/// Stable numeric node kinds shared with downstream consumers.
///
/// The numbering follows the DOM `nodeType` constants where one exists.
/// `EntityReference`, `Document` and `DocumentFragment` are reserved: the
/// lexer never produces them (entity references stay inside text, and
/// fragments are unnamed [`Token::ElementOpen`] tokens).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum NodeKind {
    XmlDeclaration = 0,
    Element = 1,
    Attribute = 2,
    Text = 3,
    CData = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
    Close = 13,
    ExpressionAttribute = 14,
    Expression = 15,
}

impl NodeKind {
    /// Every kind, indexed by its code.
    pub const ALL: [NodeKind; 16] = [
        NodeKind::XmlDeclaration,
        NodeKind::Element,
        NodeKind::Attribute,
        NodeKind::Text,
        NodeKind::CData,
        NodeKind::EntityReference,
        NodeKind::Entity,
        NodeKind::ProcessingInstruction,
        NodeKind::Comment,
        NodeKind::Document,
        NodeKind::DocumentType,
        NodeKind::DocumentFragment,
        NodeKind::Notation,
        NodeKind::Close,
        NodeKind::ExpressionAttribute,
        NodeKind::Expression,
    ];

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Upper-case constant name, as printed in token dumps.
    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::XmlDeclaration => "XML_DECLARATION",
            NodeKind::Element => "ELEMENT_NODE",
            NodeKind::Attribute => "ATTRIBUTE_NODE",
            NodeKind::Text => "TEXT_NODE",
            NodeKind::CData => "CDATA_SECTION_NODE",
            NodeKind::EntityReference => "ENTITY_REFERENCE_NODE",
            NodeKind::Entity => "ENTITY_NODE",
            NodeKind::ProcessingInstruction => "PROCESSING_INSTRUCTION_NODE",
            NodeKind::Comment => "COMMENT_NODE",
            NodeKind::Document => "DOCUMENT_NODE",
            NodeKind::DocumentType => "DOCUMENT_TYPE_NODE",
            NodeKind::DocumentFragment => "DOCUMENT_FRAGMENT_NODE",
            NodeKind::Notation => "NOTATION_NODE",
            NodeKind::Close => "CLOSE_ELEMENT",
            NodeKind::ExpressionAttribute => "EXPRESSION_ATTRIBUTE",
            NodeKind::Expression => "EXPRESSION",
        }
    }

    /// Returns `false` for the reserved kinds the lexer never emits.
    pub const fn is_emitted(self) -> bool {
        !matches!(
            self,
            NodeKind::EntityReference | NodeKind::Document | NodeKind::DocumentFragment
        )
    }
}

/// One lexical construct.
///
/// Markers without spans (`Close`, `Entity`, `Notation`, `DocumentType`)
/// delimit constructs; the items inside `<!ENTITY ...>`, `<!NOTATION ...>` and
/// `<!DOCTYPE ...>` follow them as [`Token::Attribute`] tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// `<?xml ...?>`: span of the literal name `xml`.
    XmlDeclaration(Span),
    /// `<name`: span of the tag name, `None` for an unnamed fragment `<>`.
    ElementOpen(Option<Span>),
    /// Name and optional value. Quotes are not part of either span.
    Attribute { name: Span, value: Option<Span> },
    Text(Span),
    /// Body of `<![CDATA[...]]>` or the shorthand `<[...]>`.
    CData(Span),
    /// `<!ENTITY` marker.
    Entity,
    /// `<?name ...?>`: span of the instruction name.
    ProcessingInstruction(Span),
    /// Body of `<!-- ... -->`.
    Comment(Span),
    /// `<!DOCTYPE` marker.
    DocumentType,
    /// `<!NOTATION` marker.
    Notation,
    /// End of an element: `</name>`, `</>`, `/>`, or a synthetic close after
    /// an HTML void element.
    Close,
    /// Attribute whose name or value is an embedded expression.
    ///
    /// For a bare expression such as a spread (`{...props}`) the name span is
    /// the expression body and there is no value.
    ExpressionAttribute { name: Span, value: Option<Span> },
    /// Inline `{...}` content: span of the body between the braces.
    Expression(Span),
}

impl Token {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Token::XmlDeclaration(_) => NodeKind::XmlDeclaration,
            Token::ElementOpen(_) => NodeKind::Element,
            Token::Attribute { .. } => NodeKind::Attribute,
            Token::Text(_) => NodeKind::Text,
            Token::CData(_) => NodeKind::CData,
            Token::Entity => NodeKind::Entity,
            Token::ProcessingInstruction(_) => NodeKind::ProcessingInstruction,
            Token::Comment(_) => NodeKind::Comment,
            Token::DocumentType => NodeKind::DocumentType,
            Token::Notation => NodeKind::Notation,
            Token::Close => NodeKind::Close,
            Token::ExpressionAttribute { .. } => NodeKind::ExpressionAttribute,
            Token::Expression(_) => NodeKind::Expression,
        }
    }

    /// The token's spans, in declaration order (name before value).
    pub fn spans(&self) -> impl Iterator<Item = Span> {
        self.pairs().into_iter().flatten()
    }

    fn pairs(&self) -> [Option<Span>; 2] {
        match *self {
            Token::XmlDeclaration(span)
            | Token::Text(span)
            | Token::CData(span)
            | Token::ProcessingInstruction(span)
            | Token::Comment(span)
            | Token::Expression(span) => [Some(span), None],
            Token::ElementOpen(name) => [name, None],
            Token::Attribute { name, value } | Token::ExpressionAttribute { name, value } => {
                [Some(name), value]
            }
            Token::Entity | Token::DocumentType | Token::Notation | Token::Close => [None, None],
        }
    }
}
