use super::*;
use pretty_assertions::assert_eq;

#[test]
fn resolves_name_then_value() {
    let source = r#"<a href="x">"#;
    let token = Token::Attribute {
        name: Span::new(3, 7),
        value: Some(Span::new(9, 10)),
    };
    assert_eq!(resolve(source, &token), Ok(vec!["href", "x"]));
}

#[test]
fn markers_resolve_to_nothing() {
    assert_eq!(resolve("</a>", &Token::Close), Ok(vec![]));
    assert_eq!(resolve("<>", &Token::ElementOpen(None)), Ok(vec![]));
}

#[test]
fn empty_span_resolves_to_empty_str() {
    let token = Token::Text(Span::new(2, 2));
    assert_eq!(resolve("abcd", &token), Ok(vec![""]));
}

#[test]
fn describe_pairs_kind_and_text() {
    let token = Token::ElementOpen(Some(Span::new(1, 2)));
    assert_eq!(describe("<p>", &token), Ok((NodeKind::Element, vec!["p"])));
}

#[test]
fn span_past_end_is_out_of_bounds() {
    let span = Span::new(0, 9);
    assert_eq!(
        resolve("short", &Token::Comment(span)),
        Err(ResolveError::OutOfBounds { span, len: 5 })
    );
}

#[test]
fn inverted_span_is_out_of_bounds() {
    let span = Span::new(3, 1);
    assert_eq!(
        resolve("abcd", &Token::Text(span)),
        Err(ResolveError::OutOfBounds { span, len: 4 })
    );
}

#[test]
fn span_inside_a_character_is_rejected() {
    // `é` is two bytes.
    let span = Span::new(0, 1);
    assert_eq!(
        resolve("é", &Token::Text(span)),
        Err(ResolveError::NotCharBoundary { span })
    );
}

#[test]
fn error_messages_name_the_span() {
    let err = ResolveError::OutOfBounds {
        span: Span::new(2, 8),
        len: 4,
    };
    assert_eq!(err.to_string(), "span 2..8 is outside a source of 4 bytes");
}
