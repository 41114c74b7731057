//! Tests for the scanner and tree builder through the public API.

use textmesh::parser::{Scanner, Token, TreeBuilder};
use textmesh::{Closing, Forest, ParseOptions, Tag, catalog};

fn kinds(input: &str) -> Vec<&'static str> {
    Scanner::new(input)
        .map(|token| match token {
            Token::Open(_) => "open",
            Token::Close(_) => "close",
            Token::Newline { .. } => "newline",
            Token::Noop { .. } => "noop",
            Token::EndOfInput => "eof",
        })
        .collect()
}

// ============================================================================
// Scanner
// ============================================================================

#[test]
fn token_stream_for_mixed_input() {
    assert_eq!(
        kinds("a <b>x</b> <zzz>\n<color=red>y</i>"),
        vec!["open", "close", "noop", "newline", "open", "close"]
    );
}

#[test]
fn raw_text_is_exact_substring() {
    let input = r#"pre <sprite="smile" tint=1>post"#;
    let Some(Token::Open(open)) = Scanner::new(input).next() else {
        panic!("Expected open tag");
    };
    assert_eq!(open.raw, r#"<sprite="smile" tint=1>"#);
    assert_eq!(&input[open.start..open.end], open.raw);
    assert_eq!(open.value(), Some("smile"));
    assert_eq!(open.attributes.get("tint"), Some(&"1"));
}

#[test]
fn scanner_always_terminates() {
    let input = "<<<</</=<#<b=<color=\"<\n<";
    let mut scanner = Scanner::new(input);
    let mut steps = 0;
    while scanner.next_token() != Token::EndOfInput {
        steps += 1;
        assert!(steps <= input.len());
    }
}

#[test]
fn every_catalog_tag_scans() {
    for tag in Tag::ALL {
        let input = if tag.accepts_value() {
            format!("<{}=1>", tag)
        } else {
            format!("<{}>", tag)
        };
        let Some(Token::Open(open)) = Scanner::new(&input).next() else {
            panic!("Expected open tag for {input}");
        };
        assert_eq!(open.tag, tag);
        assert!(catalog::is_known_tag(tag.as_str()));
    }
}

// ============================================================================
// Tree builder
// ============================================================================

#[test]
fn roots_are_in_document_order() {
    let forest = Forest::parse("<b>1</b><i>2</i><u>3");
    let roots: Vec<_> = forest.roots().map(|n| (n.tag(), n.closing())).collect();
    assert_eq!(
        roots,
        vec![
            (Tag::Bold, Closing::Explicit),
            (Tag::Italic, Closing::Explicit),
            (Tag::Underline, Closing::EndOfInput),
        ]
    );
}

#[test]
fn children_are_contained_and_ordered() {
    let forest = Forest::parse("<color=red><b>1</b> <i>2<u>3</u></i>\n<s>4</s>");
    for node in forest.iter() {
        let content = node.content_range();
        let mut previous_end = content.start;
        for child in node.children() {
            let span = child.span();
            assert!(span.start >= previous_end);
            assert!(span.end <= content.end);
            previous_end = span.end;
        }
        assert!(node.span().start < content.start);
        assert!(content.start <= content.end);
        assert!(content.end <= node.span().end);
    }
    assert_eq!(forest.roots().len(), 2);
}

#[test]
fn builder_can_be_fed_manually() {
    let input = "<b>x<i>y";
    let mut builder = TreeBuilder::new(input, ParseOptions::default());
    let mut scanner = Scanner::new(input);
    loop {
        let token = scanner.next_token();
        let done = token == Token::EndOfInput;
        builder.process(token);
        if done {
            break;
        }
    }
    assert_eq!(builder.depth(), 0);
    let forest = builder.finish();
    assert_eq!(forest.len(), 2);
    assert!(forest.iter().all(|n| n.closing() == Closing::EndOfInput));
}

#[test]
fn parent_links_point_upward() {
    let forest = Forest::parse("<b><i><u>x</u></i></b>");
    let u = forest.iter().last().unwrap();
    assert_eq!(u.parent().map(|p| p.tag()), Some(Tag::Italic));
    assert_eq!(
        u.parent().and_then(|p| p.parent()).map(|p| p.tag()),
        Some(Tag::Bold)
    );
    assert!(forest.roots().next().unwrap().parent().is_none());
}
