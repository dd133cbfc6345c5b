//! HTML string parsing via scraper/html5ever.
//!
//! Turns raw HTML into the [`Node`] tree the emitter consumes. Parsing
//! is lenient: malformed markup is repaired by html5ever the way
//! browsers repair it, so this module only reports an error when the
//! input yields nothing parseable at all.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node as ScraperNode, Selector};

use crate::node::Node;
use crate::{HtmldownError, Result};

static BODY: Lazy<Selector> = Lazy::new(|| {
    // "body" is a valid selector, parse cannot fail.
    Selector::parse("body").expect("valid selector")
});

/// Parse an HTML string into a node tree rooted at the document body.
///
/// Fragments without an explicit `<body>` are wrapped in one by the
/// parser, so conversion sees the same tree either way. Comments and
/// doctypes are skipped.
pub fn parse_html(html: &str) -> Result<Node> {
    let document = Html::parse_document(html);

    let scope = document
        .select(&BODY)
        .next()
        .unwrap_or_else(|| document.root_element());

    let root = element_to_node(scope);

    if !html.trim().is_empty() && !has_content(&root) {
        return Err(HtmldownError::Parse(
            "input contains no parseable HTML content".to_string(),
        ));
    }

    Ok(root)
}

fn element_to_node(element: ElementRef) -> Node {
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(element.value().name(), attrs);

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(element_to_node(child_element));
                }
            }
            // Comments, doctypes, processing instructions.
            _ => {}
        }
    }

    node
}

fn has_content(node: &Node) -> bool {
    match node {
        Node::Text(text) => !text.trim().is_empty(),
        Node::Element(el) => el.children().count() > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment() {
        let root = parse_html("<p>Hello</p>").unwrap();
        assert_eq!(root.text_content(), "Hello");
    }

    #[test]
    fn test_parse_full_document_scopes_to_body() {
        let html = "<html><head><title>skip</title></head>\
                    <body><p>kept</p></body></html>";
        let root = parse_html(html).unwrap();
        assert_eq!(root.text_content(), "kept");
    }

    #[test]
    fn test_tag_names_are_lowercased() {
        let root = parse_html("<P>x</P>").unwrap();
        let Node::Element(body) = &root else {
            panic!("expected element");
        };
        let Some(Node::Element(p)) = body.children().next() else {
            panic!("expected p element");
        };
        assert_eq!(p.tag(), "p");
    }

    #[test]
    fn test_attributes_survive_parsing() {
        let root = parse_html(r#"<a href="https://x.com">x</a>"#).unwrap();
        let Node::Element(body) = &root else {
            panic!("expected element");
        };
        let Some(Node::Element(a)) = body.children().next() else {
            panic!("expected a element");
        };
        assert_eq!(a.attr("href"), Some("https://x.com"));
    }

    #[test]
    fn test_malformed_html_is_repaired() {
        // Unclosed tags parse leniently instead of erroring.
        let root = parse_html("<p>one<p>two").unwrap();
        assert_eq!(root.text_content(), "onetwo");
    }

    #[test]
    fn test_empty_input_yields_empty_tree() {
        let root = parse_html("").unwrap();
        assert_eq!(root.text_content(), "");
    }

    #[test]
    fn test_comment_only_input_is_an_error() {
        let err = parse_html("<!-- nothing here -->").unwrap_err();
        assert!(matches!(err, HtmldownError::Parse(_)));
    }

    #[test]
    fn test_entities_are_decoded() {
        let root = parse_html("<p>a &amp; b</p>").unwrap();
        assert_eq!(root.text_content(), "a & b");
    }
}
