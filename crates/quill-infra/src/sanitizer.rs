//! HTML sanitization with ammonia.

use std::collections::{HashMap, HashSet};

use ammonia::Builder as AmmoniaBuilder;

use quill_core::ports::HtmlSanitizer;

/// Allow-list sanitizer for post bodies and excerpts.
pub struct AmmoniaSanitizer {
    body: AmmoniaBuilder<'static>,
    paragraphs: AmmoniaBuilder<'static>,
}

impl AmmoniaSanitizer {
    pub fn new() -> Self {
        Self {
            body: build_body_sanitizer(),
            paragraphs: build_paragraph_sanitizer(),
        }
    }
}

impl Default for AmmoniaSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlSanitizer for AmmoniaSanitizer {
    fn sanitize_body(&self, html: &str) -> String {
        self.body.clean(html).to_string()
    }

    fn paragraphs_only(&self, html: &str) -> String {
        self.paragraphs.clean(html).to_string()
    }
}

fn build_body_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    builder.tags(HashSet::from([
        "h1",
        "h2",
        "h3",
        "b",
        "i",
        "u",
        "s",
        "strong",
        "em",
        "p",
        "br",
        "ul",
        "ol",
        "li",
        "blockquote",
        "a",
        "img",
        "pre",
        "code",
        "span",
    ]));

    builder.tag_attributes(HashMap::from([
        ("a", HashSet::from(["href", "name", "target"])),
        ("img", HashSet::from(["src"])),
        ("li", HashSet::from(["class"])),
        ("span", HashSet::from(["class"])),
        ("code", HashSet::from(["class"])),
    ]));
    builder.generic_attributes(HashSet::new());
    builder.url_schemes(HashSet::from(["data", "http"]));

    builder
}

fn build_paragraph_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    builder.tags(HashSet::from(["p"]));
    builder.tag_attributes(HashMap::new());
    builder.generic_attributes(HashSet::new());

    builder
}
