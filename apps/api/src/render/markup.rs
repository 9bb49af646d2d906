//! Escape-by-default HTML writer.
//!
//! Tag names, attribute names, class names and raw chunks are `&'static str`,
//! so only literals compiled into the binary can become markup. Every runtime
//! string passes through `html_escape` as either text or a quoted attribute
//! value.

use std::borrow::Cow;

const INDENT: &str = "  ";

fn escape(value: &str) -> Cow<'_, str> {
    // Escapes & < > " ' which covers both text and quoted attribute contexts.
    html_escape::encode_quoted_attribute(value)
}

/// Builds an indented HTML document one node at a time.
#[derive(Debug, Default)]
pub struct HtmlWriter {
    out: String,
    open: Vec<&'static str>,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn indent(&mut self) {
        for _ in 0..self.open.len() {
            self.out.push_str(INDENT);
        }
    }

    fn start_tag(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) {
        self.out.push('<');
        self.out.push_str(tag);
        for (name, value) in attrs {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&escape(value));
            self.out.push('"');
        }
        self.out.push('>');
    }

    fn end_tag(&mut self, tag: &'static str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    /// Writes a trusted literal on its own line (doctype, stylesheet).
    pub fn raw(&mut self, markup: &'static str) {
        self.indent();
        self.out.push_str(markup);
        self.out.push('\n');
    }

    pub fn open(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) {
        self.indent();
        self.start_tag(tag, attrs);
        self.out.push('\n');
        self.open.push(tag);
    }

    pub fn open_class(&mut self, tag: &'static str, class: &'static str) {
        self.open(tag, &[("class", class)]);
    }

    /// Closes the innermost open element. No-op when nothing is open.
    pub fn close(&mut self) {
        if let Some(tag) = self.open.pop() {
            self.indent();
            self.end_tag(tag);
            self.out.push('\n');
        }
    }

    /// Writes escaped text on its own line.
    pub fn text(&mut self, text: &str) {
        self.indent();
        self.out.push_str(&escape(text));
        self.out.push('\n');
    }

    /// Writes `<tag attrs>text</tag>` on one line.
    pub fn element_with(&mut self, tag: &'static str, attrs: &[(&'static str, &str)], text: &str) {
        self.indent();
        self.start_tag(tag, attrs);
        self.out.push_str(&escape(text));
        self.end_tag(tag);
        self.out.push('\n');
    }

    pub fn element(&mut self, tag: &'static str, class: Option<&'static str>, text: &str) {
        match class {
            Some(class) => self.element_with(tag, &[("class", class)], text),
            None => self.element_with(tag, &[], text),
        }
    }

    /// Writes an element with no content and no end tag (`meta`, `br`).
    pub fn void(&mut self, tag: &'static str, attrs: &[(&'static str, &str)]) {
        self.indent();
        self.start_tag(tag, attrs);
        self.out.push('\n');
    }

    /// Closes anything still open and returns the markup.
    pub fn finish(mut self) -> String {
        while !self.open.is_empty() {
            self.close();
        }
        self.out
    }
}
