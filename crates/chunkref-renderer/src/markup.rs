//! Inline markup emitted for resolved and unresolved references.
//!
//! Every annotation is a `<span>` whose class tells the viewer which state it
//! is in. Navigation data sits in `data-type`, `data-num` and `data-id`.
//! Emitted markup never contains a literal `[`, so marker passes that run
//! afterwards cannot mistake it for a `[REF:` token. Annotation text never
//! contains `<`, so an annotation always ends at its own `</span>`.

use std::sync::LazyLock;

use markdown_weaver_escape::escape_html;
use regex::Regex;

pub const LINK_CLASS: &str = "chunk-ref";
pub const SELF_CLASS: &str = "chunk-ref chunk-ref-self";
pub const DANGLING_CLASS: &str = "chunk-ref chunk-ref-dangling";
pub const CHIP_CLASS: &str = "chunk-chip";

/// Matches one annotation emitted by this module, content included.
pub(crate) const ANNOTATION_PATTERN: &str = r#"<span class="chunk-(?:ref|chip)[^"]*"[^>]*>[^<]*</span>"#;

/// An HTML tag, comment or doctype. Attribute names are ASCII, so a bare `<`
/// in running text such as `a<b 则 c>d` or `x < y` is not taken for a tag.
pub(crate) const TAG_PATTERN: &str = r#"<(?:/?[A-Za-z][A-Za-z0-9-]*(?:\s+[A-Za-z_:@][-A-Za-z0-9_:.@]*(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'<>=`]+))?)*\s*/?|!--.*?--|![A-Za-z][^<>]*)>"#;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?s){TAG_PATTERN}")).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation<'a> {
    /// Resolved reference the viewer can navigate to.
    Link {
        text: &'a str,
        chunk_type: Option<&'a str>,
        number: Option<&'a str>,
        id: &'a str,
    },
    /// Reference to the chunk already on screen. Carries no `data-id`.
    SelfRef {
        text: &'a str,
        chunk_type: &'a str,
        number: &'a str,
    },
    /// Identifier marker whose id is not in the registry. Styled like a link;
    /// the viewer decides what a dangling target does.
    Dangling { text: &'a str, id: &'a str },
    /// Displayed but not clickable.
    Chip { text: &'a str },
}

impl Annotation<'_> {
    pub fn class(&self) -> &'static str {
        match self {
            Annotation::Link { .. } => LINK_CLASS,
            Annotation::SelfRef { .. } => SELF_CLASS,
            Annotation::Dangling { .. } => DANGLING_CLASS,
            Annotation::Chip { .. } => CHIP_CLASS,
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(96);
        out.push_str("<span class=\"");
        out.push_str(self.class());
        out.push('"');

        let text = match *self {
            Annotation::Link {
                text,
                chunk_type,
                number,
                id,
            } => {
                if let Some(chunk_type) = chunk_type {
                    push_attr(&mut out, "data-type", chunk_type);
                }
                if let Some(number) = number {
                    push_attr(&mut out, "data-num", number);
                }
                push_attr(&mut out, "data-id", id);
                text
            }
            Annotation::SelfRef {
                text,
                chunk_type,
                number,
            } => {
                push_attr(&mut out, "data-type", chunk_type);
                push_attr(&mut out, "data-num", number);
                text
            }
            Annotation::Dangling { text, id } => {
                push_attr(&mut out, "data-id", id);
                text
            }
            Annotation::Chip { text } => text,
        };

        out.push('>');
        push_text(&mut out, text);
        out.push_str("</span>");
        out
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    let mut escaped = String::with_capacity(value.len());
    // Writing into a String can't fail.
    let _ = escape_html(&mut escaped, value);
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    push_escaped_brackets(out, &escaped);
    out.push('"');
}

/// Text is already HTML. Labels are inline text, so tags are dropped, and
/// any `<` left over is escaped along with `[`.
fn push_text(out: &mut String, text: &str) {
    let stripped = TAG_RE.replace_all(text, "");
    push_escaped_brackets(out, &stripped.replace('<', "&lt;"));
}

fn push_escaped_brackets(out: &mut String, text: &str) {
    let mut parts = text.split('[');
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for part in parts {
        out.push_str("&#91;");
        out.push_str(part);
    }
}
