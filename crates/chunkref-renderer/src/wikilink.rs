//! `[[target]]` links into the chunk browser.

use std::sync::LazyLock;

use markdown_weaver_escape::escape_html;
use regex::{Captures, Regex};

static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[(.+?)\]\]").unwrap());

/// Turns each `[[target]]` into an anchor pointing at `route` followed by
/// the percent-encoded target. The visible text is the target as written.
pub fn link_wikilinks(html: &str, route: &str) -> String {
    WIKILINK_RE
        .replace_all(html, |caps: &Captures| -> String {
            let target = &caps[1];
            let href = format!("{route}{}", urlencoding::encode(target));
            let mut out = String::with_capacity(href.len() + target.len() + 16);
            out.push_str("<a href=\"");
            // Writing into a String can't fail.
            let _ = escape_html(&mut out, &href);
            out.push_str("\">");
            out.push_str(target);
            out.push_str("</a>");
            out
        })
        .into_owned()
}
