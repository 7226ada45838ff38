//! Informal mentions such as `Theorem 3.2`, `thm 3` or `定理 3.2`.

use std::sync::LazyLock;

use chunkref_common::{AliasTable, TypeNumberIndex, find_id};
use regex::{Captures, Regex};

use crate::markup::{ANNOTATION_PATTERN, Annotation, TAG_PATTERN};

/// Alias followed by a dotted number, with no word boundary in front of the
/// alias. Tags and annotations we already emitted are matched as `skip` so
/// the same pass steps over them.
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    let aliases = AliasTable::global()
        .aliases()
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?s)(?P<skip>{ANNOTATION_PATTERN}|{TAG_PATTERN})|(?i:(?P<alias>{aliases}))\s*(?P<num>[0-9]+(?:\.[0-9]+)*)"
    ))
    .expect("alias alternation is built from escaped literals")
});

/// Wraps every mention that resolves through `index` in an annotation.
///
/// Mentions of `current_id` become self-references. Mentions that do not
/// resolve are left exactly as written.
pub fn resolve_implicit_references(
    html: &str,
    index: &TypeNumberIndex,
    current_id: Option<&str>,
) -> String {
    let table = AliasTable::global();
    MENTION_RE
        .replace_all(html, |caps: &Captures| -> String {
            let text = &caps[0];
            if caps.name("skip").is_some() {
                return text.to_owned();
            }
            let Some(ty) = table.get(&caps["alias"]) else {
                return text.to_owned();
            };
            let number = &caps["num"];
            match find_id(index, ty.as_str(), number) {
                None => {
                    tracing::trace!("no {ty} {number} in registry");
                    text.to_owned()
                }
                Some(id) if current_id == Some(id.as_str()) => Annotation::SelfRef {
                    text,
                    chunk_type: ty.as_str(),
                    number,
                }
                .to_html(),
                Some(id) => Annotation::Link {
                    text,
                    chunk_type: Some(ty.as_str()),
                    number: Some(number),
                    id: id.as_str(),
                }
                .to_html(),
            }
        })
        .into_owned()
}
