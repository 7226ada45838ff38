//! Machine-generated `[REF:...]` markers.
//!
//! Two grammars share the `[REF:` prefix. The typed form
//! `[REF:type/number/summary]` is resolved first, then the identifier form
//! `[REF:id]`, and finally anything still shaped like a marker is deleted.

use std::sync::LazyLock;

use chunkref_common::{IdIndex, TypeNumberIndex, find_id, label, type_key};
use regex::{Captures, Regex};

use crate::markup::Annotation;

pub(crate) const MARKER_PREFIX: &str = "[REF:";

static TYPED_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[REF:(?P<type>[^/\]\n]+)/(?P<num>[^/\]\n]+)/(?P<summary>[^\]\n]*)\]").unwrap()
});

pub(crate) static ID_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[REF:(?P<id>[^/\[\]\n]+)\]").unwrap());

/// Any leftover marker. An unclosed one ends at a newline or a tag, so a
/// broken marker never takes the text after it along.
static LOOSE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[REF:[^\]\n<]*\]?").unwrap());

/// Label shown for an identifier marker that names no known chunk.
pub const DANGLING_LABEL: &str = "REF";

/// Resolves `[REF:...]` markers against the registry views.
///
/// The result never contains `[REF:`: markers that cannot be rendered are
/// removed rather than shown raw.
pub fn resolve_explicit_markers(
    html: &str,
    index: &TypeNumberIndex,
    by_id: Option<&IdIndex>,
) -> String {
    if !html.contains(MARKER_PREFIX) {
        return html.to_owned();
    }
    let typed = resolve_typed_markers(html, index);
    let by_identifier = resolve_id_markers(&typed, by_id);
    strip_markers(&by_identifier)
}

fn resolve_typed_markers(html: &str, index: &TypeNumberIndex) -> String {
    TYPED_MARKER_RE
        .replace_all(html, |caps: &Captures| -> String {
            let chunk_type = &caps["type"];
            let number = &caps["num"];
            let summary = &caps["summary"];

            let mut text = format!("{} {}", label(chunk_type), number);
            if !summary.is_empty() {
                text.push_str(": ");
                text.push_str(summary);
            }

            match find_id(index, chunk_type, number) {
                Some(id) => Annotation::Link {
                    text: &text,
                    chunk_type: Some(type_key(chunk_type).as_ref()),
                    number: Some(number),
                    id: id.as_str(),
                }
                .to_html(),
                None => {
                    tracing::debug!("typed marker {chunk_type}/{number} did not resolve");
                    Annotation::Chip { text: &text }.to_html()
                }
            }
        })
        .into_owned()
}

fn resolve_id_markers(html: &str, by_id: Option<&IdIndex>) -> String {
    ID_MARKER_RE
        .replace_all(html, |caps: &Captures| -> String {
            let id = &caps["id"];
            let Some(record) = by_id.and_then(|records| records.get(id)) else {
                tracing::debug!("marker id {id} is not in the registry");
                return Annotation::Dangling {
                    text: DANGLING_LABEL,
                    id,
                }
                .to_html();
            };

            let chunk_type = record.chunk_type.as_deref();
            let number = record.number.as_deref();
            let text = match (chunk_type, number) {
                (Some(ty), Some(num)) => format!("{} {}", label(ty), num),
                (Some(ty), None) => label(ty).into_owned(),
                (None, Some(num)) => num.to_owned(),
                (None, None) => DANGLING_LABEL.to_owned(),
            };
            let key = chunk_type.map(type_key);
            Annotation::Link {
                text: &text,
                chunk_type: key.as_deref(),
                number,
                id,
            }
            .to_html()
        })
        .into_owned()
}

/// Deletes every remaining marker. Repeats until none is left, since a
/// deletion can join the halves of a new `[REF:` together.
fn strip_markers(html: &str) -> String {
    let mut out = html.to_owned();
    while out.contains(MARKER_PREFIX) {
        let stripped = LOOSE_MARKER_RE.replace_all(&out, "").into_owned();
        tracing::trace!("removed {} bytes of malformed markers", out.len() - stripped.len());
        out = stripped;
    }
    out
}
