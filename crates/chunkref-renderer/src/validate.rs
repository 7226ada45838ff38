//! Checks identifier markers in generated text against the registry.

use chunkref_common::IdIndex;
use regex::Captures;

use crate::explicit::ID_MARKER_RE;

/// Drops every `[REF:id]` whose id is not in `by_id`. Known markers stay
/// raw so they can be rendered later by the explicit marker pass.
pub fn retain_known_markers(text: &str, by_id: &IdIndex) -> String {
    ID_MARKER_RE
        .replace_all(text, |caps: &Captures| -> String {
            let id = &caps["id"];
            if by_id.contains_key(id) {
                caps[0].to_owned()
            } else {
                tracing::debug!("dropping reference to unknown chunk {id}");
                String::new()
            }
        })
        .into_owned()
}
