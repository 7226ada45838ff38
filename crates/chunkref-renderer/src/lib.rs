//! chunkref renderer
//!
//! Rewrites references between document chunks in rendered HTML into
//! annotated `<span>` elements the viewer can wire up for navigation.
//!
//! The passes are plain string transforms over read-only registry views:
//!
//! - [`resolve_explicit_markers`] handles `[REF:type/number/summary]` and
//!   `[REF:id]` markers and strips whatever is left of malformed ones;
//! - [`link_wikilinks`] turns `[[target]]` into chunk browser links;
//! - [`resolve_implicit_references`] handles informal mentions such as
//!   `Theorem 3.2` or `定理 3.2`.
//!
//! [`ReferenceRenderer`] runs them in that order for one document view.

use chunkref_common::{ChunkRegistry, Config};

pub mod explicit;
pub mod implicit;
pub mod markup;
pub mod validate;
pub mod wikilink;

pub use crate::explicit::resolve_explicit_markers;
pub use crate::implicit::resolve_implicit_references;
pub use crate::markup::Annotation;
pub use crate::validate::retain_known_markers;
pub use crate::wikilink::link_wikilinks;

/// Runs the enabled reference passes for one document view.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceRenderer<'a> {
    registry: &'a ChunkRegistry,
    config: &'a Config,
}

impl<'a> ReferenceRenderer<'a> {
    pub fn new(registry: &'a ChunkRegistry, config: &'a Config) -> Self {
        Self { registry, config }
    }

    #[tracing::instrument(skip_all, fields(len = html.len(), current = ?self.config.current_id))]
    pub fn render(&self, html: &str) -> String {
        let passes = self.config.passes;
        let mut out = html.to_owned();
        if passes.explicit {
            out = resolve_explicit_markers(
                &out,
                self.registry.by_type_and_number(),
                Some(self.registry.by_id()),
            );
        }
        if passes.wikilinks {
            out = link_wikilinks(&out, &self.config.wikilink_route);
        }
        if passes.implicit {
            out = resolve_implicit_references(
                &out,
                self.registry.by_type_and_number(),
                self.config.current_id.as_deref(),
            );
        }
        tracing::debug!("rendered {} bytes", out.len());
        out
    }
}
