use std::path::Path;

use kdl::{KdlDocument, KdlNode};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::ChunkRefError;

pub const DEFAULT_WIKILINK_ROUTE: &str = "#/chunks?ref=";

/// Rendering settings for one document view.
///
/// Loaded from KDL:
///
/// ```kdl
/// current-id "c1"
/// wikilink-route "#/chunks?ref="
/// passes explicit=true implicit=true wikilinks=false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chunk currently on screen; mentions of it render as self-references.
    pub current_id: Option<SmolStr>,
    /// Prefix for `[[target]]` links, followed by the percent-encoded target.
    pub wikilink_route: String,
    pub passes: Passes,
}

/// Which rewrite passes run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Passes {
    pub explicit: bool,
    pub wikilinks: bool,
    pub implicit: bool,
}

impl Default for Passes {
    fn default() -> Self {
        Self {
            explicit: true,
            wikilinks: true,
            implicit: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            current_id: None,
            wikilink_route: DEFAULT_WIKILINK_ROUTE.to_owned(),
            passes: Passes::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChunkRefError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|e| ChunkRefError::io(path, e))?;
        Self::from_kdl(&src)
    }

    /// Parses a KDL document. Missing nodes keep their defaults and unknown
    /// nodes are ignored.
    pub fn from_kdl(src: &str) -> Result<Self, ChunkRefError> {
        let doc: KdlDocument = src.parse()?;
        let mut config = Config::default();

        for node in doc.nodes() {
            match node.name().value() {
                "current-id" => config.current_id = Some(first_string(node)?.into()),
                "wikilink-route" => config.wikilink_route = first_string(node)?.to_owned(),
                "passes" => {
                    for entry in node.entries() {
                        let Some(name) = entry.name() else {
                            continue;
                        };
                        let enabled = entry.value().as_bool().ok_or_else(|| {
                            ChunkRefError::InvalidConfig(format!(
                                "passes.{} must be true or false",
                                name.value()
                            ))
                        })?;
                        match name.value() {
                            "explicit" => config.passes.explicit = enabled,
                            "wikilinks" => config.passes.wikilinks = enabled,
                            "implicit" => config.passes.implicit = enabled,
                            other => tracing::warn!("ignoring unknown pass {other}"),
                        }
                    }
                }
                other => tracing::warn!("ignoring unknown config node {other}"),
            }
        }

        Ok(config)
    }
}

fn first_string(node: &KdlNode) -> Result<&str, ChunkRefError> {
    node.entries()
        .iter()
        .find(|entry| entry.name().is_none())
        .and_then(|entry| entry.value().as_string())
        .ok_or_else(|| {
            ChunkRefError::InvalidConfig(format!(
                "{} expects a string argument",
                node.name().value()
            ))
        })
}
