//! Chunk types and their display labels.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of a numbered document chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkType {
    Definition,
    Theorem,
    Lemma,
    Corollary,
    Example,
    Exercise,
    Remark,
    Proposition,
}

impl ChunkType {
    pub const ALL: [ChunkType; 8] = [
        ChunkType::Definition,
        ChunkType::Theorem,
        ChunkType::Lemma,
        ChunkType::Corollary,
        ChunkType::Example,
        ChunkType::Exercise,
        ChunkType::Remark,
        ChunkType::Proposition,
    ];

    /// Canonical lowercase tag, also the key used by the registry index.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkType::Definition => "definition",
            ChunkType::Theorem => "theorem",
            ChunkType::Lemma => "lemma",
            ChunkType::Corollary => "corollary",
            ChunkType::Example => "example",
            ChunkType::Exercise => "exercise",
            ChunkType::Remark => "remark",
            ChunkType::Proposition => "proposition",
        }
    }

    /// Localized name shown to readers.
    pub fn label(&self) -> &'static str {
        match self {
            ChunkType::Definition => "定义",
            ChunkType::Theorem => "定理",
            ChunkType::Lemma => "引理",
            ChunkType::Corollary => "推论",
            ChunkType::Example => "例子",
            ChunkType::Exercise => "练习",
            ChunkType::Remark => "注",
            ChunkType::Proposition => "命题",
        }
    }

    /// Case-insensitive parse of a canonical tag.
    ///
    /// `defination` is accepted too: older ingestion runs wrote it that way.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.to_lowercase();
        match tag.as_str() {
            "definition" | "defination" => Some(ChunkType::Definition),
            "theorem" => Some(ChunkType::Theorem),
            "lemma" => Some(ChunkType::Lemma),
            "corollary" => Some(ChunkType::Corollary),
            "example" => Some(ChunkType::Example),
            "exercise" => Some(ChunkType::Exercise),
            "remark" => Some(ChunkType::Remark),
            "proposition" => Some(ChunkType::Proposition),
            _ => None,
        }
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chunk type: {0}")]
pub struct UnknownChunkType(pub String);

impl FromStr for ChunkType {
    type Err = UnknownChunkType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChunkType::parse(s).ok_or_else(|| UnknownChunkType(s.to_string()))
    }
}

/// Localized display label for a chunk type tag.
///
/// Unknown or empty tags come back unchanged.
pub fn label(chunk_type: &str) -> Cow<'_, str> {
    match ChunkType::parse(chunk_type) {
        Some(ty) => Cow::Borrowed(ty.label()),
        None => Cow::Borrowed(chunk_type),
    }
}

/// Key a raw type tag is indexed under: the canonical tag when it names a
/// known type, its lowercase form otherwise.
pub fn type_key(chunk_type: &str) -> Cow<'static, str> {
    match ChunkType::parse(chunk_type) {
        Some(ty) => Cow::Borrowed(ty.as_str()),
        None => Cow::Owned(chunk_type.to_lowercase()),
    }
}
