//! Shared types for chunkref: chunk types and labels, the alias table, the
//! chunk registry, configuration and errors.

pub mod alias;
pub mod chunk;
pub mod config;
pub mod error;
pub mod registry;

pub use crate::alias::AliasTable;
pub use crate::chunk::{ChunkType, label, type_key};
pub use crate::config::{Config, Passes};
pub use crate::error::ChunkRefError;
pub use crate::registry::{ChunkRecord, ChunkRegistry, IdIndex, TypeNumberIndex, find_id};

pub use smol_str::SmolStr;
