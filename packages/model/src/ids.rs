use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Reserved container id for the top-level block sequence of a page
pub const CANVAS_ID: &str = "canvas";

/// Stable identifier of a block node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for BlockId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Address of a child sequence: the page canvas or a container block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerId {
    Canvas,
    Block(BlockId),
}

impl ContainerId {
    pub fn block(id: impl Into<BlockId>) -> Self {
        ContainerId::Block(id.into())
    }

    pub fn is_canvas(&self) -> bool {
        matches!(self, ContainerId::Canvas)
    }
}

impl From<&str> for ContainerId {
    fn from(raw: &str) -> Self {
        if raw == CANVAS_ID {
            ContainerId::Canvas
        } else {
            ContainerId::Block(BlockId::from(raw))
        }
    }
}

impl From<BlockId> for ContainerId {
    fn from(id: BlockId) -> Self {
        ContainerId::Block(id)
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerId::Canvas => f.write_str(CANVAS_ID),
            ContainerId::Block(id) => f.write_str(id.as_str()),
        }
    }
}

impl Serialize for ContainerId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContainerId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ContainerId::from(raw.as_str()))
    }
}

/// Source of fresh block ids
///
/// Injected into the builder so tests can run with deterministic ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> BlockId;
}

/// Generate a document seed from a path using CRC32
pub fn get_document_id(path: &str) -> String {
    let mut buff = String::from(path);
    if !path.starts_with("file://") {
        buff = format!("file://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ids (`<seed>-<n>`) for a single document
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    seed: String,
    count: u32,
}

impl SequentialIdGenerator {
    pub fn new(path: &str) -> Self {
        Self {
            seed: get_document_id(path),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> BlockId {
        self.count += 1;
        BlockId(format!("{}-{}", self.seed, self.count))
    }
}

/// Random v4 UUIDs, the default for interactive editing
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> BlockId {
        BlockId(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_generation() {
        let id1 = get_document_id("/site.json");
        let id2 = get_document_id("/site.json");
        assert_eq!(id1, id2);

        let id3 = get_document_id("/other.json");
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = SequentialIdGenerator::from_seed("page");

        assert_eq!(gen.next_id().as_str(), "page-1");
        assert_eq!(gen.next_id().as_str(), "page-2");
        assert_eq!(gen.next_id().as_str(), "page-3");
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let mut gen = UuidGenerator;
        assert_ne!(gen.next_id(), gen.next_id());
    }

    #[test]
    fn test_container_id_parsing() {
        assert_eq!(ContainerId::from("canvas"), ContainerId::Canvas);
        assert_eq!(
            ContainerId::from("abc"),
            ContainerId::Block(BlockId::from("abc"))
        );
        assert_eq!(ContainerId::Canvas.to_string(), "canvas");

        let json = serde_json::to_string(&ContainerId::block("col-1")).unwrap();
        assert_eq!(json, "\"col-1\"");
        let back: ContainerId = serde_json::from_str("\"canvas\"").unwrap();
        assert!(back.is_canvas());
    }
}
