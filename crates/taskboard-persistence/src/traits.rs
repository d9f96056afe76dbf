use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use taskboard_core::BoardResult;
use uuid::Uuid;

/// Metadata recorded alongside every saved board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// Version of the on-disk envelope
    pub format_version: u32,
    /// Process instance that performed the save
    pub instance_id: Uuid,
    pub saved_at: DateTime<Utc>,
    /// Version of the board schema inside the envelope
    pub schema_version: String,
}

impl PersistenceMetadata {
    pub const SCHEMA_VERSION: &'static str = "2.0.0";

    pub fn new(instance_id: Uuid) -> Self {
        Self {
            format_version: FormatVersion::CURRENT.as_u32(),
            instance_id,
            saved_at: Utc::now(),
            schema_version: Self::SCHEMA_VERSION.to_string(),
        }
    }
}

/// Serialized board plus its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// JSON bytes of a `BoardSnapshot`
    pub data: Vec<u8>,
    pub metadata: PersistenceMetadata,
}

/// Durable key-value storage for the whole board document
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Replace the stored document with `snapshot`
    async fn save(&self, snapshot: StoreSnapshot) -> BoardResult<PersistenceMetadata>;

    /// Load the stored document, migrating older formats first
    async fn load(&self) -> BoardResult<(StoreSnapshot, PersistenceMetadata)>;

    async fn exists(&self) -> bool;

    fn path(&self) -> &Path;
}

/// Trait for serialization strategies
pub trait Serializer<T: Send + Sync>: Send + Sync {
    fn serialize(&self, data: &T) -> BoardResult<Vec<u8>>;

    fn deserialize(&self, bytes: &[u8]) -> BoardResult<T>;
}

/// On-disk format versions
///
/// - `V1`: bare JSON array of `{id, name, descriptions: [string]}`
/// - `V2`: versioned envelope with metadata and full card details
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormatVersion {
    V1,
    V2,
}

impl FormatVersion {
    pub const CURRENT: FormatVersion = FormatVersion::V2;

    pub fn as_u32(self) -> u32 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }

    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            _ => None,
        }
    }
}
