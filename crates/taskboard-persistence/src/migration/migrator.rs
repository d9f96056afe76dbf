use crate::store::json_file_store::JsonEnvelope;
use crate::traits::FormatVersion;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use taskboard_core::{BoardError, BoardResult};
use taskboard_domain::{BoardSnapshot, TaskList};
use uuid::Uuid;

/// One entry of the legacy list array
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

impl LegacyList {
    /// Convert to a list, giving every card a fresh stable id.
    pub fn into_task_list(self) -> TaskList {
        let mut list = TaskList::with_cards(self.name, self.descriptions);
        match Uuid::parse_str(&self.id) {
            Ok(id) => list.id = id,
            Err(_) => tracing::warn!(
                "Legacy list id '{}' is not a UUID, assigned {}",
                self.id,
                list.id
            ),
        }
        list
    }
}

/// Orchestrates migrations between format versions
pub struct Migrator;

impl Migrator {
    /// Detect the version of a persisted file
    pub async fn detect_version(path: &Path) -> BoardResult<FormatVersion> {
        if !path.exists() {
            return Ok(FormatVersion::CURRENT);
        }

        let content = tokio::fs::read_to_string(path).await?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        Self::detect_value_version(&value)
    }

    fn detect_value_version(value: &Value) -> BoardResult<FormatVersion> {
        // V1 files are a bare array of lists
        if value.is_array() {
            return Ok(FormatVersion::V1);
        }

        match value.get("version").and_then(|v| v.as_u64()) {
            Some(version) => u32::try_from(version)
                .ok()
                .and_then(FormatVersion::from_u32)
                .ok_or_else(|| {
                    BoardError::Serialization(format!("Unsupported format version: {}", version))
                }),
            None => Err(BoardError::Serialization(
                "Unrecognized board file: expected a list array or a versioned envelope".into(),
            )),
        }
    }

    /// Migrate a file from one version to another
    pub async fn migrate(from: FormatVersion, to: FormatVersion, path: &Path) -> BoardResult<()> {
        if from == to {
            return Ok(());
        }

        match (from, to) {
            (FormatVersion::V1, FormatVersion::V2) => Self::migrate_v1_to_v2(path).await,
            _ => Err(BoardError::Serialization(format!(
                "Unsupported migration: {:?} -> {:?}",
                from, to
            ))),
        }
    }

    /// Convert a legacy list array into a V2 board value
    pub fn upgrade_v1(v1_data: Value) -> BoardResult<Value> {
        let legacy: Vec<LegacyList> = serde_json::from_value(v1_data)
            .map_err(|e| BoardError::Serialization(format!("Malformed legacy board: {}", e)))?;
        let snapshot = BoardSnapshot::from_lists(
            legacy.into_iter().map(LegacyList::into_task_list).collect(),
        );
        serde_json::to_value(&snapshot).map_err(|e| BoardError::Serialization(e.to_string()))
    }

    async fn migrate_v1_to_v2(path: &Path) -> BoardResult<()> {
        let content = tokio::fs::read_to_string(path).await?;
        let v1_data: Value = serde_json::from_str(&content)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;

        let backup_path = path.with_extension("v1.backup");
        tokio::fs::copy(path, &backup_path).await?;
        tracing::info!("Created backup at {}", backup_path.display());

        let expected = Self::legacy_shape(&v1_data);
        let v2_envelope = JsonEnvelope::new(Self::upgrade_v1(v1_data)?);

        let json_str = v2_envelope
            .to_json_string()
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        crate::store::AtomicWriter::write_atomic(path, json_str.as_bytes()).await?;

        tracing::info!("Migrated {} from V1 to V2 format", path.display());

        match Self::verify_migration(path, &expected).await {
            Ok(()) => {
                if let Err(e) = tokio::fs::remove_file(&backup_path).await {
                    tracing::warn!(
                        "Migration successful but failed to remove backup at {}: {}",
                        backup_path.display(),
                        e
                    );
                } else {
                    tracing::info!("Migration verified, backup removed");
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    "Migration verification failed: {}. Backup preserved at {}",
                    e,
                    backup_path.display()
                );
                Err(e)
            }
        }
    }

    /// `(name, card texts)` per list, in order
    fn legacy_shape(v1_data: &Value) -> Vec<(String, Vec<String>)> {
        serde_json::from_value::<Vec<LegacyList>>(v1_data.clone())
            .map(|lists| {
                lists
                    .into_iter()
                    .map(|l| (l.name, l.descriptions))
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn verify_migration(path: &Path, expected: &[(String, Vec<String>)]) -> BoardResult<()> {
        let migrated_content = tokio::fs::read_to_string(path).await?;
        let envelope: JsonEnvelope = serde_json::from_str(&migrated_content).map_err(|e| {
            BoardError::Serialization(format!("Failed to parse migrated file: {}", e))
        })?;

        if envelope.version != FormatVersion::V2.as_u32() {
            return Err(BoardError::Serialization(
                "Migrated file has wrong version field".to_string(),
            ));
        }

        let snapshot: BoardSnapshot = serde_json::from_value(envelope.data)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        let actual: Vec<(String, Vec<String>)> = snapshot
            .lists
            .iter()
            .map(|l| {
                (
                    l.name.clone(),
                    l.cards.iter().map(|c| c.text.clone()).collect(),
                )
            })
            .collect();

        if actual != expected {
            return Err(BoardError::Serialization(
                "Migrated lists do not match original data".to_string(),
            ));
        }

        tracing::debug!("Migration verification passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn legacy_board() -> Value {
        json!([
            {
                "id": "7f1c1a52-8a4e-4a47-9d4b-2f0e6f1f2b10",
                "name": "Groceries",
                "descriptions": ["milk", "eggs"]
            },
            { "id": "not-a-uuid", "name": "Chores", "descriptions": [] }
        ])
    }

    #[tokio::test]
    async fn test_detect_versions() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("board.json");

        assert_eq!(
            Migrator::detect_version(&file_path).await.unwrap(),
            FormatVersion::V2
        );

        tokio::fs::write(&file_path, legacy_board().to_string())
            .await
            .unwrap();
        assert_eq!(
            Migrator::detect_version(&file_path).await.unwrap(),
            FormatVersion::V1
        );

        tokio::fs::write(&file_path, json!({"version": 2, "data": {}}).to_string())
            .await
            .unwrap();
        assert_eq!(
            Migrator::detect_version(&file_path).await.unwrap(),
            FormatVersion::V2
        );
    }

    #[tokio::test]
    async fn test_detect_rejects_garbage() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("board.json");

        tokio::fs::write(&file_path, "{not json").await.unwrap();
        assert!(Migrator::detect_version(&file_path).await.is_err());

        tokio::fs::write(&file_path, r#"{"boards": []}"#).await.unwrap();
        assert!(Migrator::detect_version(&file_path).await.is_err());
    }

    #[test]
    fn test_upgrade_keeps_ids_and_order() {
        let upgraded = Migrator::upgrade_v1(legacy_board()).unwrap();
        let snapshot: BoardSnapshot = serde_json::from_value(upgraded).unwrap();

        assert_eq!(snapshot.lists.len(), 2);
        assert_eq!(
            snapshot.lists[0].id.to_string(),
            "7f1c1a52-8a4e-4a47-9d4b-2f0e6f1f2b10"
        );
        assert_eq!(snapshot.lists[0].card_texts(), vec!["milk", "eggs"]);
        assert_eq!(snapshot.lists[1].name, "Chores");
        assert!(snapshot.lists[1].cards.is_empty());
    }

    #[test]
    fn test_upgrade_rejects_wrong_shape() {
        let result = Migrator::upgrade_v1(json!([{ "title": "no name" }]));
        assert!(matches!(result, Err(BoardError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_migrate_v1_to_v2() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("board.json");
        tokio::fs::write(&file_path, legacy_board().to_string())
            .await
            .unwrap();

        Migrator::migrate(FormatVersion::V1, FormatVersion::V2, &file_path)
            .await
            .unwrap();

        let migrated: Value =
            serde_json::from_str(&tokio::fs::read_to_string(&file_path).await.unwrap()).unwrap();
        assert_eq!(migrated["version"], 2);
        assert!(migrated["metadata"].is_object());
        assert_eq!(migrated["data"]["lists"][0]["name"], "Groceries");
        assert_eq!(migrated["data"]["lists"][0]["cards"][1]["text"], "eggs");

        assert!(!file_path.with_extension("v1.backup").exists());
    }
}
