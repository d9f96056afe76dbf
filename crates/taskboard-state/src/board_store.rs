use std::path::Path;

use taskboard_core::{BoardError, BoardResult};
use taskboard_domain::commands::{
    AddCard, ApplyDrag, Command, CommandContext, CreateList, DeleteList, MoveCard, RemoveCard,
    RemoveCardById, RenameList, ReorderLists, UpdateCard,
};
use taskboard_domain::{
    BoardSnapshot, Card, CardEditor, CardId, CardUpdate, DragResult, ListId, TaskList,
};
use taskboard_persistence::{
    JsonFileStore, JsonSerializer, PersistenceMetadata, PersistenceStore, Serializer,
    StoreSnapshot,
};
use uuid::Uuid;

/// Single source of truth for the board.
///
/// # Save Behavior
///
/// Every mutating operation runs its command and then writes the whole board
/// before returning:
/// - No batching and no debounce, the file always matches memory after a
///   successful call
/// - Rejected operations (validation, unknown ids, cancelled drags) never
///   write
/// - A failed write is logged and returned; the in-memory change is kept so
///   the next successful save catches the file up
pub struct BoardStore<S: PersistenceStore = JsonFileStore> {
    lists: Vec<TaskList>,
    store: S,
    instance_id: Uuid,
    last_saved: Option<PersistenceMetadata>,
}

impl BoardStore<JsonFileStore> {
    /// Open the board file at `path`, starting empty if it cannot be read.
    pub async fn open(path: impl AsRef<Path>) -> Self {
        Self::load(JsonFileStore::new(path)).await
    }
}

impl<S: PersistenceStore> BoardStore<S> {
    /// Load the board from `store`.
    ///
    /// Never fails: a missing, unreadable or malformed document yields an
    /// empty board and a warning.
    pub async fn load(store: S) -> Self {
        let lists = Self::load_initial(&store).await;
        Self {
            lists,
            store,
            instance_id: Uuid::new_v4(),
            last_saved: None,
        }
    }

    async fn load_initial(store: &S) -> Vec<TaskList> {
        if !store.exists().await {
            tracing::debug!(
                "No board at {}, starting empty",
                store.path().display()
            );
            return Vec::new();
        }

        match Self::read_snapshot(store).await {
            Ok(snapshot) => {
                tracing::info!(
                    "Loaded {} lists ({} cards) from {}",
                    snapshot.lists.len(),
                    snapshot.card_count(),
                    store.path().display()
                );
                snapshot.lists
            }
            Err(e) => {
                tracing::warn!(
                    "Could not load board from {}: {}. Starting with an empty board",
                    store.path().display(),
                    e
                );
                Vec::new()
            }
        }
    }

    async fn read_snapshot(store: &S) -> BoardResult<BoardSnapshot> {
        let (snapshot, _metadata) = store.load().await?;
        JsonSerializer.deserialize(&snapshot.data)
    }

    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_lists(self.lists.clone())
    }

    pub fn get_list(&self, id: ListId) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn find_card(&self, id: CardId) -> Option<(&TaskList, usize, &Card)> {
        self.lists.iter().find_map(|list| {
            list.card_index(id)
                .map(|index| (list, index, &list.cards[index]))
        })
    }

    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|l| l.cards.len()).sum()
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Metadata of the most recent successful save in this session
    pub fn last_saved(&self) -> Option<&PersistenceMetadata> {
        self.last_saved.as_ref()
    }

    fn execute(&mut self, command: Box<dyn Command>) -> BoardResult<()> {
        tracing::debug!("Executing: {}", command.description());
        let mut context = CommandContext {
            lists: &mut self.lists,
        };
        command.execute(&mut context)
    }

    async fn commit(&mut self, command: Box<dyn Command>) -> BoardResult<()> {
        self.execute(command)?;
        self.persist().await
    }

    /// Write the current board to durable storage.
    pub async fn persist(&mut self) -> BoardResult<()> {
        match self.write_snapshot().await {
            Ok(metadata) => {
                self.last_saved = Some(metadata);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to save board to {}: {}",
                    self.store.path().display(),
                    e
                );
                Err(e)
            }
        }
    }

    async fn write_snapshot(&self) -> BoardResult<PersistenceMetadata> {
        let data = JsonSerializer.serialize(&self.snapshot())?;
        let snapshot = StoreSnapshot {
            data,
            metadata: PersistenceMetadata::new(self.instance_id),
        };
        self.store.save(snapshot).await
    }

    pub async fn create_list(
        &mut self,
        name: &str,
        initial_cards: Vec<String>,
    ) -> BoardResult<TaskList> {
        self.commit(Box::new(CreateList {
            name: name.to_string(),
            cards: initial_cards,
        }))
        .await?;
        self.lists.last().cloned().ok_or_else(|| {
            BoardError::Internal("List creation succeeded but list not found".into())
        })
    }

    pub async fn rename_list(&mut self, list_id: ListId, name: &str) -> BoardResult<TaskList> {
        self.commit(Box::new(RenameList {
            list_id,
            name: name.to_string(),
        }))
        .await?;
        self.require_list(list_id).cloned()
    }

    pub async fn remove_list(&mut self, list_id: ListId) -> BoardResult<()> {
        self.commit(Box::new(DeleteList { list_id })).await
    }

    pub async fn add_card(&mut self, list_id: ListId, text: &str) -> BoardResult<Card> {
        self.commit(Box::new(AddCard {
            list_id,
            text: text.to_string(),
        }))
        .await?;
        self.require_list(list_id)?
            .cards
            .last()
            .cloned()
            .ok_or_else(|| BoardError::Internal("Card creation succeeded but card not found".into()))
    }

    /// Remove the card currently at `index`. Later cards shift down by one.
    pub async fn remove_card(&mut self, list_id: ListId, index: usize) -> BoardResult<Card> {
        let card = self
            .require_list(list_id)?
            .cards
            .get(index)
            .cloned()
            .ok_or_else(|| {
                BoardError::NotFound(format!("Card at index {} in list {}", index, list_id))
            })?;
        self.commit(Box::new(RemoveCard { list_id, index })).await?;
        Ok(card)
    }

    pub async fn remove_card_by_id(&mut self, card_id: CardId) -> BoardResult<Card> {
        let card = self
            .find_card(card_id)
            .map(|(_, _, card)| card.clone())
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", card_id)))?;
        self.commit(Box::new(RemoveCardById { card_id })).await?;
        Ok(card)
    }

    pub async fn reorder_lists(&mut self, from: usize, to: usize) -> BoardResult<()> {
        self.commit(Box::new(ReorderLists { from, to })).await
    }

    pub async fn reorder_or_transfer_cards(
        &mut self,
        source_list_id: ListId,
        from: usize,
        destination_list_id: ListId,
        to: usize,
    ) -> BoardResult<()> {
        self.commit(Box::new(MoveCard {
            source_list_id,
            from,
            destination_list_id,
            to,
        }))
        .await
    }

    /// Apply a drag-completion event. Returns `false`, without writing, when
    /// the drag was cancelled.
    pub async fn apply_drag(&mut self, drag: &DragResult) -> BoardResult<bool> {
        if drag.is_cancelled() {
            tracing::debug!("Ignoring cancelled drag of {}", drag.dragged_id);
            return Ok(false);
        }
        self.commit(Box::new(ApplyDrag { drag: drag.clone() }))
            .await?;
        Ok(true)
    }

    pub async fn update_card(&mut self, card_id: CardId, updates: CardUpdate) -> BoardResult<Card> {
        self.commit(Box::new(UpdateCard { card_id, updates })).await?;
        self.require_card(card_id).cloned()
    }

    pub fn open_editor(&self, card_id: CardId) -> BoardResult<CardEditor> {
        self.require_card(card_id).map(CardEditor::open)
    }

    /// Commit everything edited in `editor`.
    pub async fn save_editor(&mut self, editor: CardEditor) -> BoardResult<Card> {
        let (card_id, updates) = editor.save();
        self.update_card(card_id, updates).await
    }

    fn require_list(&self, id: ListId) -> BoardResult<&TaskList> {
        self.get_list(id)
            .ok_or_else(|| BoardError::NotFound(format!("List {}", id)))
    }

    fn require_card(&self, id: CardId) -> BoardResult<&Card> {
        self.find_card(id)
            .map(|(_, _, card)| card)
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", id)))
    }
}
