use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;

use super::{IdGenerator, TodoStats};
use crate::entity::{seed_items, timestamp_now, StoredTodo, TodoItem, TodoPatch};
use crate::error::{Result, TasklistError};

pub const DEFAULT_DATA_FILE: &str = "todos.json";

/// Where the in-memory list came from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOrigin {
    /// Adopted from an existing backing file.
    Loaded,
    /// No usable backing file; started from the default items.
    Seeded,
}

/// Outcome of save attempts so far.
///
/// Durability is best-effort: a failed save is logged and recorded here,
/// the in-memory list stays authoritative, and the next successful save
/// brings the file back in line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistenceStatus {
    pub saves: u64,
    pub failures: u64,
    pub last_error: Option<String>,
}

/// The in-memory list. Only locked for in-memory work, never across a write.
struct Items {
    todos: Vec<StoredTodo>,
    ids: IdGenerator,
    /// Bumped for every snapshot, so writes can be ordered.
    revision: u64,
}

impl Items {
    fn find_index_by_id(&self, id: i64) -> Option<usize> {
        self.todos.iter().position(|t| t.id() == Some(id))
    }

    fn snapshot(&mut self) -> Result<Snapshot> {
        self.revision += 1;
        Ok(Snapshot {
            revision: self.revision,
            json: serde_json::to_string_pretty(&self.todos)?,
        })
    }
}

/// Serialized list at a given revision.
struct Snapshot {
    revision: u64,
    json: String,
}

/// Held for the duration of a file write; serializes writers.
pub(crate) struct FileState {
    /// Newest revision a write was attempted for.
    last_attempted: u64,
    status: PersistenceStatus,
}

/// The todo list, mirrored to a single pretty-printed JSON file.
///
/// Mutations change the list, take a snapshot, release the list, and then
/// write the snapshot before returning. Reads never wait on a write, so they
/// may see a mutation before it is durable. A write whose snapshot is older
/// than one already written is skipped, so the file never goes backwards.
pub struct TodoStore {
    items: Mutex<Items>,
    file: Mutex<FileState>,
    path: PathBuf,
    origin: StoreOrigin,
}

impl TodoStore {
    /// Load the list from `path`, falling back to the seed items.
    ///
    /// Any JSON array is adopted as-is, whatever its records look like. A
    /// file that is missing, unreadable, or not a JSON array is replaced by
    /// the seed list, which is saved immediately. This never fails.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        match read_items(&path).await {
            Ok(todos) => {
                tracing::info!(path = %path.display(), count = todos.len(), "Loaded todos from file");
                Self::new(path, todos, StoreOrigin::Loaded)
            }
            Err(e) => {
                if !is_missing_file(&e) {
                    tracing::warn!(path = %path.display(), error = %e, "Could not read todos file, starting over");
                }
                let seeds = seed_items().into_iter().map(StoredTodo::from).collect();
                let store = Self::new(path, seeds, StoreOrigin::Seeded);
                store.save().await;
                tracing::info!("Initialized with default todos");
                store
            }
        }
    }

    fn new(path: PathBuf, todos: Vec<StoredTodo>, origin: StoreOrigin) -> Self {
        let highest = todos.iter().filter_map(StoredTodo::id).max().unwrap_or(0);
        Self {
            items: Mutex::new(Items {
                todos,
                ids: IdGenerator::starting_after(highest),
                revision: 0,
            }),
            file: Mutex::new(FileState {
                last_attempted: 0,
                status: PersistenceStatus::default(),
            }),
            path,
            origin,
        }
    }

    /// Write the whole list to the backing file.
    ///
    /// Errors are logged and recorded in [`PersistenceStatus`], never returned.
    /// Returns whether the list is on disk at least as new as this call.
    pub async fn save(&self) -> bool {
        let snapshot = self.items.lock().await.snapshot();
        self.persist(snapshot).await
    }

    async fn persist(&self, snapshot: Result<Snapshot>) -> bool {
        let mut file = self.file.lock().await;

        let result = match snapshot {
            Ok(snapshot) if snapshot.revision <= file.last_attempted => return true,
            Ok(snapshot) => {
                file.last_attempted = snapshot.revision;
                fs::write(&self.path, snapshot.json)
                    .await
                    .map_err(TasklistError::from)
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                file.status.saves += 1;
                true
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Error saving todos");
                file.status.failures += 1;
                file.status.last_error = Some(e.to_string());
                false
            }
        }
    }

    /// Block writes until the guard is dropped.
    #[cfg(test)]
    pub(crate) async fn hold_write_lock(&self) -> tokio::sync::MutexGuard<'_, FileState> {
        self.file.lock().await
    }

    /// All todos in insertion order.
    pub async fn list(&self) -> Vec<StoredTodo> {
        self.items.lock().await.todos.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.todos.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.todos.is_empty()
    }

    pub async fn stats(&self) -> TodoStats {
        TodoStats::from_items(&self.items.lock().await.todos)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn origin(&self) -> StoreOrigin {
        self.origin
    }

    pub async fn persistence(&self) -> PersistenceStatus {
        self.file.lock().await.status.clone()
    }

    /// Append a new todo with a fresh id and save.
    pub async fn insert(&self, text: &str) -> Result<TodoItem> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TasklistError::Validation("Todo text is required".to_string()));
        }

        let (todo, snapshot) = {
            let mut items = self.items.lock().await;
            let todo = TodoItem::new(items.ids.next_id(), text.to_string());
            items.todos.push(StoredTodo::from(todo.clone()));
            (todo, items.snapshot())
        };
        self.persist(snapshot).await;

        Ok(todo)
    }

    pub async fn find_index_by_id(&self, id: i64) -> Option<usize> {
        self.items.lock().await.find_index_by_id(id)
    }

    /// Apply the fields present in `patch`, stamp `updatedAt`, and save.
    ///
    /// An unknown id is reported before the patch is checked. The patch is
    /// validated before anything is applied, so a rejected patch leaves the
    /// item untouched.
    pub async fn update_by_id(&self, id: i64, patch: TodoPatch) -> Result<StoredTodo> {
        let (updated, snapshot) = {
            let mut items = self.items.lock().await;
            let index = items
                .find_index_by_id(id)
                .ok_or(TasklistError::NotFound(id))?;

            let text = match patch.text {
                Some(text) => {
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        return Err(TasklistError::Validation(
                            "Todo text must be a non-empty string".to_string(),
                        ));
                    }
                    Some(trimmed.to_string())
                }
                None => None,
            };

            let record = &mut items.todos[index];
            record.apply(text, patch.completed, timestamp_now());
            let updated = record.clone();
            (updated, items.snapshot())
        };
        self.persist(snapshot).await;

        Ok(updated)
    }

    /// Remove the todo with `id` and save.
    pub async fn remove_by_id(&self, id: i64) -> Result<StoredTodo> {
        let (removed, snapshot) = {
            let mut items = self.items.lock().await;
            let index = items
                .find_index_by_id(id)
                .ok_or(TasklistError::NotFound(id))?;
            let removed = items.todos.remove(index);
            (removed, items.snapshot())
        };
        self.persist(snapshot).await;

        Ok(removed)
    }
}

/// Read the backing file. Any JSON array is accepted; non-conforming
/// records come back as [`StoredTodo::Legacy`].
async fn read_items(path: &Path) -> Result<Vec<StoredTodo>> {
    let data = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&data)?)
}

fn is_missing_file(err: &TasklistError) -> bool {
    matches!(err, TasklistError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
}
