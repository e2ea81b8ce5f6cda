// src/entity/todo.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::timestamp_now;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Fields written by other versions of the app, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TodoItem {
    /// Create a fresh item. `text` is expected to be trimmed already.
    pub fn new(id: i64, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at: Some(timestamp_now()),
            updated_at: None,
            extra: Map::new(),
        }
    }
}

/// Partial update for a todo item. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

/// One record of the backing file.
///
/// Records that match the [`TodoItem`] shape are typed. Anything else in the
/// array (written by hand or by an older version) is kept as raw JSON and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredTodo {
    Todo(TodoItem),
    Legacy(Value),
}

impl StoredTodo {
    /// Integer id, if the record has one.
    pub fn id(&self) -> Option<i64> {
        match self {
            StoredTodo::Todo(todo) => Some(todo.id),
            StoredTodo::Legacy(value) => value.get("id").and_then(Value::as_i64),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            StoredTodo::Todo(todo) => Some(&todo.text),
            StoredTodo::Legacy(value) => value.get("text").and_then(Value::as_str),
        }
    }

    /// Whether the record counts as completed. Legacy records use JavaScript
    /// truthiness of their `completed` field.
    pub fn is_completed(&self) -> bool {
        match self {
            StoredTodo::Todo(todo) => todo.completed,
            StoredTodo::Legacy(value) => value.get("completed").map_or(false, is_truthy),
        }
    }

    pub fn as_todo(&self) -> Option<&TodoItem> {
        match self {
            StoredTodo::Todo(todo) => Some(todo),
            StoredTodo::Legacy(_) => None,
        }
    }

    /// Set the given fields and stamp `updatedAt`.
    ///
    /// A legacy record that matches the typed shape afterwards becomes a
    /// [`StoredTodo::Todo`].
    pub fn apply(&mut self, text: Option<String>, completed: Option<bool>, now: String) {
        match self {
            StoredTodo::Todo(todo) => {
                if let Some(text) = text {
                    todo.text = text;
                }
                if let Some(completed) = completed {
                    todo.completed = completed;
                }
                todo.updated_at = Some(now);
            }
            StoredTodo::Legacy(Value::Object(fields)) => {
                if let Some(text) = text {
                    fields.insert("text".to_string(), Value::String(text));
                }
                if let Some(completed) = completed {
                    fields.insert("completed".to_string(), Value::Bool(completed));
                }
                fields.insert("updatedAt".to_string(), Value::String(now));

                if let Ok(todo) = serde_json::from_value::<TodoItem>(Value::Object(fields.clone())) {
                    *self = StoredTodo::Todo(todo);
                }
            }
            // Non-object records have no id, so they are never looked up.
            StoredTodo::Legacy(_) => {}
        }
    }
}

impl From<TodoItem> for StoredTodo {
    fn from(todo: TodoItem) -> Self {
        StoredTodo::Todo(todo)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The three items a brand new list starts with.
pub fn seed_items() -> Vec<TodoItem> {
    ["Learn React", "Build todo app", "Deploy to production"]
        .iter()
        .zip(1..)
        .map(|(text, id)| TodoItem::new(id, text.to_string()))
        .collect()
}
