use serde::{Deserialize, Serialize};

use crate::entity::StoredTodo;

/// Completion statistics over the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage of completed items, rounded to the nearest integer.
    pub completion_rate: u32,
}

impl TodoStats {
    pub fn from_items(items: &[StoredTodo]) -> Self {
        let total = items.len();
        let completed = items.iter().filter(|t| t.is_completed()).count();
        let completion_rate = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }
}
