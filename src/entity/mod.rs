mod todo;

pub use todo::{seed_items, StoredTodo, TodoItem, TodoPatch};

use chrono::{SecondsFormat, Utc};

/// Current time as an ISO-8601 UTC string with millisecond precision,
/// e.g. `2024-05-01T12:00:00.000Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2024-05-01T12:00:00.000Z".len());
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
