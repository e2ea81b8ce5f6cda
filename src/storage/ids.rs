use chrono::Utc;

/// Hands out todo ids.
///
/// Ids are the current Unix time in milliseconds, bumped past the last id
/// handed out (or the highest id already stored), so they are strictly
/// increasing for the lifetime of the store even when several items are
/// created within the same millisecond or the clock steps backwards.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Start a generator whose first id will be greater than `last`.
    pub fn starting_after(last: i64) -> Self {
        Self { last }
    }

    pub fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let id = now.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_strictly_increase() {
        let mut ids = IdGenerator::starting_after(0);
        let generated: Vec<i64> = (0..1000).map(|_| ids.next_id()).collect();
        assert!(generated.windows(2).all(|w| w[0] < w[1]));

        let unique: HashSet<i64> = generated.iter().copied().collect();
        assert_eq!(unique.len(), generated.len());
    }

    #[test]
    fn test_ids_skip_past_existing_future_id() {
        let far_future = Utc::now().timestamp_millis() + 1_000_000;
        let mut ids = IdGenerator::starting_after(far_future);
        assert_eq!(ids.next_id(), far_future + 1);
        assert_eq!(ids.next_id(), far_future + 2);
    }

    #[test]
    fn test_ids_are_time_derived() {
        let before = Utc::now().timestamp_millis();
        let mut ids = IdGenerator::starting_after(3);
        assert!(ids.next_id() >= before);
    }
}
