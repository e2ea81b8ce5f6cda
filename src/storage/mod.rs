mod ids;
mod json_store;
mod stats;

pub use ids::IdGenerator;
pub use json_store::{PersistenceStatus, StoreOrigin, TodoStore, DEFAULT_DATA_FILE};
pub use stats::TodoStats;
