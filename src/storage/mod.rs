mod seed;
pub mod sqlite;
pub mod traits;

pub use seed::{seed, SEED_COURSES};
pub use sqlite::SqliteStorage;
pub use traits::{NewCourse, Storage, StorageRead, StorageTx, StorageWrite};
