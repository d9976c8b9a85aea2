pub mod connection;
pub mod error;
pub mod profile_store;
pub mod repositories;

pub use connection::sqlite_pool::{MIGRATOR, in_memory_pool, open_pool, run_migrations};
pub use error::{DbError, Result};
pub use profile_store::ProfileStore;
pub use repositories::product_repository::ProductRepository;
pub use repositories::profile_repository::ProfileRepository;
