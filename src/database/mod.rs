pub mod connection;

pub use connection::{get_db_pool, in_memory_pool, run_migrations};
