// Service exports
pub mod memory;
pub mod postgres;
pub mod seed;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use seed::{demo_users, seed_demo_users};
pub use store::{MatchInsert, MatchStore, StoreError};
