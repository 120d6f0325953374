pub mod connection;
pub mod memory;
pub mod posts;
pub mod store;

pub use connection::connect_with_retry;
pub use memory::MemoryPostStore;
pub use posts::MongoPostStore;
pub use store::{PostStore, StoreError, StoreResult};
