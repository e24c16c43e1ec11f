pub mod memory;
pub mod mongo;

pub use memory::InMemoryStore;
pub use mongo::MongoRepositories;
