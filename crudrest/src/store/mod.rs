// Keyed store collaborators: the trait and its in-memory and sea-orm backends

pub mod database;
pub mod memory;
pub mod traits;

pub use database::SeaOrmStore;
pub use memory::MemoryStore;
pub use traits::KeyedStore;
