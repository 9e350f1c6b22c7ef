pub mod memory;
pub mod traits;

pub use memory::InMemoryStore;
pub use traits::{Predicate, RecordStore};
