pub mod iter;
pub mod linked_hash_map;

pub use iter::{IntoIter, Iter, Keys, Values};
pub use linked_hash_map::LinkedHashMap;

// keys are hashed once on the way in and the hash rides along in the node, so
// the index can be regrown without touching the keys again.
pub(crate) type KeyHash = u64;
