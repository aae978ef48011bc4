//! An insertion-ordered hash map: constant-time lookup, insertion, and
//! removal, with iteration that follows the order keys were last put.
//!
//! ```
//! use linked_map::LinkedHashMap;
//!
//! let mut map = LinkedHashMap::new();
//! map.put("x", 1);
//! map.put("y", 2);
//! map.put("x", 3); // moves "x" behind "y"
//! map.remove("y");
//!
//! assert_eq!(vec![3], map.to_vec());
//! assert_eq!(&0, map.get_or("y", &0));
//! ```
//!
//! Entries live in a Vec-backed linked list and a hash table maps each key to
//! its node's position, so relinking never chases pointers. The map is not
//! synchronised; with the `shared_map` feature (on by default) [`SharedMap`]
//! wraps it in a lock for use across threads.

mod linked_list;
pub mod linked_map;
mod ordered_map;
#[cfg(feature = "shared_map")]
mod shared_map;

pub use linked_map::LinkedHashMap;
pub use ordered_map::OrderedMap;
#[cfg(feature = "shared_map")]
pub use shared_map::SharedMap;
