//! Hash-map and hash-set aliases used across the crate.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`]
pub type HashMap<K, V> = hashbrown::HashMap<K, V, hashbrown::DefaultHashBuilder>;
/// Hashset using [`hashbrown::HashSet`]
pub type HashSet<K> = hashbrown::HashSet<K, hashbrown::DefaultHashBuilder>;
