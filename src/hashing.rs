//! Deterministic hashing. The hashing data structures in the standard library are randomly
//! seeded, which would make anything keyed or seeded from a hash differ between runs.
//!
//! `HashMap` is re-exported from `rustc-hash`. Use `HashMap::default()` to create one.
//! The `hash_str` free function derives per-stream seed offsets in `crate::random`.

use xxhash_rust::xxh3::xxh3_64;

pub use rustc_hash::FxHashMap as HashMap;

/// A convenience method to compute the hash of a `&str`.
pub fn hash_str(data: &str) -> u64 {
    xxh3_64(data.as_bytes())
}
