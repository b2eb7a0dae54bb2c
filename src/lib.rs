#![doc = include_str!("../README.md")]

pub mod map;
pub mod set;

mod raw;

#[cfg(feature = "serde")]
mod serde_impls;

pub use map::{
    Entries, HashMap, InvalidLoadFactor, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, MAX_CAPACITY,
};
pub use set::HashSet;
