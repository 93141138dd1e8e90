//! Core data model types

mod hash;

pub use hash::Hash;
