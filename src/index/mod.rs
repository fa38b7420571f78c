//! Identifier-set bookkeeping.
//!
//! Seed, next-infected and global sets are all [`IdentifierSet`]s; the
//! global one is wrapped in a [`SharedIdentifierSet`] so concurrent window
//! runs can grow it without lost updates.

pub mod id_set;
pub mod shared;

pub use id_set::IdentifierSet;
pub use shared::SharedIdentifierSet;
