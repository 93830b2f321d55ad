//! Flat-file storage adapter for the Unveil quiz backend.
//!
//! All persistent state is JSON files and images on local disk: a
//! top-level `characters.json` array, a per-character folder under
//! `uploads/` holding the numbered image sequence, and a
//! `questions.json` inside each folder. There is no database and no
//! cross-process locking; writes are plain overwrites.

pub mod error;
pub mod images;
mod store;

pub use error::StoreError;
pub use store::Store;
