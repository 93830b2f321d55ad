//! Domain types and rules for the Unveil quiz game.
//!
//! This crate is pure: no I/O, no async. It defines the character and
//! question records persisted on disk, the game progression rules that
//! map question numbers to image positions, and shared image helpers
//! (extension set, MIME lookup) used by both the storage layer and the
//! remote edit client.

pub mod character;
pub mod error;
pub mod game;
pub mod images;
pub mod question;
pub mod types;
