pub mod auth;
pub mod characters;
pub mod game;
pub mod meta;
pub mod questions;
