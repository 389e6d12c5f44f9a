//! Domain primitives shared by the db and api crates.

pub mod error;
pub mod messages;
pub mod types;
