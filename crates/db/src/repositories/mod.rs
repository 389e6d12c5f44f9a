//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod item_repo;

pub use category_repo::CategoryRepo;
pub use item_repo::ItemRepo;
