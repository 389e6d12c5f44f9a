//! Request handlers for the item and category resources.
//!
//! Each submodule provides async handler functions (list, get_by_id, create,
//! update, delete) for a single resource. Handlers call the injected store in
//! sequence and shape not-found and failure outcomes through
//! [`ResponseMode`](crate::mode::ResponseMode).

pub mod category;
pub mod item;
