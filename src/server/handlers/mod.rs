//! HTTP handlers.

mod expirations;
mod index;

pub use expirations::expirations_handler;
pub use index::index_handler;
