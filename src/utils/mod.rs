//! Small shared helpers.
//!
//! This module provides:
//! - Duration parsing for `ttl` values
//! - Sanitization of error text embedded in line-oriented output

mod duration;
mod sanitize;

pub use duration::parse_ttl;
pub use sanitize::sanitize_field;
