//! Request extractors.

pub mod identity;

pub use identity::{Caller, USER_HEADER};
