//! HTTP request handlers, organized by feature domain.

pub mod announcement;
pub mod chat;
pub mod health;
pub mod ticker;
