//! Topic membership tracking for targeted fan-out.

pub mod index;
pub mod topic;

pub use index::TopicIndex;
pub use topic::Topic;
