//! Connection lifecycle: handles, mailboxes, and the live-connection
//! registry.

pub mod handle;
pub mod mailbox;
pub mod registry;

pub use handle::ConnectionHandle;
pub use mailbox::{Mailbox, MailboxReceiver, MailboxSender, PushOutcome};
pub use registry::ConnectionRegistry;
