//! Type-safe wrappers around the repository actor's mailbox.

pub mod repository_client;

pub use repository_client::*;
