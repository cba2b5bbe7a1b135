//! # System Lifecycle & Orchestration
//!
//! Wiring the tracker together: collaborators are created first, the
//! repository actor is spawned with them injected, and the idle watchdog is
//! armed. Shutdown runs the same steps in reverse, dropping clients to close
//! mailboxes and then awaiting every task.
//!
//! **Key responsibilities:**
//! 1. **Collaborator wiring** - hand the store and identity provider to the
//!    repository actor via context injection
//! 2. **Lifecycle management** - spawn the actor and the idle timer
//! 3. **Graceful shutdown** - coordinate clean termination of all tasks
//! 4. **Observability setup** - [`setup_tracing`](tracing::setup_tracing)

pub mod system;
pub mod tracing;

pub use system::TrackerSystem;
pub use tracing::setup_tracing;
