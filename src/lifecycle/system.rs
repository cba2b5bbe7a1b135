use crate::clients::RepositoryClient;
use crate::config::TrackerConfig;
use crate::identity::{IdentityProvider, MemoryIdentity};
use crate::idle::IdleTimer;
use crate::repository::{self, RepositoryContext};
use crate::store::{MemoryStore, RecordStore};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for one tracker instance.
///
/// `TrackerSystem` is responsible for:
/// - **Lifecycle management**: starting and stopping the repository actor
///   and the idle watchdog
/// - **Dependency wiring**: injecting the record store and identity provider
///   into the actor's context
///
/// # Example
///
/// ```ignore
/// let system = TrackerSystem::new(TrackerConfig::default());
///
/// auth::sign_in(system.identity.as_ref(), "ada@example.com", "secret").await?;
/// system.repository.load().await?;
/// let products = system.repository.list().await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct TrackerSystem {
    /// Client for the product repository actor.
    pub repository: RepositoryClient,

    /// The identity provider shared by the repository and the auth flows.
    pub identity: Arc<dyn IdentityProvider>,

    /// Idle watchdog; call [`touch`](IdleTimer::touch) on user activity.
    pub idle: IdleTimer,

    /// Task handles for running actors (used for graceful shutdown).
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl TrackerSystem {
    /// Creates a system backed by in-process collaborators.
    pub fn new(config: TrackerConfig) -> Self {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        let identity: Arc<dyn IdentityProvider> = Arc::new(MemoryIdentity::new());
        Self::with_collaborators(store, identity, config)
    }

    /// Creates a system around caller-provided collaborators.
    ///
    /// This is the seam tests use to keep a handle on the store or identity
    /// provider while the system runs.
    pub fn with_collaborators(
        store: Arc<dyn RecordStore>,
        identity: Arc<dyn IdentityProvider>,
        config: TrackerConfig,
    ) -> Self {
        // 1. Create the actor and its client
        let (actor, repository) = repository::new(config.mailbox_capacity());

        // 2. Start it with the collaborators injected
        let context = RepositoryContext {
            store,
            identity: identity.clone(),
        };
        let repository_handle = tokio::spawn(actor.run(context));

        // 3. Arm the idle watchdog
        let idle = IdleTimer::spawn(identity.clone(), config.idle_timeout());

        Self {
            repository,
            identity,
            idle,
            handles: vec![repository_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the repository client closes the actor's mailbox; the actor
    /// drains what it has and exits. The idle watchdog is stopped without
    /// signing anyone out.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if every task shut down cleanly
    /// - `Err(String)` if a task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.repository);
        self.idle.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
