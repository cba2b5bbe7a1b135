//! Idle-timeout sign-out.
//!
//! A background task watches for user activity; when a full window passes
//! without any, it asks the identity provider to end the session and exits.
//! Subscribers see the resulting [`SessionEvent::SignedOut`] the same way
//! they would for an explicit sign-out.
//!
//! [`SessionEvent::SignedOut`]: crate::identity::SessionEvent

use crate::identity::IdentityProvider;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

const ACTIVITY_BUFFER: usize = 8;

/// Handle to the idle watchdog task.
///
/// Dropping the handle (or calling [`shutdown`](IdleTimer::shutdown)) stops
/// the task without signing anyone out.
pub struct IdleTimer {
    activity: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl IdleTimer {
    /// Spawns the watchdog with the given inactivity window.
    pub fn spawn(identity: Arc<dyn IdentityProvider>, timeout: Duration) -> Self {
        let (activity, mut seen) = mpsc::channel::<()>(ACTIVITY_BUFFER);
        let handle = tokio::spawn(async move {
            info!(timeout_secs = timeout.as_secs(), "Idle timer started");
            loop {
                // Each pass re-arms the deadline, so every received activity
                // pushes the sign-out back by a full window.
                tokio::select! {
                    activity = seen.recv() => match activity {
                        Some(()) => continue,
                        None => break,
                    },
                    _ = tokio::time::sleep(timeout) => {
                        info!("Idle window elapsed, signing out");
                        if let Err(e) = identity.sign_out().await {
                            warn!(error = %e, "Idle sign-out failed");
                        }
                        break;
                    }
                }
            }
            debug!("Idle timer stopped");
        });
        Self { activity, handle }
    }

    /// Records user activity. Never blocks; a full buffer already carries a
    /// pending reset, and a finished timer ignores activity entirely.
    pub fn touch(&self) {
        let _ = self.activity.try_send(());
    }

    /// Stops the watchdog and waits for the task to finish.
    pub async fn shutdown(self) {
        drop(self.activity);
        if let Err(e) = self.handle.await {
            error!("Idle timer task failed: {:?}", e);
        }
    }
}
