//! Background evaporation sweep.
//!
//! A dedicated scheduled task owns the periodic tick; query-path operations
//! never wait on it for longer than one pass over the entries.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::PheromoneCache;

/// Handle to the periodic evaporation task.
pub struct EvaporationSweeper {
    shutdown_tx: broadcast::Sender<()>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl EvaporationSweeper {
    /// Spawn the sweep loop. Must be called from within a tokio runtime.
    pub fn start(cache: Arc<PheromoneCache>, interval: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // An interval's first tick completes immediately; consume it so
            // the first sweep lands one full interval after startup.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        cache.evaporate_tick();
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("evaporation sweeper shutting down");
                        break;
                    }
                }
            }
        });

        info!(interval_secs = interval.as_secs(), "evaporation sweeper started");
        Self {
            shutdown_tx,
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Signal the loop and wait for it to finish. Safe to call twice.
    pub async fn stop(&self) {
        self.shutdown_tx.send(()).ok();
        let handle = {
            let mut guard = self.handle.lock().unwrap_or_else(|p| p.into_inner());
            guard.take()
        };
        if let Some(handle) = handle {
            handle.await.ok();
        }
    }
}
