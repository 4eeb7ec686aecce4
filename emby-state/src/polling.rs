//! Background polling of a coordinator
//!
//! A [`PollingTask`] refreshes one coordinator on its configured interval
//! until it is shut down. Failures are logged and counted; the next tick is
//! the only retry.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::coordinator::{Coordinator, Resource};
use crate::error::{Result, StateError};

/// A running polling loop for one coordinator
#[derive(Debug)]
pub struct PollingTask {
    /// Name of the coordinator being polled
    name: String,

    interval: Duration,

    /// Task handle for the background polling loop
    task_handle: JoinHandle<()>,

    shutdown_signal: Arc<Notify>,

    started_at: SystemTime,

    /// Number of consecutive failed refreshes
    error_count: Arc<AtomicU32>,

    /// Total number of polls performed
    poll_count: Arc<AtomicU64>,
}

impl PollingTask {
    /// Start polling `coordinator` at its configured update interval
    ///
    /// Must be called from within a tokio runtime. The first poll happens one
    /// interval after start; use [`Coordinator::first_refresh`] for the
    /// initial load.
    pub fn start<R: Resource>(coordinator: Coordinator<R>) -> Self {
        let interval = coordinator.config().update_interval;
        Self::start_with_interval(coordinator, interval)
    }

    /// Start polling `coordinator` at an explicit interval
    pub fn start_with_interval<R: Resource>(coordinator: Coordinator<R>, interval: Duration) -> Self {
        let name = coordinator.name().to_string();
        let shutdown_signal = Arc::new(Notify::new());
        let error_count = Arc::new(AtomicU32::new(0));
        let poll_count = Arc::new(AtomicU64::new(0));

        let task_handle = tokio::spawn(Self::polling_loop(
            coordinator,
            interval,
            Arc::clone(&shutdown_signal),
            Arc::clone(&error_count),
            Arc::clone(&poll_count),
        ));

        info!(coordinator = %name, ?interval, "Started polling");

        Self {
            name,
            interval,
            task_handle,
            shutdown_signal,
            started_at: SystemTime::now(),
            error_count,
            poll_count,
        }
    }

    async fn polling_loop<R: Resource>(
        coordinator: Coordinator<R>,
        interval: Duration,
        shutdown_signal: Arc<Notify>,
        error_count: Arc<AtomicU32>,
        poll_count: Arc<AtomicU64>,
    ) {
        loop {
            tokio::select! {
                _ = shutdown_signal.notified() => break,
                _ = tokio::time::sleep(interval) => {}
            }

            poll_count.fetch_add(1, Ordering::Relaxed);

            match coordinator.refresh().await {
                Ok(_) => {
                    error_count.store(0, Ordering::Relaxed);
                }
                Err(e) => {
                    let consecutive = error_count.fetch_add(1, Ordering::Relaxed) + 1;
                    warn!(
                        coordinator = %coordinator.name(),
                        consecutive,
                        error = %e,
                        "Scheduled refresh failed, retrying next interval"
                    );
                }
            }
        }

        debug!(coordinator = %coordinator.name(), "Polling loop ended");
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Check if the task is still running
    pub fn is_running(&self) -> bool {
        !self.task_handle.is_finished()
    }

    pub fn stats(&self) -> PollingTaskStats {
        PollingTaskStats {
            name: self.name.clone(),
            interval: self.interval,
            started_at: self.started_at,
            error_count: self.error_count.load(Ordering::Relaxed),
            poll_count: self.poll_count.load(Ordering::Relaxed),
            is_running: self.is_running(),
        }
    }

    /// Stop the loop and wait for it to finish
    ///
    /// A refresh in flight is allowed to complete first.
    pub async fn shutdown(mut self) -> Result<()> {
        self.shutdown_signal.notify_one();

        (&mut self.task_handle)
            .await
            .map_err(|e| StateError::ShutdownFailed(format!("{}: {}", self.name, e)))?;

        info!(coordinator = %self.name, "Stopped polling");
        Ok(())
    }
}

// Dropping without shutdown() still stops the loop; it exits at its next wakeup
impl Drop for PollingTask {
    fn drop(&mut self) {
        if !self.task_handle.is_finished() {
            self.shutdown_signal.notify_one();
            debug!(coordinator = %self.name, "Polling task dropped, signalled shutdown");
        }
    }
}

/// Statistics for a polling task
#[derive(Debug, Clone)]
pub struct PollingTaskStats {
    pub name: String,
    pub interval: Duration,
    pub started_at: SystemTime,
    pub error_count: u32,
    pub poll_count: u64,
    pub is_running: bool,
}

impl std::fmt::Display for PollingTaskStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (interval: {:?}, polls: {}, errors: {}, running: {})",
            self.name, self.interval, self.poll_count, self.error_count, self.is_running
        )
    }
}
