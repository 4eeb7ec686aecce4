//! Poll-and-cache coordinator
//!
//! A [`Coordinator`] owns one remote [`Resource`] and the last snapshot that
//! was fetched for it. Consumers read the snapshot with
//! [`get_cached`](Coordinator::get_cached) and never touch the network;
//! refreshes come from the polling task or from consumers asking for one.
//!
//! Failed refreshes leave the cache untouched, so consumers keep serving the
//! last good snapshot until the next successful poll.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use emby_api::ApiError;
use parking_lot::RwLock;
use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use crate::config::CoordinatorConfig;
use crate::error::{Result, StateError};

/// A remote resource that can be fetched as a whole
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    /// The value a successful fetch produces
    type Snapshot: Send + Sync + 'static;

    /// Fetch a fresh snapshot from the server
    async fn fetch(&self) -> std::result::Result<Self::Snapshot, ApiError>;
}

/// Mutable cache state, guarded by a short-lived lock
struct CacheState<T> {
    snapshot: Option<Arc<T>>,
    last_refreshed: Option<Instant>,
    last_attempt: Option<Instant>,
    last_error: Option<String>,
    last_update_success: bool,
}

impl<T> Default for CacheState<T> {
    fn default() -> Self {
        Self {
            snapshot: None,
            last_refreshed: None,
            last_attempt: None,
            last_error: None,
            last_update_success: false,
        }
    }
}

struct Shared<R: Resource> {
    resource: R,
    config: CoordinatorConfig,
    state: RwLock<CacheState<R::Snapshot>>,
    /// Serializes fetches; held for the whole duration of one fetch
    refresh_lock: Mutex<()>,
    /// Incremented every time a fetch completes, successful or not
    completed_refreshes: AtomicU64,
    fetch_count: AtomicU64,
    tx: watch::Sender<Option<Arc<R::Snapshot>>>,
}

/// Owns scheduled refresh and caching of one resource
///
/// Cloning is cheap; clones share the same cache.
pub struct Coordinator<R: Resource> {
    inner: Arc<Shared<R>>,
}

impl<R: Resource> Clone for Coordinator<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Resource> Coordinator<R> {
    /// Create a coordinator with an empty cache
    pub fn new(resource: R, config: CoordinatorConfig) -> Result<Self> {
        config.validate()?;
        let (tx, _rx) = watch::channel(None);

        Ok(Self {
            inner: Arc::new(Shared {
                resource,
                config,
                state: RwLock::new(CacheState::default()),
                refresh_lock: Mutex::new(()),
                completed_refreshes: AtomicU64::new(0),
                fetch_count: AtomicU64::new(0),
                tx,
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    pub fn resource(&self) -> &R {
        &self.inner.resource
    }

    /// Fetch now and replace the cache
    ///
    /// On failure the cache keeps its previous snapshot and the error is
    /// returned as [`StateError::RefreshFailed`].
    pub async fn refresh(&self) -> Result<Arc<R::Snapshot>> {
        let _guard = self.inner.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Initial load
    ///
    /// Same as [`refresh`](Self::refresh), but a failure is reported as
    /// [`StateError::NotReady`] so callers can abort setup.
    pub async fn first_refresh(&self) -> Result<Arc<R::Snapshot>> {
        self.refresh().await.map_err(|e| match e {
            StateError::RefreshFailed { resource, source } => {
                StateError::NotReady { resource, source }
            }
            other => other,
        })
    }

    /// Ask for a refresh on behalf of a consumer
    ///
    /// Concurrent requests share one fetch, and requests arriving within
    /// `min_refresh_interval` of the previous fetch are served from the
    /// cache. Failures are logged and recorded, never returned; the result is
    /// whatever the cache holds afterwards.
    pub async fn request_refresh(&self) -> Option<Arc<R::Snapshot>> {
        let seen = self.inner.completed_refreshes.load(Ordering::SeqCst);
        let _guard = self.inner.refresh_lock.lock().await;

        let joined_other_refresh = self.inner.completed_refreshes.load(Ordering::SeqCst) != seen;
        let debounced = self
            .inner
            .state
            .read()
            .last_attempt
            .map_or(false, |at| at.elapsed() < self.inner.config.min_refresh_interval);

        if joined_other_refresh || debounced {
            debug!(coordinator = %self.name(), "Refresh request served from cache");
        } else {
            // Failure already logged and recorded
            let _ = self.refresh_locked().await;
        }

        self.get_cached()
    }

    /// Last good snapshot, possibly stale
    pub fn get_cached(&self) -> Option<Arc<R::Snapshot>> {
        self.inner.state.read().snapshot.clone()
    }

    /// Receiver notified whenever a new snapshot is published
    pub fn watch(&self) -> watch::Receiver<Option<Arc<R::Snapshot>>> {
        self.inner.tx.subscribe()
    }

    /// Whether the most recent refresh succeeded
    pub fn last_update_success(&self) -> bool {
        self.inner.state.read().last_update_success
    }

    /// Message of the most recent failure, cleared by the next success
    pub fn last_error(&self) -> Option<String> {
        self.inner.state.read().last_error.clone()
    }

    /// When the cache was last replaced
    pub fn last_refreshed(&self) -> Option<Instant> {
        self.inner.state.read().last_refreshed
    }

    /// Number of fetches issued against the server
    pub fn fetch_count(&self) -> u64 {
        self.inner.fetch_count.load(Ordering::SeqCst)
    }

    /// Perform one fetch; the caller must hold `refresh_lock`
    async fn refresh_locked(&self) -> Result<Arc<R::Snapshot>> {
        self.inner.state.write().last_attempt = Some(Instant::now());
        self.inner.fetch_count.fetch_add(1, Ordering::SeqCst);

        let outcome = self.inner.resource.fetch().await;
        let result = match outcome {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                {
                    let mut state = self.inner.state.write();
                    state.snapshot = Some(Arc::clone(&snapshot));
                    state.last_refreshed = Some(Instant::now());
                    state.last_error = None;
                    state.last_update_success = true;
                }
                self.inner.tx.send_replace(Some(Arc::clone(&snapshot)));
                debug!(coordinator = %self.name(), "Refresh succeeded");
                Ok(snapshot)
            }
            Err(source) => {
                {
                    let mut state = self.inner.state.write();
                    state.last_error = Some(source.to_string());
                    state.last_update_success = false;
                }
                warn!(coordinator = %self.name(), error = %source, "Refresh failed, keeping cached data");
                Err(StateError::RefreshFailed {
                    resource: self.name().to_string(),
                    source,
                })
            }
        };

        self.inner.completed_refreshes.fetch_add(1, Ordering::SeqCst);
        result
    }
}
