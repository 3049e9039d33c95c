//! # Snapshot Cache
//!
//! Holds the product collection for one revalidation window.
//!
//! ## State machine
//! ```text
//! Empty --first success--> Populated --ttl elapsed--> Stale
//!                              ^                        |
//!                              +----refresh success-----+
//! ```
//! A failed refresh keeps whatever was installed before; the cache never
//! goes back to `Empty`.
//!
//! ## Ordering
//! Every refresh is issued a [`RefreshTicket`]. A completed fetch is only
//! installed if its ticket is newer than the one behind the current
//! snapshot, so a slow fetch that finishes late cannot overwrite newer data.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{error, info, warn};

use catalog::{Catalog, Product};
use sources::{ProductSource, SourceError};

/// One installed copy of the product collection.
#[derive(Debug, Clone)]
pub struct Snapshot {
    version: u64,
    fetched_at: Instant,
    catalog: Arc<Catalog>,
}

impl Snapshot {
    /// The empty collection served before any fetch succeeded.
    pub fn empty() -> Self {
        Self {
            version: 0,
            fetched_at: Instant::now(),
            catalog: Arc::new(Catalog::new()),
        }
    }

    /// Monotonic version, 0 for the empty fallback
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn fetched_at(&self) -> Instant {
        self.fetched_at
    }

    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing fetched successfully yet
    Empty,
    /// Installed and within the revalidation window
    Populated,
    /// Installed but past the revalidation window
    Stale,
}

/// Ordering token for one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// What happened to a completed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Installed as the new snapshot
    Applied { version: u64 },
    /// A newer fetch was already installed; this one was dropped
    Superseded,
    /// The fetch failed; the previous snapshot (if any) is kept
    Failed { reason: String },
}

/// Single-writer cache of the product collection.
///
/// Readers get `Arc<Snapshot>` clones and never block the writer.
pub struct SnapshotCache<S> {
    source: S,
    ttl: Duration,
    current: Option<Arc<Snapshot>>,
    next_ticket: u64,
    installed_ticket: Option<RefreshTicket>,
    last_error: Option<String>,
}

impl<S: ProductSource> SnapshotCache<S> {
    /// Create an empty cache.
    ///
    /// # Arguments
    /// * `source` - Where products are fetched from
    /// * `ttl` - Revalidation window
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            current: None,
            next_ticket: 0,
            installed_ticket: None,
            last_error: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn state(&self) -> CacheState {
        match &self.current {
            None => CacheState::Empty,
            Some(snapshot) if snapshot.age() >= self.ttl => CacheState::Stale,
            Some(_) => CacheState::Populated,
        }
    }

    /// The installed snapshot, if any, without fetching.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.clone()
    }

    /// Reason of the most recent failed refresh, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Issue the ticket for a refresh that is about to start.
    pub fn issue_ticket(&mut self) -> RefreshTicket {
        self.next_ticket += 1;
        RefreshTicket(self.next_ticket)
    }

    /// Install the result of a completed fetch.
    ///
    /// ## Algorithm
    /// 1. Drop the result if a newer ticket is already installed
    /// 2. On success, build the catalog (invalid records are skipped), then install it
    ///    with the next version
    /// 3. On failure, keep the previous snapshot and record the reason
    pub fn apply(
        &mut self,
        ticket: RefreshTicket,
        fetched: Result<Vec<Product>, SourceError>,
    ) -> RefreshOutcome {
        if self.installed_ticket.is_some_and(|installed| ticket <= installed) {
            warn!("Dropping superseded fetch {:?}", ticket);
            return RefreshOutcome::Superseded;
        }

        match fetched.map(Catalog::from_products) {
            Ok(catalog) => {
                let version = self.current.as_ref().map_or(0, |s| s.version) + 1;
                info!(
                    "Installed snapshot v{} with {} products from {}",
                    version,
                    catalog.len(),
                    self.source.name()
                );
                self.current = Some(Arc::new(Snapshot {
                    version,
                    fetched_at: Instant::now(),
                    catalog: Arc::new(catalog),
                }));
                self.installed_ticket = Some(ticket);
                self.last_error = None;
                RefreshOutcome::Applied { version }
            }
            Err(e) => {
                error!("Refresh from {} failed: {}", self.source.name(), e);
                if self.current.is_some() {
                    warn!("Keeping previous snapshot");
                }
                let reason = e.to_string();
                self.last_error = Some(reason.clone());
                RefreshOutcome::Failed { reason }
            }
        }
    }

    /// Fetch the full listing and install it.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        let ticket = self.issue_ticket();
        let fetched = self.source.fetch_products().await;
        self.apply(ticket, fetched)
    }

    /// Read-through access to the current snapshot.
    ///
    /// Refreshes when the cache is empty or stale. Never fails: if no
    /// fetch has ever succeeded the empty snapshot is returned and
    /// [`last_error`](Self::last_error) says why.
    pub async fn snapshot(&mut self) -> Arc<Snapshot> {
        if self.state() != CacheState::Populated {
            self.refresh().await;
        }
        self.current
            .clone()
            .unwrap_or_else(|| Arc::new(Snapshot::empty()))
    }
}
