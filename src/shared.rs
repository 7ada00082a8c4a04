//! # Shared Router
//!
//! A finalized [`Router`] is read-only, so resolution needs no locking. When
//! the routing table has to change at runtime (reloading configuration,
//! registering plugins), build a new router off to the side, finalize it and
//! swap it in. Readers keep the snapshot they loaded until they drop it.
//!
//! ```rust
//! use pathtree::router::Router;
//! use pathtree::shared::SharedRouter;
//!
//! let mut v1: Router<str> = Router::new();
//! v1.add("/health", "v1").unwrap();
//! v1.finalize().unwrap();
//! let shared = SharedRouter::new(v1).unwrap();
//!
//! let mut v2: Router<str> = Router::new();
//! v2.add("/health", "v2").unwrap();
//! v2.finalize().unwrap();
//! shared.store(v2).unwrap();
//!
//! assert_eq!(&*shared.resolve("/health", "BASE").unwrap().handler, "v2");
//! ```

use arc_swap::{ArcSwap, Guard};
use std::sync::Arc;
use tracing::info;

use crate::error::{Result, RouterError};
use crate::router::{Requirements, RouteMatch, Router};

/// Lock-free handle to the current finalized router
pub struct SharedRouter<H: ?Sized> {
    current: ArcSwap<Router<H>>,
}

impl<H: ?Sized> SharedRouter<H> {
    /// Wrap a finalized router.
    ///
    /// # Errors
    ///
    /// `NotFinalized` if `finalize` has not run on `router`.
    pub fn new(router: Router<H>) -> Result<Self> {
        if !router.is_finalized() {
            return Err(RouterError::NotFinalized);
        }
        Ok(Self {
            current: ArcSwap::from_pointee(router),
        })
    }

    /// Current router snapshot
    #[must_use]
    pub fn load(&self) -> Guard<Arc<Router<H>>> {
        self.current.load()
    }

    /// Owned handle to the current router, for holding across calls
    #[must_use]
    pub fn snapshot(&self) -> Arc<Router<H>> {
        self.current.load_full()
    }

    /// Replace the router; readers holding the previous snapshot are unaffected.
    ///
    /// Returns the previous router.
    pub fn store(&self, router: Router<H>) -> Result<Arc<Router<H>>> {
        if !router.is_finalized() {
            return Err(RouterError::NotFinalized);
        }
        let routes_count = router.route_count();
        let previous = self.current.swap(Arc::new(router));
        info!(
            routes_count,
            previous_routes = previous.route_count(),
            "Router replaced"
        );
        Ok(previous)
    }

    pub fn resolve(&self, path: &str, method: &str) -> Result<RouteMatch<H>> {
        self.current.load().resolve(path, method)
    }

    pub fn resolve_with(
        &self,
        path: &str,
        method: &str,
        extra: Option<&Requirements>,
    ) -> Result<RouteMatch<H>> {
        self.current.load().resolve_with(path, method, extra)
    }
}

impl<H: ?Sized> std::fmt::Debug for SharedRouter<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRouter")
            .field("routes", &self.current.load().route_count())
            .finish()
    }
}
