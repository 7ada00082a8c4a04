//! Callable handlers.
//!
//! The router is generic over its handler type, so any `H` works: strings
//! naming an operation, enum tags, or boxed closures. [`Handler`] is the
//! closure form used when the router dispatches directly.

use std::sync::Arc;

use crate::router::{Params, RouteMatch, Router};

/// Closure handler receiving the cast parameters of a match
pub type Handler<R> = dyn Fn(&Params) -> R + Send + Sync;

/// Router whose handlers are closures returning `R`
pub type HandlerRouter<R> = Router<Handler<R>>;

/// Wrap a closure so it can be passed to [`Router::add`]
pub fn handler<R, F>(f: F) -> Arc<Handler<R>>
where
    F: Fn(&Params) -> R + Send + Sync + 'static,
{
    Arc::new(f)
}

impl<R> RouteMatch<Handler<R>> {
    /// Call the matched handler with the extracted parameters
    pub fn invoke(&self) -> R {
        (self.handler)(&self.params)
    }
}
