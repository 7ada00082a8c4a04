use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::route::{MethodSet, Requirements, Route};
use super::segment::Segment;
use crate::error::{Result, RouterError};

/// Structural key of a route: segment count, literal text of each static
/// segment and the positions of dynamic segments (`None`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Skeleton(Vec<Option<Arc<str>>>);

impl Skeleton {
    pub(crate) fn of(segments: &[Segment]) -> Self {
        Skeleton(
            segments
                .iter()
                .map(|s| match s {
                    Segment::Static(text) => Some(Arc::clone(text)),
                    Segment::Dynamic(_) => None,
                })
                .collect(),
        )
    }

    /// Number of segments
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indices of dynamic segments
    #[must_use]
    pub fn dynamic_positions(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(idx, part)| part.is_none().then_some(idx))
            .collect()
    }
}

impl fmt::Display for Skeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.0 {
            match part {
                Some(text) => write!(f, "/{}", text)?,
                None => f.write_str("/<>")?,
            }
        }
        Ok(())
    }
}

/// Route variants sharing one [`Skeleton`], differing only in the types
/// or requirements at their dynamic positions
pub struct RouteGroup<H: ?Sized> {
    skeleton: Skeleton,
    routes: Vec<Route<H>>,
}

impl<H: ?Sized> RouteGroup<H> {
    pub(crate) fn new(skeleton: Skeleton) -> Self {
        Self {
            skeleton,
            routes: Vec::new(),
        }
    }

    #[must_use]
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    #[must_use]
    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Union of the members' methods
    #[must_use]
    pub fn methods(&self) -> BTreeSet<&str> {
        self.routes.iter().flat_map(Route::methods).collect()
    }

    /// Non-empty requirement maps of the members
    #[must_use]
    pub fn requirements(&self) -> Vec<&Requirements> {
        self.routes
            .iter()
            .map(Route::requirements)
            .filter(|r| !r.is_empty())
            .collect()
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&Route<H>> {
        self.routes.get(idx)
    }

    /// Place `route` in the group and register `handler` for `methods`.
    ///
    /// A member with the same signature absorbs the handler. Returns the
    /// member index.
    pub(crate) fn insert(
        &mut self,
        mut route: Route<H>,
        methods: MethodSet,
        handler: Arc<H>,
        overwrite: bool,
    ) -> Result<usize> {
        if let Some(idx) = self
            .routes
            .iter()
            .position(|r| r.signature() == route.signature())
        {
            let existing = &mut self.routes[idx];
            if existing.same_param_names(&route) {
                existing.add_handler(methods, handler, overwrite)?;
            } else if overwrite {
                route.add_handler(methods, handler, false)?;
                *existing = route;
            } else {
                return Err(RouterError::param(
                    route.path(),
                    format!("parameter names differ from registered route {}", existing.path()),
                ));
            }
            return Ok(idx);
        }

        if let Some(other) = self
            .routes
            .iter()
            .find(|r| r.signature().same_position(route.signature()))
        {
            return Err(RouterError::InvalidUsage(format!(
                "cannot group routes with differing strictness: {} and {}",
                other.path(),
                route.path()
            )));
        }

        route.add_handler(methods, handler, false)?;
        self.routes.push(route);
        Ok(self.routes.len() - 1)
    }
}

impl<H: ?Sized> fmt::Debug for RouteGroup<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteGroup")
            .field("skeleton", &self.skeleton.to_string())
            .field("routes", &self.routes)
            .finish()
    }
}
