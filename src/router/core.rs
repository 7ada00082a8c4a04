//! Router core module: registration, compilation and the resolve hot path.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::group::{RouteGroup, Skeleton};
use super::params::Params;
use super::route::{MethodSet, Requirements, Route, RouteSignature};
use super::segment::{split_path, split_pattern, Segment};
use super::tree::{CompiledTree, Outcome, Query};
use crate::config::RouterConfig;
use crate::error::{Result, RouterError};
use crate::types::{ParamValue, TypeRegistry};

/// Resolutions slower than this are logged at WARN
const SLOW_MATCH: Duration = Duration::from_millis(1);

/// Options accepted by [`Router::add_with`]
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    methods: Option<Vec<String>>,
    strict: bool,
    requirements: Requirements,
    overwrite: bool,
    unquote: Option<bool>,
}

impl RouteOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Methods served by the handler. Defaults to the configured default method.
    #[must_use]
    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    /// Make a trailing delimiter part of the route's identity
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn requirement(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.requirements.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    /// Replace conflicting registrations instead of failing with `RouteExists`
    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Percent-decode string parameters (overrides the router default)
    #[must_use]
    pub fn unquote(mut self, unquote: bool) -> Self {
        self.unquote = Some(unquote);
        self
    }
}

/// Result of successfully resolving a path
pub struct RouteMatch<H: ?Sized> {
    /// The matched route (frozen at the last `finalize`)
    pub route: Arc<Route<H>>,
    /// Handler registered for the requested method
    pub handler: Arc<H>,
    /// Cast parameters keyed by declared name
    pub params: Params,
}

impl<H: ?Sized> RouteMatch<H> {
    /// Pattern of the matched route, e.g. `/foo/<bar:int>`
    #[must_use]
    pub fn path(&self) -> &str {
        self.route.path()
    }

    #[inline]
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}

impl<H: ?Sized> Clone for RouteMatch<H> {
    fn clone(&self) -> Self {
        Self {
            route: Arc::clone(&self.route),
            handler: Arc::clone(&self.handler),
            params: self.params.clone(),
        }
    }
}

impl<H: ?Sized> std::fmt::Debug for RouteMatch<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteMatch")
            .field("path", &self.path())
            .field("params", &self.params)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RouteRef {
    group: usize,
    index: usize,
}

/// Path router: collects routes with `add`, compiles them with `finalize`
/// and resolves `(path, method)` pairs.
///
/// `H` is the handler type. It is stored behind `Arc`, so unsized handler
/// types such as [`Handler<R>`](crate::handler::Handler) work.
///
/// # Lifecycle
///
/// Registration is single-writer. After `finalize` the router refuses
/// further `add` calls (see [`Router::reopen`]) and `resolve` only reads the
/// compiled tree, so a finalized router can be shared across threads.
pub struct Router<H: ?Sized> {
    config: RouterConfig,
    types: Arc<TypeRegistry>,
    groups: Vec<RouteGroup<H>>,
    group_index: HashMap<Skeleton, usize>,
    static_routes: HashMap<RouteSignature, RouteRef>,
    dynamic_routes: HashMap<RouteSignature, RouteRef>,
    tree: Option<CompiledTree<H>>,
}

impl<H: ?Sized> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> Router<H> {
    /// Router with the default configuration and the built-in types
    #[must_use]
    pub fn new() -> Self {
        Self::build(RouterConfig::default(), TypeRegistry::builtin())
    }

    /// Router with a custom configuration and the built-in types
    pub fn with_config(config: RouterConfig) -> Result<Self> {
        Self::with_types(config, TypeRegistry::builtin())
    }

    /// Router with a custom configuration and type registry
    pub fn with_types(config: RouterConfig, types: Arc<TypeRegistry>) -> Result<Self> {
        if matches!(config.delimiter, '<' | '>') {
            return Err(RouterError::InvalidUsage(format!(
                "'{}' cannot be used as a delimiter",
                config.delimiter
            )));
        }
        if config.default_method.trim().is_empty() {
            return Err(RouterError::InvalidUsage(
                "default method must not be empty".to_string(),
            ));
        }
        Ok(Self::build(config, types))
    }

    fn build(config: RouterConfig, types: Arc<TypeRegistry>) -> Self {
        Self {
            config,
            types,
            groups: Vec::new(),
            group_index: HashMap::new(),
            static_routes: HashMap::new(),
            dynamic_routes: HashMap::new(),
            tree: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    #[must_use]
    pub fn delimiter(&self) -> char {
        self.config.delimiter
    }

    #[must_use]
    pub fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }

    /// Register `handler` on `path` for the default method
    pub fn add(&mut self, path: &str, handler: impl Into<Arc<H>>) -> Result<&Route<H>> {
        self.add_with(path, handler, RouteOptions::default())
    }

    /// Register `handler` on `path` with explicit options.
    ///
    /// # Errors
    ///
    /// - `RouteExists` when an identical route already serves one of the methods
    /// - `ParamNameError` for malformed or unknown parameter declarations
    /// - `InvalidUsage` for an empty method set or a strictness clash
    /// - `Finalized` once [`Router::finalize`] has run
    pub fn add_with(
        &mut self,
        path: &str,
        handler: impl Into<Arc<H>>,
        options: RouteOptions,
    ) -> Result<&Route<H>> {
        if self.tree.is_some() {
            return Err(RouterError::Finalized);
        }

        let delimiter = self.config.delimiter;
        let segments = split_pattern(path, delimiter, options.strict)
            .into_iter()
            .map(|token| Segment::parse(token, &self.types))
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        for param in segments.iter().filter_map(|s| match s {
            Segment::Dynamic(d) => Some(d),
            Segment::Static(_) => None,
        }) {
            if !seen.insert(param.name()) {
                return Err(RouterError::param(param.raw(), "duplicate parameter name"));
            }
        }

        let methods = self.method_set(path, options.methods)?;

        let display_path = if !options.strict && path.len() > delimiter.len_utf8() {
            path.strip_suffix(delimiter).unwrap_or(path)
        } else {
            path
        };
        let unquote = options.unquote.unwrap_or(self.config.unquote);
        let route = Route::new(
            display_path,
            segments,
            options.strict,
            options.requirements,
            unquote,
        );

        let signature = route.signature().clone();
        let is_static = route.is_static();
        let skeleton = Skeleton::of(route.segments());
        let handler = handler.into();

        let location = match self.group_index.get(&skeleton) {
            Some(&group) => {
                let index = self.groups[group].insert(route, methods, handler, options.overwrite)?;
                RouteRef { group, index }
            }
            None => {
                let mut new_group = RouteGroup::new(skeleton.clone());
                let index = new_group.insert(route, methods, handler, options.overwrite)?;
                self.groups.push(new_group);
                let group = self.groups.len() - 1;
                self.group_index.insert(skeleton, group);
                RouteRef { group, index }
            }
        };

        let table = if is_static {
            &mut self.static_routes
        } else {
            &mut self.dynamic_routes
        };
        table.insert(signature, location);

        let route = &self.groups[location.group].routes()[location.index];
        debug!(
            path = %route.path(),
            methods = ?route.methods(),
            strict = route.strict(),
            overwrite = options.overwrite,
            "Route registered"
        );
        Ok(route)
    }

    fn method_set(&self, path: &str, methods: Option<Vec<String>>) -> Result<MethodSet> {
        let methods: MethodSet = match methods {
            Some(methods) => methods
                .iter()
                .map(|m| m.trim().to_ascii_uppercase())
                .filter(|m| !m.is_empty())
                .collect(),
            None => std::iter::once(self.config.default_method.to_ascii_uppercase()).collect(),
        };
        if methods.is_empty() {
            return Err(RouterError::InvalidUsage(format!(
                "route {} registered with an empty method set",
                path
            )));
        }
        Ok(methods)
    }

    /// Compile the registered routes into the lookup tree.
    ///
    /// Each call rebuilds the tree from scratch; on error the previous tree
    /// (if any) stays in place.
    ///
    /// # Errors
    ///
    /// `Configuration` when two routes compile to an identical leaf.
    pub fn finalize(&mut self) -> Result<()> {
        let start = Instant::now();
        let tree = CompiledTree::build(self.groups.iter().flat_map(|g| g.routes().iter()))?;

        info!(
            routes_count = tree.route_count(),
            static_routes = self.static_routes.len(),
            dynamic_routes = self.dynamic_routes.len(),
            groups = self.groups.len(),
            nodes = tree.node_count(),
            duration_us = start.elapsed().as_micros(),
            "Route tree finalized"
        );

        self.tree = Some(tree);
        Ok(())
    }

    /// Drop the compiled tree so more routes can be added.
    ///
    /// `resolve` fails with `NotFinalized` until `finalize` runs again.
    pub fn reopen(&mut self) {
        if self.tree.take().is_some() {
            debug!("Router reopened for registration");
        }
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.tree.is_some()
    }

    /// Resolve `path` for `method`
    ///
    /// # Errors
    ///
    /// `NotFound`, `NoMethod`, or `NotFinalized` before the first `finalize`.
    pub fn resolve(&self, path: &str, method: &str) -> Result<RouteMatch<H>> {
        self.resolve_with(path, method, None)
    }

    /// Resolve with caller-supplied requirement values (e.g. a host header).
    ///
    /// Routes registered with requirements only match when every key/value
    /// is present in `extra`.
    pub fn resolve_with(
        &self,
        path: &str,
        method: &str,
        extra: Option<&Requirements>,
    ) -> Result<RouteMatch<H>> {
        let tree = self.tree.as_ref().ok_or(RouterError::NotFinalized)?;
        let method = method.to_ascii_uppercase();
        let delimiter = self.config.delimiter;

        debug!(method = %method, path = %path, "Route match attempt");
        let match_start = Instant::now();

        let tokens = split_path(path, delimiter);
        let mut outcome = tree.lookup(&Query {
            tokens: &tokens,
            method: &method,
            extra,
            allow_strict: true,
            delimiter,
        });

        // A trailing delimiter is normalized away for non-strict routes
        if !matches!(outcome, Outcome::Matched(..)) {
            if let Some(trimmed) = path.strip_suffix(delimiter).filter(|p| !p.is_empty()) {
                let tokens = split_path(trimmed, delimiter);
                let retry = tree.lookup(&Query {
                    tokens: &tokens,
                    method: &method,
                    extra,
                    allow_strict: false,
                    delimiter,
                });
                let take_retry = matches!(retry, Outcome::Matched(..))
                    || (matches!(outcome, Outcome::NotFound)
                        && matches!(retry, Outcome::NoMethod(_)));
                if take_retry {
                    outcome = retry;
                }
            }
        }

        let match_duration = match_start.elapsed();

        match outcome {
            Outcome::Matched(route, values) => {
                let handler = route
                    .handler_for(&method)
                    .map(Arc::clone)
                    .ok_or_else(|| RouterError::not_found(path))?;
                let params = build_params(&route, values);

                if match_duration > SLOW_MATCH {
                    warn!(
                        method = %method,
                        path = %path,
                        route_pattern = %route.path(),
                        duration_us = match_duration.as_micros(),
                        "Slow route matching detected"
                    );
                } else {
                    debug!(
                        method = %method,
                        path = %path,
                        route_pattern = %route.path(),
                        params = params.len(),
                        duration_us = match_duration.as_micros(),
                        "Route matched"
                    );
                }

                Ok(RouteMatch {
                    route,
                    handler,
                    params,
                })
            }
            Outcome::NoMethod(route) => {
                let allowed: Vec<String> = route.methods().into_iter().map(str::to_string).collect();
                warn!(
                    method = %method,
                    path = %path,
                    route_pattern = %route.path(),
                    allowed = ?allowed,
                    "Method not registered on matched route"
                );
                Err(RouterError::NoMethod {
                    path: path.to_string(),
                    method,
                    allowed,
                })
            }
            Outcome::NotFound => {
                warn!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "No route matched"
                );
                Err(RouterError::not_found(path))
            }
        }
    }

    /// Routes whose segments are all literal, keyed by signature
    pub fn static_routes(&self) -> impl Iterator<Item = (&RouteSignature, &Route<H>)> {
        self.static_routes
            .iter()
            .filter_map(|(sig, loc)| self.locate(*loc).map(|route| (sig, route)))
    }

    /// Routes with at least one dynamic segment, keyed by signature
    pub fn dynamic_routes(&self) -> impl Iterator<Item = (&RouteSignature, &Route<H>)> {
        self.dynamic_routes
            .iter()
            .filter_map(|(sig, loc)| self.locate(*loc).map(|route| (sig, route)))
    }

    fn locate(&self, location: RouteRef) -> Option<&Route<H>> {
        self.groups.get(location.group)?.get(location.index)
    }

    /// Static route registered under the literal `path` without requirements
    #[must_use]
    pub fn static_route(&self, path: &str) -> Option<&Route<H>> {
        self.static_routes()
            .map(|(_, route)| route)
            .find(|route| route.path() == path && route.requirements().is_empty())
    }

    /// Every registered route, in group order
    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.groups.iter().flat_map(|g| g.routes().iter())
    }

    #[must_use]
    pub fn groups(&self) -> &[RouteGroup<H>] {
        &self.groups
    }

    #[must_use]
    pub fn route_count(&self) -> usize {
        self.static_routes.len() + self.dynamic_routes.len()
    }

    /// Patterns of all registered routes
    #[must_use]
    pub fn get_all_path_patterns(&self) -> Vec<String> {
        self.routes().map(|r| r.path().to_string()).collect()
    }

    /// Log the routing table at INFO
    pub fn dump_routes(&self) {
        info!(
            routes_count = self.route_count(),
            finalized = self.is_finalized(),
            "Routing table"
        );
        for route in self.routes() {
            info!(
                path = %route.path(),
                signature = %route.signature(),
                methods = ?route.methods(),
                "Route"
            );
        }
    }

    /// Outline of the compiled tree; empty before `finalize`
    #[must_use]
    pub fn tree_outline(&self) -> Vec<String> {
        self.tree
            .as_ref()
            .map(CompiledTree::describe)
            .unwrap_or_default()
    }
}

fn build_params<H: ?Sized>(route: &Route<H>, values: Vec<ParamValue>) -> Params {
    let mut params = Params::new();
    for (segment, value) in route.params().zip(values) {
        let value = match value {
            ParamValue::Str(raw) if route.unquote() => ParamValue::Str(unquote(raw)),
            other => other,
        };
        params.push(segment.name_arc(), value);
    }
    params
}

fn unquote(raw: String) -> String {
    let decoded = urlencoding::decode(&raw).ok().map(Cow::into_owned);
    decoded.unwrap_or(raw)
}
