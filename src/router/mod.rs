//! # Router Module
//!
//! Path matching and route resolution for `pathtree`.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Parsing registered patterns such as `/users/<id:int>/posts` into segments
//! - Grouping routes that share a shape and rejecting conflicting registrations
//! - Compiling every route into a single lookup tree
//! - Resolving a concrete path and method to a handler plus cast parameters
//!
//! ## Architecture
//!
//! The router works in three phases:
//!
//! 1. **Registration**: `add` / `add_with` parse the pattern, check it against
//!    the routes already registered with the same [`Skeleton`] and record the
//!    handler per method set. Nothing is compiled yet.
//!
//! 2. **Compilation**: `finalize` builds the lookup tree. Static segments are
//!    keyed by text; dynamic segments are ordered by type specificity
//!    (`uuid` > `ymd` > `int` > `number` > `alpha` > `slug` > `string`).
//!
//! 3. **Matching**: `resolve` walks the tree depth-first, static children
//!    first, backtracking into the next candidate when a subtree has no route.
//!
//! ## Example
//!
//! ```rust
//! use pathtree::router::{RouteOptions, Router};
//!
//! let mut router: Router<str> = Router::new();
//! router.add("/users/<id:int>", "get_user").unwrap();
//! router
//!     .add_with("/users", "create_user", RouteOptions::new().methods(["POST"]))
//!     .unwrap();
//! router.finalize().unwrap();
//!
//! let m = router.resolve("/users/42", "BASE").unwrap();
//! assert_eq!(&*m.handler, "get_user");
//! assert_eq!(m.params.get("id").and_then(|v| v.as_int()), Some(42));
//! ```
//!
//! ## Performance
//!
//! Resolution cost depends on path depth and the number of dynamic
//! candidates per level, not on the total number of routes. Parameters are
//! stored inline for up to eight values.

mod core;
mod group;
mod params;
mod route;
mod segment;
mod tree;
#[cfg(test)]
mod tests;

pub use core::{RouteMatch, RouteOptions, Router};
pub use group::{RouteGroup, Skeleton};
pub use params::{ParamVec, Params, MAX_INLINE_PARAMS};
pub use route::{MethodSet, Requirements, Route, RouteSignature};
pub use segment::{DynamicSegment, PartKey, Segment};
