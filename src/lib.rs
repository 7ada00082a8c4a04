//! # pathtree
//!
//! **pathtree** is a path-routing engine: register URL-like patterns with
//! typed parameters, compile them once, and resolve concrete paths to a
//! handler plus cast parameter values.
//!
//! ## Overview
//!
//! ```text
//! /users/<id:int>/posts/<slug:slug>
//! ```
//!
//! Patterns are split on a configurable delimiter. Each segment is either
//! literal text or a `<name>` / `<name:type>` parameter. Parameters are
//! typed by a [`TypeRegistry`](types::TypeRegistry); when several types
//! could claim the same position, the most specific one wins and the walk
//! backtracks into less specific ones if the rest of the path does not fit.
//!
//! ## Architecture
//!
//! - **[`router`]** - Registration, route grouping, the compiled tree and resolution
//! - **[`types`]** - Parameter types (`string`, `int`, `number`, `alpha`, `slug`, `ymd`, `uuid`) and cast values
//! - **[`handler`]** - Closure handlers and `RouteMatch::invoke`
//! - **[`shared`]** - Lock-free swapping of finalized routers
//! - **[`config`]** - Router settings from code, environment or YAML
//! - **[`error`]** - The [`RouterError`] type
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ## Quick Start
//!
//! ```rust
//! use pathtree::handler::{handler, HandlerRouter};
//! use pathtree::router::{Params, RouteOptions, Router};
//!
//! let mut router: HandlerRouter<String> = Router::new();
//! router
//!     .add_with(
//!         "/hello/<name:alpha>",
//!         handler(|p: &Params| format!("hello {}", p.get("name").unwrap())),
//!         RouteOptions::new().methods(["GET"]),
//!     )
//!     .unwrap();
//! router.finalize().unwrap();
//!
//! let m = router.resolve("/hello/world", "GET").unwrap();
//! assert_eq!(m.invoke(), "hello world");
//! ```
//!
//! ## Errors
//!
//! Registration fails with `RouteExists`, `ParamNameError` or `InvalidUsage`;
//! resolution fails with `NotFound` or `NoMethod`. See [`RouterError`].

pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod router;
pub mod shared;
pub mod types;

pub use config::RouterConfig;
pub use error::{Result, RouterError};
pub use router::{Params, RouteMatch, RouteOptions, Router};
pub use shared::SharedRouter;
pub use types::{ParamValue, TypeRegistry};
