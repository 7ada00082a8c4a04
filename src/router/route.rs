use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use super::segment::{DynamicSegment, PartKey, Segment};
use crate::error::{Result, RouterError};

/// Auxiliary key/value requirements that disambiguate otherwise identical routes
pub type Requirements = BTreeMap<String, String>;

/// Upper-cased method names served by one handler
pub type MethodSet = BTreeSet<String>;

/// Identity of a route: segment keys (literal text or rule name),
/// strictness and requirements.
///
/// Two registrations with equal signatures are the same [`Route`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteSignature {
    parts: Vec<PartKey>,
    strict: bool,
    requirements: Requirements,
}

impl RouteSignature {
    pub(crate) fn new(segments: &[Segment], strict: bool, requirements: Requirements) -> Self {
        Self {
            parts: segments.iter().map(Segment::key).collect(),
            strict,
            requirements,
        }
    }

    #[must_use]
    pub fn parts(&self) -> &[PartKey] {
        &self.parts
    }

    #[must_use]
    pub fn strict(&self) -> bool {
        self.strict
    }

    #[must_use]
    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    /// `true` when both signatures compile to the same leaf: equal parts
    /// and requirements, strictness ignored
    pub(crate) fn same_position(&self, other: &RouteSignature) -> bool {
        self.parts == other.parts && self.requirements == other.requirements
    }
}

impl fmt::Display for RouteSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                PartKey::Static(text) => write!(f, "/{}", text)?,
                PartKey::Dynamic(rule) => write!(f, "/<:{}>", rule)?,
            }
        }
        if self.strict {
            f.write_str(" strict")?;
        }
        if !self.requirements.is_empty() {
            let reqs: Vec<String> = self
                .requirements
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            write!(f, " {{{}}}", reqs.join(","))?;
        }
        Ok(())
    }
}

/// One registered pattern with its method → handler table
pub struct Route<H: ?Sized> {
    path: Arc<str>,
    segments: Vec<Segment>,
    signature: RouteSignature,
    unquote: bool,
    handlers: Vec<(MethodSet, Arc<H>)>,
}

impl<H: ?Sized> Route<H> {
    pub(crate) fn new(
        path: &str,
        segments: Vec<Segment>,
        strict: bool,
        requirements: Requirements,
        unquote: bool,
    ) -> Self {
        let signature = RouteSignature::new(&segments, strict, requirements);
        Self {
            path: Arc::from(path),
            segments,
            signature,
            unquote,
            handlers: Vec::new(),
        }
    }

    /// Pattern text as registered (trailing delimiter removed unless strict)
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Segment texts, e.g. `["foo", "<bar:int>"]`
    #[must_use]
    pub fn parts(&self) -> Vec<&str> {
        self.segments.iter().map(Segment::as_str).collect()
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn signature(&self) -> &RouteSignature {
        &self.signature
    }

    #[must_use]
    pub fn strict(&self) -> bool {
        self.signature.strict
    }

    #[must_use]
    pub fn requirements(&self) -> &Requirements {
        &self.signature.requirements
    }

    /// Whether `Str` parameters are percent-decoded after casting
    #[must_use]
    pub fn unquote(&self) -> bool {
        self.unquote
    }

    /// `true` when every segment is literal
    #[must_use]
    pub fn is_static(&self) -> bool {
        !self.segments.iter().any(Segment::is_dynamic)
    }

    /// Dynamic segments in path order
    pub fn params(&self) -> impl Iterator<Item = &DynamicSegment> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Dynamic(d) => Some(d),
            Segment::Static(_) => None,
        })
    }

    /// Registered method-sets and their handlers
    #[must_use]
    pub fn handlers(&self) -> &[(MethodSet, Arc<H>)] {
        &self.handlers
    }

    /// All methods served by this route
    #[must_use]
    pub fn methods(&self) -> BTreeSet<&str> {
        self.handlers
            .iter()
            .flat_map(|(methods, _)| methods.iter().map(String::as_str))
            .collect()
    }

    /// Handler registered for `method` (expects an upper-cased name)
    #[must_use]
    pub fn handler_for(&self, method: &str) -> Option<&Arc<H>> {
        self.handlers
            .iter()
            .find(|(methods, _)| methods.contains(method))
            .map(|(_, handler)| handler)
    }

    /// `true` when `extra` equals the route's requirements exactly.
    ///
    /// A route without requirements accepts any `extra`.
    #[must_use]
    pub fn satisfies(&self, extra: Option<&Requirements>) -> bool {
        let requirements = &self.signature.requirements;
        requirements.is_empty() || extra == Some(requirements)
    }

    pub(crate) fn same_param_names(&self, other: &Route<H>) -> bool {
        self.params()
            .map(DynamicSegment::name)
            .eq(other.params().map(DynamicSegment::name))
    }

    /// Add `handler` for `methods`.
    ///
    /// Overlap with an already-registered method-set fails with
    /// `RouteExists` unless `overwrite`, in which case the overlapping
    /// methods are taken away from their previous handler.
    pub(crate) fn add_handler(
        &mut self,
        methods: MethodSet,
        handler: Arc<H>,
        overwrite: bool,
    ) -> Result<()> {
        let overlap: Vec<String> = self
            .handlers
            .iter()
            .flat_map(|(existing, _)| existing.intersection(&methods).cloned())
            .collect();

        if !overlap.is_empty() {
            if !overwrite {
                return Err(RouterError::RouteExists {
                    path: self.path.to_string(),
                    methods: overlap,
                });
            }
            for (existing, _) in &mut self.handlers {
                existing.retain(|m| !methods.contains(m));
            }
            self.handlers.retain(|(existing, _)| !existing.is_empty());
        }

        self.handlers.push((methods, handler));
        Ok(())
    }
}

impl<H: ?Sized> Clone for Route<H> {
    fn clone(&self) -> Self {
        Self {
            path: Arc::clone(&self.path),
            segments: self.segments.clone(),
            signature: self.signature.clone(),
            unquote: self.unquote,
            handlers: self
                .handlers
                .iter()
                .map(|(methods, handler)| (methods.clone(), Arc::clone(handler)))
                .collect(),
        }
    }
}

impl<H: ?Sized> fmt::Debug for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("strict", &self.strict())
            .field("requirements", self.requirements())
            .field("methods", &self.methods())
            .finish()
    }
}
