//! Compiled route tree.
//!
//! Built wholesale by [`Router::finalize`](super::Router::finalize) and
//! read-only afterwards. Nodes live in one arena and refer to each other by
//! index:
//!
//! - static children are keyed by literal segment text
//! - dynamic children are ordered by their rule's specificity rank
//!   (highest first, insertion order among equal ranks)
//! - a node that terminates one or more routes holds them in its leaf,
//!   routes with more requirements first
//!
//! Lookup walks one token per depth. At each depth the static child is tried
//! first, then every dynamic child in rank order; a child whose subtree
//! yields no route hands over to the next candidate at the same depth.
//! A rule that spans delimiters (`path`) tries the shortest run of tokens
//! first and grows it until the rest of the path resolves.

use std::collections::HashMap;
use std::sync::Arc;

use super::route::{Requirements, Route};
use super::segment::Segment;
use crate::error::{Result, RouterError};
use crate::types::{ParamValue, TypeRule};

pub(crate) type NodeId = usize;

const ROOT: NodeId = 0;

struct DynamicEdge {
    rule: Arc<TypeRule>,
    child: NodeId,
}

struct TreeNode<H: ?Sized> {
    static_children: HashMap<Arc<str>, NodeId>,
    dynamic_children: Vec<DynamicEdge>,
    leaf: Vec<Arc<Route<H>>>,
}

impl<H: ?Sized> TreeNode<H> {
    fn new() -> Self {
        Self {
            static_children: HashMap::new(),
            dynamic_children: Vec::new(),
            leaf: Vec::new(),
        }
    }
}

/// What a walk produced
pub(crate) enum Outcome<H: ?Sized> {
    /// Route serving the method, with cast values of its dynamic segments
    Matched(Arc<Route<H>>, Vec<ParamValue>),
    /// The path reached a route, but none serves the method
    NoMethod(Arc<Route<H>>),
    NotFound,
}

/// Per-call lookup inputs
pub(crate) struct Query<'q> {
    pub tokens: &'q [&'q str],
    pub method: &'q str,
    pub extra: Option<&'q Requirements>,
    /// Strict routes are skipped when the path was normalized
    pub allow_strict: bool,
    /// Rejoins tokens for rules that span delimiters
    pub delimiter: char,
}

pub(crate) struct CompiledTree<H: ?Sized> {
    nodes: Vec<TreeNode<H>>,
    route_count: usize,
}

impl<H: ?Sized> CompiledTree<H> {
    pub(crate) fn build<'r, I>(routes: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'r Route<H>>,
        H: 'r,
    {
        let mut tree = Self {
            nodes: vec![TreeNode::new()],
            route_count: 0,
        };
        for route in routes {
            tree.insert(Arc::new(route.clone()))?;
        }
        Ok(tree)
    }

    fn push_node(&mut self) -> NodeId {
        self.nodes.push(TreeNode::new());
        self.nodes.len() - 1
    }

    fn static_child(&mut self, parent: NodeId, text: &Arc<str>) -> NodeId {
        if let Some(&child) = self.nodes[parent].static_children.get(text.as_ref()) {
            return child;
        }
        let child = self.push_node();
        self.nodes[parent]
            .static_children
            .insert(Arc::clone(text), child);
        child
    }

    fn dynamic_child(&mut self, parent: NodeId, rule: &Arc<TypeRule>) -> NodeId {
        let edges = &self.nodes[parent].dynamic_children;
        if let Some(edge) = edges.iter().find(|e| e.rule.name() == rule.name()) {
            return edge.child;
        }
        let pos = edges
            .iter()
            .position(|e| e.rule.rank() < rule.rank())
            .unwrap_or(edges.len());
        let child = self.push_node();
        self.nodes[parent].dynamic_children.insert(
            pos,
            DynamicEdge {
                rule: Arc::clone(rule),
                child,
            },
        );
        child
    }

    fn insert(&mut self, route: Arc<Route<H>>) -> Result<()> {
        let mut current = ROOT;
        for segment in route.segments() {
            current = match segment {
                Segment::Static(text) => self.static_child(current, text),
                Segment::Dynamic(d) => self.dynamic_child(current, d.rule()),
            };
        }

        let leaf = &mut self.nodes[current].leaf;
        if let Some(existing) = leaf
            .iter()
            .find(|r| r.requirements() == route.requirements())
        {
            return Err(RouterError::Configuration(format!(
                "routes {} and {} compile to the same leaf",
                existing.path(),
                route.path()
            )));
        }
        let reqs = route.requirements().len();
        let pos = leaf
            .iter()
            .position(|r| r.requirements().len() < reqs)
            .unwrap_or(leaf.len());
        leaf.insert(pos, route);
        self.route_count += 1;
        Ok(())
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn route_count(&self) -> usize {
        self.route_count
    }

    pub(crate) fn lookup(&self, query: &Query<'_>) -> Outcome<H> {
        let mut values = Vec::with_capacity(query.tokens.len());
        let mut blocked = None;
        match self.visit(ROOT, 0, query, &mut values, &mut blocked) {
            Some(route) => Outcome::Matched(route, values),
            None => match blocked {
                Some(route) => Outcome::NoMethod(route),
                None => Outcome::NotFound,
            },
        }
    }

    fn visit(
        &self,
        node: NodeId,
        depth: usize,
        query: &Query<'_>,
        values: &mut Vec<ParamValue>,
        blocked: &mut Option<Arc<Route<H>>>,
    ) -> Option<Arc<Route<H>>> {
        let Some(token) = query.tokens.get(depth) else {
            return self.select(node, query, blocked);
        };
        let current = &self.nodes[node];

        if let Some(&child) = current.static_children.get(*token) {
            if let Some(route) = self.visit(child, depth + 1, query, values, blocked) {
                return Some(route);
            }
        }

        for edge in &current.dynamic_children {
            if edge.rule.spans_delimiters() {
                if let Some(route) = self.visit_span(edge, depth, query, values, blocked) {
                    return Some(route);
                }
                continue;
            }
            let Some(value) = edge.rule.cast(token) else {
                continue;
            };
            values.push(value);
            if let Some(route) = self.visit(edge.child, depth + 1, query, values, blocked) {
                return Some(route);
            }
            values.pop();
        }

        None
    }

    /// Try `edge` on token runs starting at `depth`, shortest first.
    ///
    /// A run never starts or ends on an empty token, so a trailing delimiter
    /// is left to the normalized retry.
    fn visit_span(
        &self,
        edge: &DynamicEdge,
        depth: usize,
        query: &Query<'_>,
        values: &mut Vec<ParamValue>,
        blocked: &mut Option<Arc<Route<H>>>,
    ) -> Option<Arc<Route<H>>> {
        let rest = &query.tokens[depth..];
        if rest.first().map_or(true, |token| token.is_empty()) {
            return None;
        }
        let mut buf = [0u8; 4];
        let delimiter: &str = query.delimiter.encode_utf8(&mut buf);

        for end in 1..=rest.len() {
            if rest[end - 1].is_empty() {
                continue;
            }
            let Some(value) = edge.rule.cast(&rest[..end].join(delimiter)) else {
                continue;
            };
            values.push(value);
            if let Some(route) = self.visit(edge.child, depth + end, query, values, blocked) {
                return Some(route);
            }
            values.pop();
        }
        None
    }

    fn select(
        &self,
        node: NodeId,
        query: &Query<'_>,
        blocked: &mut Option<Arc<Route<H>>>,
    ) -> Option<Arc<Route<H>>> {
        for route in &self.nodes[node].leaf {
            if !route.satisfies(query.extra) || (route.strict() && !query.allow_strict) {
                continue;
            }
            if route.handler_for(query.method).is_some() {
                return Some(Arc::clone(route));
            }
            if blocked.is_none() {
                *blocked = Some(Arc::clone(route));
            }
        }
        None
    }

    /// Indented outline of the tree, one line per node
    pub(crate) fn describe(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.nodes.len());
        self.describe_node(ROOT, 0, "<root>", &mut lines);
        lines
    }

    fn describe_node(&self, node: NodeId, level: usize, label: &str, lines: &mut Vec<String>) {
        let current = &self.nodes[node];
        let leaf: Vec<&str> = current.leaf.iter().map(|r| r.path()).collect();
        if leaf.is_empty() {
            lines.push(format!("{}{}", "    ".repeat(level), label));
        } else {
            lines.push(format!("{}{} -> {:?}", "    ".repeat(level), label, leaf));
        }

        let mut statics: Vec<(&Arc<str>, &NodeId)> = current.static_children.iter().collect();
        statics.sort_by(|a, b| a.0.cmp(b.0));
        for (text, &child) in statics {
            self.describe_node(child, level + 1, text, lines);
        }
        for edge in &current.dynamic_children {
            let label = format!("<:{}>", edge.rule.name());
            self.describe_node(edge.child, level + 1, &label, lines);
        }
    }
}
