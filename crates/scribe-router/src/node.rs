//! Radix tree node implementation.
//!
//! Each node is one path segment. Static children are kept sorted for binary
//! search; placeholder children are tried in registration order and only
//! accept segments their converter agrees with.

use crate::converter::{Converter, Placeholder};
use crate::method_router::MethodRouter;
use crate::params::Params;
use crate::RouteError;

/// Type of path segment in the radix tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// Literal segment (e.g. "users").
    Static,
    /// Single-segment placeholder (e.g. `<int:id>`).
    Param(Placeholder),
    /// Catch-all placeholder (`<path:rest>`).
    Wildcard(String),
}

/// A node in the radix tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// The path segment this node represents, as registered.
    pub segment: String,

    /// The kind of segment.
    pub kind: SegmentKind,

    /// Method table, present when a route ends here.
    pub methods: Option<MethodRouter>,

    /// Static children, sorted by segment.
    pub static_children: Vec<Node>,

    /// Placeholder children in registration order.
    pub param_children: Vec<Node>,

    /// Catch-all child (at most one, always a leaf).
    pub wildcard_child: Option<Box<Node>>,
}

impl Node {
    fn with_kind(segment: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            segment: segment.into(),
            kind,
            methods: None,
            static_children: Vec::new(),
            param_children: Vec::new(),
            wildcard_child: None,
        }
    }

    /// Creates a root node for the tree.
    #[must_use]
    pub fn root() -> Self {
        Self::with_kind("", SegmentKind::Static)
    }

    /// Inserts a native route path (e.g. `/users/<int:id>`).
    pub fn insert(&mut self, path: &str, methods: MethodRouter) -> Result<(), RouteError> {
        let segments = Self::parse_path(path);
        if let Some(pos) = segments
            .iter()
            .position(|(_, kind)| matches!(kind, SegmentKind::Wildcard(_)))
        {
            if pos + 1 != segments.len() {
                return Err(RouteError::WildcardNotLast {
                    path: path.to_string(),
                });
            }
        }
        self.insert_segments(&segments, methods);
        Ok(())
    }

    fn parse_path(path: &str) -> Vec<(String, SegmentKind)> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                let kind = match Placeholder::parse(s) {
                    Some(p) if p.converter == Converter::Path => SegmentKind::Wildcard(p.name),
                    Some(p) => SegmentKind::Param(p),
                    None => SegmentKind::Static,
                };
                (s.to_string(), kind)
            })
            .collect()
    }

    fn insert_segments(&mut self, segments: &[(String, SegmentKind)], methods: MethodRouter) {
        let Some(((segment, kind), remaining)) = segments.split_first() else {
            match &mut self.methods {
                Some(existing) => existing.merge(methods),
                None => self.methods = Some(methods),
            }
            return;
        };

        match kind {
            SegmentKind::Static => {
                match self
                    .static_children
                    .binary_search_by(|c| c.segment.as_str().cmp(segment))
                {
                    Ok(i) => self.static_children[i].insert_segments(remaining, methods),
                    Err(i) => {
                        let mut child = Self::with_kind(segment.clone(), SegmentKind::Static);
                        child.insert_segments(remaining, methods);
                        self.static_children.insert(i, child);
                    }
                }
            }
            SegmentKind::Param(_) => {
                if let Some(child) = self.param_children.iter_mut().find(|c| c.kind == *kind) {
                    child.insert_segments(remaining, methods);
                } else {
                    let mut child = Self::with_kind(segment.clone(), kind.clone());
                    child.insert_segments(remaining, methods);
                    self.param_children.push(child);
                }
            }
            SegmentKind::Wildcard(_) => {
                let child = self
                    .wildcard_child
                    .get_or_insert_with(|| Box::new(Self::with_kind(segment.clone(), kind.clone())));
                // The catch-all name follows the latest registration.
                child.kind = kind.clone();
                child.segment.clone_from(segment);
                child.insert_segments(&[], methods);
            }
        }
    }

    /// Matches a request path against the tree.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<(&MethodRouter, Params)> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut params = Params::new();
        let methods = self.match_segments(&segments, &mut params)?;
        Some((methods, params))
    }

    fn match_segments<'a>(&'a self, segments: &[&str], params: &mut Params) -> Option<&'a MethodRouter> {
        let Some((segment, remaining)) = segments.split_first() else {
            return self.methods.as_ref();
        };

        if let Some(child) = self.find_static_child(segment) {
            if let Some(found) = child.match_segments(remaining, params) {
                return Some(found);
            }
        }

        for child in &self.param_children {
            let SegmentKind::Param(placeholder) = &child.kind else {
                continue;
            };
            if !placeholder.converter.accepts(segment) {
                continue;
            }
            let mark = params.len();
            params.push(placeholder.name.clone(), *segment);
            if let Some(found) = child.match_segments(remaining, params) {
                return Some(found);
            }
            params.truncate(mark);
        }

        if let Some(child) = &self.wildcard_child {
            if let SegmentKind::Wildcard(name) = &child.kind {
                params.push(name.clone(), segments.join("/"));
                return child.methods.as_ref();
            }
        }

        None
    }

    fn find_static_child(&self, segment: &str) -> Option<&Node> {
        self.static_children
            .binary_search_by(|c| c.segment.as_str().cmp(segment))
            .ok()
            .map(|i| &self.static_children[i])
    }
}
