//! Route patterns and request-path matching
//!
//! Patterns are `/`-delimited sequences of literal and placeholder segments.
//! A segment containing `:` is a placeholder named by the substring after the
//! colon; it matches any single path segment and captures its value.
//! Matching is purely positional - no backtracking, no optional segments,
//! no catch-all wildcards.

use anyhow::{bail, Result};
use std::collections::HashMap;

/// Path parameters captured from placeholder segments, built fresh per request
pub type RouteParams = HashMap<String, String>;

/// One parsed pattern segment
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Must equal the request segment exactly
    Literal(String),
    /// Matches any single segment, capturing it under the given name
    Param(String),
}

impl Segment {
    fn accepts(&self, part: &str) -> bool {
        match self {
            Segment::Literal(lit) => lit == part,
            Segment::Param(_) => true,
        }
    }
}

/// A route pattern, parsed and validated once at registration
///
/// # Example
///
/// ```rust,ignore
/// let pattern = RoutePattern::parse("/users/:id")?;
/// assert!(pattern.matches("/users/123"));
/// let params = pattern.capture("/users/123").unwrap();
/// assert_eq!(params["id"], "123");
/// ```
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a raw pattern string, validating placeholder names
    ///
    /// Placeholder names must be non-empty and unique within the pattern.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut seen = Vec::new();

        for part in raw.split('/') {
            if let Some(idx) = part.find(':') {
                let name = &part[idx + 1..];
                if name.is_empty() {
                    bail!("invalid route pattern {:?}: empty placeholder name", raw);
                }
                if seen.contains(&name) {
                    bail!("invalid route pattern {:?}: duplicate placeholder :{}", raw, name);
                }
                seen.push(name);
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self { raw: raw.to_string(), segments })
    }

    /// The pattern string as registered
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the request path matches this pattern
    ///
    /// True only when segment counts are equal and every literal segment
    /// compares equal; counting passing comparisons against both lengths
    /// rejects paths that are longer or shorter than the pattern even when
    /// placeholders would otherwise absorb the extra segments.
    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').collect();
        let passing =
            self.segments.iter().zip(parts.iter()).filter(|(seg, part)| seg.accepts(part)).count();
        passing == self.segments.len() && passing == parts.len()
    }

    /// Capture placeholder values from a matching path
    ///
    /// Returns `None` when the path does not match. The returned map contains
    /// exactly the placeholder names declared in the pattern.
    pub fn capture(&self, path: &str) -> Option<RouteParams> {
        if !self.matches(path) {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(path.split('/')) {
            if let Segment::Param(name) = segment {
                params.insert(name.clone(), part.to_string());
            }
        }
        Some(params)
    }
}
