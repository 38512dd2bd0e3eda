//! Path template matching for resource URIs
//!
//! A template such as `uhost://instances/{instance_id}/status` is a sequence
//! of `/`-separated segments, each either a literal or a `{name}`
//! placeholder. Matching a concrete path against it yields the placeholder
//! bindings.
//!
//! # Example
//!
//! ```rust
//! use ucloudctl_core::path::match_path;
//!
//! let vars = match_path("instances/{instance_id}/status", "instances/uhost-123/status").unwrap();
//! assert_eq!(vars["instance_id"], "uhost-123");
//! ```

use std::collections::{HashMap, HashSet};

use thiserror::Error;

/// Why a path did not match its template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("path length mismatch: pattern has {expected} parts, path has {actual} parts")]
    SegmentCountMismatch { expected: usize, actual: usize },

    #[error("path segment mismatch at position {position}: expected {expected}, got {actual}")]
    SegmentLiteralMismatch {
        position: usize,
        expected: String,
        actual: String,
    },
}

/// Why a template was rejected at registration time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("placeholder '{name}' appears more than once in template '{template}'")]
    DuplicatePlaceholder { template: String, name: String },

    #[error("empty placeholder at position {position} in template '{template}'")]
    EmptyPlaceholder { template: String, position: usize },
}

/// One segment of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => Segment::Placeholder(name.to_string()),
            None => Segment::Literal(raw.to_string()),
        }
    }
}

/// A validated path template
///
/// Construct once with [`PathTemplate::parse`] when registering a resource,
/// then call [`PathTemplate::matches`] per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse and validate a template, rejecting duplicate or empty placeholders
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let segments: Vec<Segment> = split(template).map(Segment::parse).collect();

        let mut seen = HashSet::new();
        for (position, segment) in segments.iter().enumerate() {
            if let Segment::Placeholder(name) = segment {
                if name.is_empty() {
                    return Err(TemplateError::EmptyPlaceholder {
                        template: template.to_string(),
                        position,
                    });
                }
                if !seen.insert(name.as_str()) {
                    return Err(TemplateError::DuplicatePlaceholder {
                        template: template.to_string(),
                        name: name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    /// The template as originally written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in declaration order
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a concrete path against this template
    pub fn matches(&self, path: &str) -> Result<HashMap<String, String>, MatchError> {
        bind(&self.segments, path)
    }
}

/// Match `path` against an unvalidated `pattern`
///
/// Both sides are trimmed of leading and trailing `/` before splitting. A
/// duplicate placeholder name in `pattern` keeps the last binding; use
/// [`PathTemplate::parse`] to reject such patterns up front.
pub fn match_path(pattern: &str, path: &str) -> Result<HashMap<String, String>, MatchError> {
    let segments: Vec<Segment> = split(pattern).map(Segment::parse).collect();
    bind(&segments, path)
}

fn split(s: &str) -> std::str::Split<'_, char> {
    s.trim_matches('/').split('/')
}

fn bind(segments: &[Segment], path: &str) -> Result<HashMap<String, String>, MatchError> {
    let parts: Vec<&str> = split(path).collect();

    if segments.len() != parts.len() {
        return Err(MatchError::SegmentCountMismatch {
            expected: segments.len(),
            actual: parts.len(),
        });
    }

    let mut variables = HashMap::new();
    for (position, (segment, part)) in segments.iter().zip(parts).enumerate() {
        match segment {
            Segment::Placeholder(name) => {
                variables.insert(name.clone(), part.to_string());
            }
            Segment::Literal(expected) if expected == part => {}
            Segment::Literal(expected) => {
                return Err(MatchError::SegmentLiteralMismatch {
                    position,
                    expected: expected.clone(),
                    actual: part.to_string(),
                });
            }
        }
    }

    Ok(variables)
}
