//! Overlay engine for configuration documents
//!
//! Configuration reaches the operator as several YAML documents (profile
//! defaults, user files, `--set` flags). This module layers them into one.
//!
//! - `yaml` - deep merge of two documents and path navigation
//! - `overrides` - parsing and applying `path.to.key=value` tokens
//!
//! ## Common Types
//!
//! `PathSegment` and `parse_path` are shared by the override parser, the
//! override applier and the template renderer so that every place that
//! addresses a value inside a document agrees on the path syntax.

pub mod overrides;
pub mod yaml;

use std::fmt;

/// Represents a segment in a path expression for navigating nested documents
///
/// Path expressions like `admin.replicas` or `proxy.ports[0].name` are parsed
/// into a sequence of PathSegments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named key for accessing mapping members
    Key(String),
    /// A numeric index for accessing sequence elements
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) if key.contains('.') => write!(f, "[\"{}\"]", key),
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// Parse a path string into segments
///
/// Supports:
/// - Dot notation: `admin.resources.limits`
/// - Array indices: `proxy.ports[0]` or `proxy.ports[1].name`
/// - Bracket notation for keys containing dots: `admin.labels["app.kubernetes.io/name"]`
/// - Escaped characters: `admin\.v2` (literal dot)
///
/// # Examples
///
/// ```
/// use dubboctl::merge::{parse_path, PathSegment};
///
/// let segments = parse_path("proxy.ports[0].name");
/// assert_eq!(segments.len(), 4);
/// assert_eq!(segments[2], PathSegment::Index(0));
/// ```
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.trim().chars().peekable();
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }

        match ch {
            '\\' => escaped = true,
            '.' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current)));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current)));
                }

                match chars.peek().copied() {
                    Some(quote @ ('"' | '\'')) => {
                        chars.next();
                        let mut key = String::new();
                        let mut bracket_escaped = false;

                        while let Some(ch) = chars.next() {
                            if bracket_escaped {
                                key.push(ch);
                                bracket_escaped = false;
                            } else if ch == '\\' {
                                bracket_escaped = true;
                            } else if ch == quote && chars.peek() == Some(&']') {
                                chars.next();
                                break;
                            } else {
                                key.push(ch);
                            }
                        }

                        segments.push(PathSegment::Key(key));
                    }
                    _ => {
                        let mut content = String::new();
                        for next_ch in chars.by_ref() {
                            if next_ch == ']' {
                                break;
                            }
                            content.push(next_ch);
                        }

                        let content = content.trim();
                        if let Ok(idx) = content.parse::<usize>() {
                            segments.push(PathSegment::Index(idx));
                        } else if !content.is_empty() {
                            segments.push(PathSegment::Key(content.to_string()));
                        }
                    }
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(PathSegment::Key(current));
    }

    segments
}

/// Render segments back into the dotted form used in messages
pub fn format_path(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            PathSegment::Key(key) if !key.contains('.') && !out.is_empty() => {
                out.push('.');
                out.push_str(key);
            }
            other => out.push_str(&other.to_string()),
        }
    }
    out
}
