//! Node paths inside an ODIM hierarchy.

use serde::{Deserialize, Serialize};

/// A `/`-separated path to a group or dataset, e.g. `/dataset1/data2/what`.
///
/// Paths are always absolute. The root is written `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a path. Empty segments (leading, trailing or doubled `/`) are
    /// ignored, so `dataset1`, `/dataset1` and `/dataset1/` are equal.
    pub fn parse(s: &str) -> Self {
        Self {
            segments: s
                .split('/')
                .filter(|seg| !seg.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Append one or more segments.
    pub fn join(&self, child: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(
            child
                .split('/')
                .filter(|seg| !seg.is_empty())
                .map(str::to_string),
        );
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// The path itself and all of its ancestors, most specific first and
    /// ending with the root.
    pub fn ancestors(&self) -> Vec<Self> {
        (0..=self.segments.len())
            .rev()
            .map(|n| Self {
                segments: self.segments[..n].to_vec(),
            })
            .collect()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path relative to the root, without the leading `/`.
    pub fn relative(&self) -> String {
        self.segments.join("/")
    }
}

impl std::fmt::Display for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}

impl From<&str> for NodePath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for NodePath {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<NodePath> for String {
    fn from(p: NodePath) -> Self {
        p.to_string()
    }
}
