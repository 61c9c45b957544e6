//! Splitting of absolute `/`-separated paths into segments.
//!
//! Repeated separators collapse, a trailing separator is ignored and an empty
//! segment list denotes the root itself. No `.`/`..` handling happens here.

pub const SEPARATOR: char = '/';

pub fn segments(path: &str) -> Vec<&str> {
    path.split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// A path cut into the segments of its parent directory and its final segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPath<'a> {
    pub parent: Vec<&'a str>,
    /// `None` when the path is the root.
    pub base: Option<&'a str>,
}

impl<'a> SplitPath<'a> {
    pub fn new(path: &'a str) -> Self {
        let mut parent = segments(path);
        let base = parent.pop();
        Self { parent, base }
    }
}
