//! Dotted keys and their segments.
//!
//! A `KeyPath` is the parsed form of a dotted string such as `"4.1.shapes"`.
//! Iterating it yields `Segment`s, each of which remembers the dotted prefix
//! consumed before it so that errors can point at the exact failing hop.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Separator between segments of a dotted key. Escaping is not supported.
pub const SEPARATOR: &str = ".";

/// One component of a dotted key, plus the dotted prefix before it.
///
/// The origin is for diagnostics only; it never takes part in lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    part: String,
    origin: String,
}

impl Segment {
    pub fn new(part: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            part: part.into(),
            origin: origin.into(),
        }
    }

    /// The raw text of this segment, used as a key or an index.
    pub fn part(&self) -> &str {
        &self.part
    }

    /// Dotted prefix of every segment before this one; empty for the first.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The origin and part joined, e.g. `2.b.iii`.
    pub fn qualified(&self) -> String {
        if self.origin.is_empty() {
            self.part.clone()
        } else {
            format!("{}{}{}", self.origin, SEPARATOR, self.part)
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.part)
    }
}

/// A parsed dotted key.
///
/// Always holds at least one raw piece: splitting `""` yields a single empty
/// piece, just like splitting any other string without a separator.
///
/// # Example
///
/// ```
/// use deepquill::path::KeyPath;
///
/// let path = KeyPath::parse("b.ii", "2");
/// assert_eq!(path.to_string(), "2.b.ii");
///
/// let origins: Vec<String> = path.segments().map(|s| s.origin().to_string()).collect();
/// assert_eq!(origins, vec!["", "2", "2.b"]);
/// ```
#[derive(Debug, Clone)]
pub struct KeyPath {
    pieces: Vec<String>,
    dotted: String,
}

impl KeyPath {
    /// Parses a dotted key with no origin.
    pub fn new(key: &str) -> Self {
        Self::parse(key, "")
    }

    /// Parses `key`, prepending `origin` as an extra leading piece when it is
    /// not empty.
    pub fn parse(key: &str, origin: &str) -> Self {
        let mut pieces = Vec::new();
        if !origin.is_empty() {
            pieces.push(origin.to_string());
        }
        pieces.extend(key.split(SEPARATOR).map(str::to_string));
        let dotted = pieces.join(SEPARATOR);
        Self { pieces, dotted }
    }

    /// Raw pieces in order, as split from the dotted string.
    pub fn pieces(&self) -> &[String] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Never true; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The dotted string this path was parsed from.
    pub fn as_str(&self) -> &str {
        &self.dotted
    }

    /// Iterates the segments lazily. Each call starts over from the first one.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            pieces: &self.pieces,
            index: 0,
            origin: String::new(),
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted)
    }
}

impl PartialEq for KeyPath {
    fn eq(&self, other: &Self) -> bool {
        self.dotted == other.dotted
    }
}

impl Eq for KeyPath {}

impl Hash for KeyPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dotted.hash(state);
    }
}

impl PartialEq<str> for KeyPath {
    fn eq(&self, other: &str) -> bool {
        self.dotted == other
    }
}

impl PartialEq<&str> for KeyPath {
    fn eq(&self, other: &&str) -> bool {
        self.dotted == *other
    }
}

impl Borrow<str> for KeyPath {
    fn borrow(&self) -> &str {
        &self.dotted
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = Segment;
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments()
    }
}

/// Lazy iterator over the segments of a `KeyPath`.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    pieces: &'a [String],
    index: usize,
    origin: String,
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let piece = self.pieces.get(self.index)?;
        let segment = Segment::new(piece.as_str(), self.origin.as_str());
        self.origin = segment.qualified();
        self.index += 1;
        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.pieces.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Segments<'_> {}
