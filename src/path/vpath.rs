use std::fmt;

use snafu::Snafu;

/// A parsed absolute path: ordered segments plus a flag recording whether the
/// raw string carried a trailing `/`.
///
/// The trailing slash is a "must resolve to a directory" marker; it is kept
/// separate from the segments so that `/a/b` and `/a/b/` address the same
/// node while only the latter insists on it being a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VPath {
    segments: Vec<String>,
    dir_marker: bool,
}

impl VPath {
    /// Parses an absolute path string.
    ///
    /// Rejects paths without a leading `/`, interior empty segments (`/a//b`)
    /// and `.`/`..` segments.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, PathError> {
        let raw = raw.as_ref();
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(PathError::NotAbsolute {
                path: raw.to_string(),
            });
        };

        if rest.is_empty() {
            return Ok(Self::root());
        }

        let (rest, dir_marker) = match rest.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (rest, false),
        };

        let mut segments = Vec::new();
        for segment in rest.split('/') {
            if segment.is_empty() {
                return Err(PathError::EmptySegment {
                    path: raw.to_string(),
                });
            }
            if segment == "." || segment == ".." {
                return Err(PathError::RelativeSegment {
                    path: raw.to_string(),
                    segment: segment.to_string(),
                });
            }
            segments.push(segment.to_string());
        }

        Ok(VPath {
            segments,
            dir_marker,
        })
    }

    /// The root path `/`.
    pub fn root() -> Self {
        VPath {
            segments: Vec::new(),
            dir_marker: true,
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the raw path insisted on resolving to a directory.
    pub fn requires_dir(&self) -> bool {
        self.dir_marker
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The path of all segments except the last.
    pub fn parent(&self) -> Result<VPath, PathError> {
        if self.is_root() {
            return Err(PathError::NoParent {
                path: self.to_string(),
            });
        }
        Ok(VPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
            dir_marker: true,
        })
    }

    /// The last segment.
    pub fn leaf(&self) -> Result<&str, PathError> {
        match self.segments.last() {
            Some(leaf) => Ok(leaf),
            None => Err(PathError::NoLeaf {
                path: self.to_string(),
            }),
        }
    }

    /// The path extended by one child name. The result carries no directory
    /// marker, whatever the receiver had.
    pub fn join(&self, name: &str) -> VPath {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        VPath {
            segments,
            dir_marker: false,
        }
    }

    /// The first `depth` segments of this path.
    pub fn prefix(&self, depth: usize) -> VPath {
        VPath {
            segments: self.segments[..depth].to_vec(),
            dir_marker: true,
        }
    }

    /// A copy without the trailing-slash marker, addressing the same node.
    pub fn unmarked(&self) -> VPath {
        VPath {
            segments: self.segments.clone(),
            dir_marker: false,
        }
    }

    /// Segment-aware strict-ancestor test; `/pics` is not an ancestor of
    /// `/pics-backup`.
    pub fn is_ancestor_of(&self, other: &VPath) -> bool {
        other.segments.len() > self.segments.len()
            && other.segments[..self.segments.len()] == self.segments
    }

    /// Whether both paths address the same node, ignoring directory markers.
    pub fn same_target(&self, other: &VPath) -> bool {
        self.segments == other.segments
    }
}

impl fmt::Display for VPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PathError {
    #[snafu(display("path '{}' is not absolute", path))]
    NotAbsolute { path: String },
    #[snafu(display("path '{}' contains an empty segment", path))]
    EmptySegment { path: String },
    #[snafu(display("path '{}' contains the relative segment '{}'", path, segment))]
    RelativeSegment { path: String, segment: String },
    #[snafu(display("path '{}' has no parent", path))]
    NoParent { path: String },
    #[snafu(display("path '{}' has no leaf name", path))]
    NoLeaf { path: String },
    #[snafu(display("path '{}' denotes a directory, not a file", path))]
    DirMarker { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("/", &[], true)]
    #[case("/a", &["a"], false)]
    #[case("/a/b/c", &["a", "b", "c"], false)]
    #[case("/a/b/", &["a", "b"], true)]
    #[case("/pics-backup", &["pics-backup"], false)]
    fn parse_accepts_absolute_paths(
        #[case] raw: &str,
        #[case] segments: &[&str],
        #[case] requires_dir: bool,
    ) {
        let path = VPath::parse(raw).unwrap();
        assert_eq!(path.segments(), segments);
        assert_eq!(path.requires_dir(), requires_dir);
    }

    #[rstest]
    #[case("")]
    #[case("a/b")]
    #[case("docs")]
    fn parse_rejects_non_absolute_paths(#[case] raw: &str) {
        assert!(matches!(
            VPath::parse(raw),
            Err(PathError::NotAbsolute { .. })
        ));
    }

    #[rstest]
    #[case("//")]
    #[case("/a//b")]
    #[case("//a")]
    fn parse_rejects_empty_segments(#[case] raw: &str) {
        assert!(matches!(
            VPath::parse(raw),
            Err(PathError::EmptySegment { .. })
        ));
    }

    #[rstest]
    #[case("/a/./b")]
    #[case("/..")]
    fn parse_rejects_relative_segments(#[case] raw: &str) {
        assert!(matches!(
            VPath::parse(raw),
            Err(PathError::RelativeSegment { .. })
        ));
    }

    #[test]
    fn parent_drops_the_leaf() {
        let path = VPath::parse("/a/b/c").unwrap();
        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "/a/b");
        assert_eq!(parent.parent().unwrap().parent().unwrap().to_string(), "/");
    }

    #[test]
    fn root_has_no_parent_or_leaf() {
        let root = VPath::root();
        assert!(matches!(root.parent(), Err(PathError::NoParent { .. })));
        assert!(matches!(root.leaf(), Err(PathError::NoLeaf { .. })));
    }

    #[test]
    fn leaf_is_the_last_segment() {
        assert_eq!(VPath::parse("/a/b/c.txt").unwrap().leaf().unwrap(), "c.txt");
        assert_eq!(VPath::parse("/a/b/").unwrap().leaf().unwrap(), "b");
    }

    #[test]
    fn join_appends_a_segment() {
        let joined = VPath::root().join("docs").join("report.txt");
        assert_eq!(joined.to_string(), "/docs/report.txt");
        assert!(!joined.requires_dir());
    }

    #[test]
    fn prefix_truncates_segments() {
        let path = VPath::parse("/a/b/c").unwrap();
        assert_eq!(path.prefix(0).to_string(), "/");
        assert_eq!(path.prefix(2).to_string(), "/a/b");
    }

    #[rstest]
    #[case("/pics", "/pics/large-pics", true)]
    #[case("/pics", "/pics/large-pics/backup", true)]
    #[case("/pics", "/pics-backup", false)]
    #[case("/pics", "/pics", false)]
    #[case("/pics/large-pics", "/pics", false)]
    fn ancestor_check_is_segment_aware(
        #[case] ancestor: &str,
        #[case] descendant: &str,
        #[case] expected: bool,
    ) {
        let ancestor = VPath::parse(ancestor).unwrap();
        let descendant = VPath::parse(descendant).unwrap();
        assert_eq!(ancestor.is_ancestor_of(&descendant), expected);
    }

    #[test]
    fn same_target_ignores_the_directory_marker() {
        let marked = VPath::parse("/a/b/").unwrap();
        let unmarked = VPath::parse("/a/b").unwrap();
        assert!(marked.same_target(&unmarked));
        assert!(!marked.same_target(&VPath::parse("/a").unwrap()));
    }

    #[test]
    fn display_round_trips_canonical_paths() {
        for raw in ["/", "/a", "/a/b/c"] {
            assert_eq!(VPath::parse(raw).unwrap().to_string(), raw);
        }
        // the marker is dropped from the canonical form
        assert_eq!(VPath::parse("/a/b/").unwrap().to_string(), "/a/b");
    }
}
