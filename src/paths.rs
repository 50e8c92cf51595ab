//! Archive-relative path canonicalization and reference resolution
//!
//! Interface documents reference each other with relative paths, using
//! either slash flavor and the occasional `..` hop. Everything that
//! crosses a store or sink boundary goes through [`normalize`] first so
//! lookups and output layout agree on a single spelling.

/// Canonicalize an archive-relative path.
///
/// Collapses `.` and `..` segments, converts backslashes to forward
/// slashes, and strips empty segments and any leading slash. The result
/// is stable: normalizing an already-normalized path returns it unchanged.
///
/// A `..` that climbs above the archive root has no valid meaning; real
/// interface data never does this, so it is a caller bug. Debug builds
/// assert on it, release builds drop the segment.
///
/// # Examples
///
/// ```
/// use cascframe::paths::normalize;
///
/// assert_eq!(normalize("a/b/../c"), "a/c");
/// assert_eq!(normalize(r"Interface\FrameXML\UIParent.lua"), "Interface/FrameXML/UIParent.lua");
/// ```
#[must_use]
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                let popped = segments.pop();
                debug_assert!(popped.is_some(), "path escapes archive root: {path}");
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Resolve a reference found inside a document to an archive-relative path.
///
/// Resolution is always relative to the referencing document's own
/// directory, never the crawl root; this is what makes multi-level
/// includes land in the right place. Trailing whitespace is trimmed from
/// the raw reference because TOC documents are line oriented and carry
/// CR remnants; the reference is otherwise taken verbatim.
///
/// # Examples
///
/// ```
/// use cascframe::paths::resolve;
///
/// assert_eq!(resolve("Interface/Foo/Bar.xml", "y.xml"), "Interface/Foo/y.xml");
/// assert_eq!(resolve("Interface/Foo/Bar.xml", "..\\Shared\\z.lua"), "Interface/Shared/z.lua");
/// ```
#[must_use]
pub fn resolve(referencing: &str, reference: &str) -> String {
    let reference = reference.trim_end();
    match referencing.rsplit_once(['/', '\\']) {
        Some((dir, _)) => normalize(&format!("{dir}/{reference}")),
        None => normalize(reference),
    }
}

/// True when a path names a markup document the crawler should scan.
#[must_use]
pub fn is_markup(path: &str) -> bool {
    std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_collapses_parent_segments() {
        assert_eq!(normalize("a/b/../c"), "a/c");
        assert_eq!(normalize("a/../b"), "b");
        assert_eq!(normalize("x"), "x");
    }

    #[test]
    fn normalize_strips_dot_and_empty_segments() {
        assert_eq!(normalize("./a//b/./c"), "a/b/c");
        assert_eq!(normalize("/a/b"), "a/b");
    }

    #[test]
    fn normalize_converts_backslashes() {
        assert_eq!(normalize(r"Interface\FrameXML\Bar.xml"), "Interface/FrameXML/Bar.xml");
        assert_eq!(normalize(r"a\b\..\c"), "a/c");
    }

    #[test]
    fn normalize_is_idempotent() {
        for p in ["a/b/../c", "x", "Interface/FrameXML/UIParent.lua", "./a//b"] {
            let once = normalize(p);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn resolve_is_relative_to_referencing_document() {
        assert_eq!(resolve("Interface/Foo/Bar.xml", "y.xml"), "Interface/Foo/y.xml");
        assert_eq!(resolve("Interface/Foo/Bar.xml", "../Shared/z.lua"), "Interface/Shared/z.lua");
        assert_eq!(resolve("Top.toc", "file.lua"), "file.lua");
    }

    #[test]
    fn resolve_trims_toc_line_remnants() {
        assert_eq!(resolve("MyAddon/MyAddon.toc", "MyAddon.lua\r"), "MyAddon/MyAddon.lua");
        assert_eq!(resolve("MyAddon/MyAddon.toc", "MyAddon.lua  "), "MyAddon/MyAddon.lua");
    }

    #[test]
    fn markup_extension_is_case_insensitive() {
        assert!(is_markup("Interface/FrameXML/UIParent.xml"));
        assert!(is_markup("Bindings.XML"));
        assert!(!is_markup("UIParent.lua"));
        assert!(!is_markup("MyAddon.toc"));
    }
}
