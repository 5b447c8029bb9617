use smol_str::SmolStr;

use crate::format::Line;

const LIVE_SEGMENT: &str = "live";

/// Result of applying a [`PathRewrite`] to a locator line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// New line content with the original terminator reattached
    Rewritten(String),
    /// The locator does not have the expected shape and is kept as-is
    Unchanged,
}

/// A URL split on `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSegments<'a> {
    segments: Vec<&'a str>,
}

impl<'a> UrlSegments<'a> {
    pub fn parse(url: &'a str) -> Self {
        Self {
            segments: url.split('/').collect(),
        }
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// Index of the first segment equal to `marker`, ignoring case
    pub fn find_marker(&self, marker: &str) -> Option<usize> {
        self.segments
            .iter()
            .position(|x| x.to_lowercase() == marker)
    }

    /// Replace the two segments following `marker`.
    ///
    /// Returns `false` and leaves the segments untouched when the marker is
    /// missing or fewer than two segments follow it.
    pub fn substitute_after(&mut self, marker: &str, first: &'a str, second: &'a str) -> bool {
        let Some(index) = self.find_marker(marker) else {
            return false;
        };
        if index + 2 >= self.segments.len() {
            return false;
        }

        self.segments[index + 1] = first;
        self.segments[index + 2] = second;
        true
    }

    pub fn join(&self) -> String {
        self.segments.join("/")
    }
}

/// Replaces the two path segments after `/live/` in stream URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRewrite {
    first: SmolStr,
    second: SmolStr,
}

impl PathRewrite {
    pub fn new(first: impl Into<SmolStr>, second: impl Into<SmolStr>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn is_complete(&self) -> bool {
        !self.first.is_empty() && !self.second.is_empty()
    }

    pub fn apply(&self, locator: &Line) -> RewriteOutcome {
        let url = locator.trimmed();
        if !self.is_complete() || !url.contains("://") || !url.to_lowercase().contains("/live/") {
            return RewriteOutcome::Unchanged;
        }

        let mut segments = UrlSegments::parse(url);
        if !segments.substitute_after(LIVE_SEGMENT, &self.first, &self.second) {
            return RewriteOutcome::Unchanged;
        }

        let mut rewritten = segments.join();
        rewritten.push_str(locator.terminator().as_str());
        RewriteOutcome::Rewritten(rewritten)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        PathRewrite, RewriteOutcome,
        format::Line,
        rewrite::UrlSegments,
    };

    fn rewrite() -> PathRewrite {
        PathRewrite::new("NEW1", "NEW2")
    }

    #[test]
    fn test_rewrite_keeps_crlf() {
        let line = Line::new("http://host.example/live/OLD1/OLD2/stream.ts\r\n");
        assert_eq!(
            rewrite().apply(&line),
            RewriteOutcome::Rewritten("http://host.example/live/NEW1/NEW2/stream.ts\r\n".into())
        );
    }

    #[test]
    fn test_rewrite_trims_and_keeps_missing_terminator() {
        let line = Line::new("  http://h/LIVE/a/b/1.ts ");
        assert_eq!(
            rewrite().apply(&line),
            RewriteOutcome::Rewritten("http://h/LIVE/NEW1/NEW2/1.ts".into())
        );
    }

    #[test]
    fn test_rewrite_skips_other_paths() {
        let line = Line::new("http://host.example/vod/movie.ts\n");
        assert_eq!(rewrite().apply(&line), RewriteOutcome::Unchanged);

        // not a URL
        let line = Line::new("/live/a/b/c\n");
        assert_eq!(rewrite().apply(&line), RewriteOutcome::Unchanged);
    }

    #[test]
    fn test_rewrite_needs_two_segments() {
        let line = Line::new("http://h/live/only\n");
        assert_eq!(rewrite().apply(&line), RewriteOutcome::Unchanged);

        let line = Line::new("http://h/live/a/b\n");
        assert_eq!(
            rewrite().apply(&line),
            RewriteOutcome::Rewritten("http://h/live/NEW1/NEW2\n".into())
        );
    }

    #[test]
    fn test_rewrite_uses_first_live_segment() {
        let line = Line::new("http://h/live/x/y/live/z\n");
        assert_eq!(
            rewrite().apply(&line),
            RewriteOutcome::Rewritten("http://h/live/NEW1/NEW2/live/z\n".into())
        );
    }

    #[test]
    fn test_substitute_after() {
        let mut segments = UrlSegments::parse("http://h/live/a");
        assert_eq!(segments.find_marker("live"), Some(3));
        assert!(!segments.substitute_after("live", "x", "y"));
        assert_eq!(segments.join(), "http://h/live/a");
    }

    #[test]
    fn test_rewrite_empty_token() {
        let line = Line::new("http://h/live/u/p/1.ts\n");
        assert!(!PathRewrite::new("", "").is_complete());
        assert_eq!(PathRewrite::new("", "").apply(&line), RewriteOutcome::Unchanged);
        assert_eq!(PathRewrite::new("", "NEW2").apply(&line), RewriteOutcome::Unchanged);
    }
}
