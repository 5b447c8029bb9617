use lazy_static::lazy_static;
use regex::Regex;

use crate::format::Line;

lazy_static! {
    static ref GROUP_TITLE_REGEX: Regex =
        Regex::new("(?i)group-title=\"([^\"]*)\"").expect("Regular expression error");
}

/// A directive line and the locator line following it
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub directive: Line<'a>,
    /// Missing when the directive is the last line of the document
    pub locator: Option<Line<'a>>,
}

impl<'a> Entry<'a> {
    pub fn new(directive: Line<'a>, locator: Option<Line<'a>>) -> Self {
        Self { directive, locator }
    }

    pub fn group_title(&self) -> Option<&'a str> {
        GROUP_TITLE_REGEX
            .captures(self.directive.content())
            .and_then(|x| x.get(1))
            .map(|x| x.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::format::{Entry, Line};

    #[test]
    fn test_group_title() {
        let entry = Entry::new(
            Line::new("#EXTINF:-1 tvg-id=\"a.uk\" Group-Title=\"UK | News\",BBC\n"),
            Some(Line::new("http://example.com/live/a/b/1.ts\n")),
        );
        assert_eq!(entry.group_title(), Some("UK | News"));
    }

    #[test]
    fn test_group_title_missing() {
        let entry = Entry::new(Line::new("#EXTINF:-1 tvg-id=\"a\",A"), None);
        assert_eq!(entry.group_title(), None);
    }

    #[test]
    fn test_group_title_empty_value() {
        let entry = Entry::new(Line::new("#EXTINF:-1 group-title=\"\",A"), None);
        assert_eq!(entry.group_title(), Some(""));
    }
}
