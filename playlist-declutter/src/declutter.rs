use std::borrow::Cow;

use crate::{
    GroupBlacklist, PathRewrite, RewriteOutcome,
    cursor::LineCursor,
    format::{Entry, Line, directives, split_lines},
};

/// Counters collected during one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeclutterStats {
    pub kept: usize,
    pub blacklisted: usize,
    /// Directives at the end of the document with no locator
    pub dangling: usize,
    pub rewritten: usize,
    /// Locators left untouched although a rewrite was configured
    pub not_rewritten: usize,
    pub passthrough: usize,
    pub blank: usize,
}

/// Output lines of one pass, each one carrying its own terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decluttered<'a> {
    pub lines: Vec<Cow<'a, str>>,
    pub stats: DeclutterStats,
}

/// Filters entries by group-title and rewrites stream locators
#[derive(Debug, Clone, Default)]
pub struct Declutter {
    blacklist: GroupBlacklist,
    rewrite: Option<PathRewrite>,
}

impl Declutter {
    pub fn new(blacklist: GroupBlacklist) -> Self {
        Self {
            blacklist,
            rewrite: None,
        }
    }

    /// A rewrite with an empty token counts as no rewrite.
    pub fn with_rewrite(mut self, rewrite: Option<PathRewrite>) -> Self {
        self.rewrite = rewrite.filter(|x| x.is_complete());
        self
    }

    pub fn blacklist(&self) -> &GroupBlacklist {
        &self.blacklist
    }

    pub fn rewrite(&self) -> Option<&PathRewrite> {
        self.rewrite.as_ref()
    }

    pub fn process<'a>(&self, input: &'a str) -> Decluttered<'a> {
        self.process_lines(&split_lines(input))
    }

    pub fn process_lines<'a>(&self, lines: &[Line<'a>]) -> Decluttered<'a> {
        let mut output = Vec::with_capacity(lines.len() + 1);
        let mut stats = DeclutterStats::default();
        let mut cursor = LineCursor::new(lines);

        // header
        match cursor.peek() {
            Some(first) if first.is_header() => {
                output.push(Cow::Borrowed(first.raw()));
                cursor.advance(1);
            }
            _ => output.push(Cow::Borrowed(directives::EXTM3U_LINE)),
        }

        while let Some(line) = cursor.peek() {
            if !line.is_directive() {
                if line.is_blank() {
                    stats.blank += 1;
                } else {
                    output.push(Cow::Borrowed(line.raw()));
                    stats.passthrough += 1;
                }
                cursor.advance(1);
                continue;
            }

            let entry = Entry::new(line, cursor.peek_at(1));
            let Some(locator) = entry.locator else {
                stats.dangling += 1;
                cursor.advance(1);
                continue;
            };

            if entry
                .group_title()
                .is_some_and(|x| self.blacklist.is_blocked(x))
            {
                stats.blacklisted += 1;
            } else {
                output.push(Cow::Borrowed(entry.directive.raw()));
                output.push(self.rewrite_locator(&locator, &mut stats));
                stats.kept += 1;
            }
            cursor.advance(2);
        }

        Decluttered {
            lines: output,
            stats,
        }
    }

    fn rewrite_locator<'a>(&self, locator: &Line<'a>, stats: &mut DeclutterStats) -> Cow<'a, str> {
        let Some(rewrite) = &self.rewrite else {
            return Cow::Borrowed(locator.raw());
        };

        match rewrite.apply(locator) {
            RewriteOutcome::Rewritten(x) => {
                stats.rewritten += 1;
                Cow::Owned(x)
            }
            RewriteOutcome::Unchanged => {
                stats.not_rewritten += 1;
                Cow::Borrowed(locator.raw())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Declutter, GroupBlacklist, PathRewrite, format::split_lines};

    const PLAYLIST: &str = "#EXTM3U\r\n\
#EXTINF:-1 tvg-id=\"bbc\" group-title=\"UK | News\",BBC One\r\n\
http://host.example/live/OLD1/OLD2/101.ts\r\n\
\r\n\
#EXTINF:-1 group-title=\"Sports FR\",Canal\r\n\
http://host.example/live/OLD1/OLD2/102.ts\r\n\
#EXTVLCOPT:http-user-agent=VLC\r\n\
#EXTINF:-1 group-title=\"Cinema\",Film\r\n\
http://host.example/vod/movie.ts\r\n\
   \n\
#EXTINF:-1,No group\n\
http://host.example/live/OLD1/OLD2/103.ts\n\
#EXTINF:-1 group-title=\"UK\",Dangling";

    fn declutter() -> Declutter {
        Declutter::default().with_rewrite(Some(PathRewrite::new("NEW1", "NEW2")))
    }

    fn directives_of(text: &str) -> Vec<String> {
        split_lines(text)
            .iter()
            .filter(|x| x.is_directive())
            .map(|x| x.content().to_owned())
            .collect()
    }

    #[test]
    fn test_full_document() {
        let result = declutter().process(PLAYLIST);
        let expected = "#EXTM3U\r\n\
#EXTINF:-1 tvg-id=\"bbc\" group-title=\"UK | News\",BBC One\r\n\
http://host.example/live/NEW1/NEW2/101.ts\r\n\
#EXTVLCOPT:http-user-agent=VLC\r\n\
#EXTINF:-1 group-title=\"Cinema\",Film\r\n\
http://host.example/vod/movie.ts\r\n\
#EXTINF:-1,No group\n\
http://host.example/live/NEW1/NEW2/103.ts\n";

        assert_eq!(result.to_string(), expected);
        assert_eq!(result.stats.kept, 3);
        assert_eq!(result.stats.blacklisted, 1);
        assert_eq!(result.stats.dangling, 1);
        assert_eq!(result.stats.rewritten, 2);
        assert_eq!(result.stats.not_rewritten, 1);
        assert_eq!(result.stats.passthrough, 1);
        assert_eq!(result.stats.blank, 2);
    }

    #[test]
    fn test_header_inserted() {
        let result = Declutter::default().process("#EXTINF:-1,A\nhttp://a/1.ts\n");
        assert_eq!(result.lines[0], "#EXTM3U\n");
        assert_eq!(result.to_string(), "#EXTM3U\n#EXTINF:-1,A\nhttp://a/1.ts\n");

        let result = Declutter::default().process("");
        assert_eq!(result.to_string(), "#EXTM3U\n");
    }

    #[test]
    fn test_header_reused_verbatim() {
        let result = Declutter::default().process("  #extM3u \r\n#EXTINF:-1,A\nhttp://a\n");
        assert_eq!(result.lines[0], "  #extM3u \r\n");
        assert_eq!(result.lines.len(), 3);
    }

    #[test]
    fn test_header_with_attributes_not_recognized() {
        let result = Declutter::default().process("#EXTM3U url-tvg=\"x\"\n#EXTINF:-1,A\nhttp://a\n");
        assert_eq!(
            result.to_string(),
            "#EXTM3U\n#EXTM3U url-tvg=\"x\"\n#EXTINF:-1,A\nhttp://a\n"
        );
    }

    #[test]
    fn test_first_line_kept_as_body() {
        let result = Declutter::default().process("# generated\n#EXTINF:-1,A\nhttp://a\n");
        assert_eq!(result.to_string(), "#EXTM3U\n# generated\n#EXTINF:-1,A\nhttp://a\n");
    }

    #[test]
    fn test_blacklisted_entry_dropped() {
        let input = "#EXTM3U\n#EXTINF:-1 GROUP-TITLE=\"Sports FR\",A\nhttp://a\n#EXTINF:-1,B\nhttp://b\n";
        let result = Declutter::default().process(input);
        assert_eq!(result.to_string(), "#EXTM3U\n#EXTINF:-1,B\nhttp://b\n");
    }

    #[test]
    fn test_custom_blacklist() {
        let input = "#EXTM3U\n#EXTINF:-1 group-title=\"Sports FR\",A\nhttp://a\n#EXTINF:-1 group-title=\"Kids\",B\nhttp://b\n";
        let result = Declutter::new(GroupBlacklist::new(["kid"])).process(input);
        assert_eq!(
            result.to_string(),
            "#EXTM3U\n#EXTINF:-1 group-title=\"Sports FR\",A\nhttp://a\n"
        );
    }

    #[test]
    fn test_locator_paired_blindly() {
        // the line after a directive is always its locator, even if it looks like something else
        let input = "#EXTM3U\n#EXTINF:-1,A\n#EXTINF:-1,B\nhttp://b\n";
        let result = Declutter::default().process(input);
        assert_eq!(result.to_string(), "#EXTM3U\n#EXTINF:-1,A\n#EXTINF:-1,B\nhttp://b\n");
        assert_eq!(result.stats.kept, 1);
        assert_eq!(result.stats.passthrough, 1);
    }

    #[test]
    fn test_no_rewrite_without_tokens() {
        let input = "#EXTM3U\n#EXTINF:-1,A\nhttp://h/live/a/b/1.ts\n";
        let result = Declutter::default().process(input);
        assert_eq!(result.to_string(), input);
        assert_eq!(result.stats.rewritten, 0);
        assert_eq!(result.stats.not_rewritten, 0);
    }

    #[test]
    fn test_idempotent() {
        let first = Declutter::default().process(PLAYLIST).to_string();
        let second = Declutter::default().process(&first).to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_order_preserved() {
        let output = declutter().process(PLAYLIST).to_string();
        let input_directives = directives_of(PLAYLIST);
        let output_directives = directives_of(&output);

        let mut remaining = input_directives.iter();
        for directive in output_directives.iter() {
            assert!(remaining.any(|x| x == directive));
        }
    }

    #[test]
    fn test_pairing_integrity() {
        let output = declutter().process(PLAYLIST).to_string();
        let lines = split_lines(&output);
        for (index, line) in lines.iter().enumerate() {
            if line.is_directive() {
                let locator = lines.get(index + 1).unwrap();
                assert!(!locator.is_directive());
                assert!(locator.content().starts_with("http://"));
            }
        }
    }

    #[test]
    fn test_empty_rewrite_tokens() {
        let input = "#EXTM3U\n#EXTINF:-1,A\nhttp://h/live/u/p/1.ts\n";
        let declutter = Declutter::default().with_rewrite(Some(PathRewrite::new("", "")));
        assert!(declutter.rewrite().is_none());
        assert_eq!(declutter.process(input).to_string(), input);

        let declutter = Declutter::default().with_rewrite(Some(PathRewrite::new("NEW1", "")));
        assert!(declutter.rewrite().is_none());
        assert_eq!(declutter.process(input).to_string(), input);
    }
}
