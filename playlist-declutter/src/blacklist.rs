/// Group-title fragments filtered out unless configured otherwise
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "FR", "DE", "IR", "BN", "AR", "TN", "TL", "KL", "GR", "NL", "ML", "EX", "PL", "LA", "SE",
    "KANNADA", "TELUGU", "TELEGU", "ES",
];

/// Case-insensitive substring blacklist for `group-title` values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBlacklist {
    patterns: Vec<String>,
}

impl GroupBlacklist {
    /// Empty patterns are ignored, they would match every group
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|x| x.as_ref().to_lowercase())
                .filter(|x| !x.is_empty())
                .collect(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_blocked(&self, group_title: impl AsRef<str>) -> bool {
        let group_title = group_title.as_ref().to_lowercase();
        self.patterns.iter().any(|x| group_title.contains(x.as_str()))
    }
}

impl Default for GroupBlacklist {
    fn default() -> Self {
        Self::new(DEFAULT_BLACKLIST)
    }
}

#[cfg(test)]
mod tests {
    use crate::GroupBlacklist;

    #[test]
    fn test_default_blacklist() {
        let blacklist = GroupBlacklist::default();
        assert!(blacklist.is_blocked("Sports FR"));
        assert!(blacklist.is_blocked("telugu movies"));
        assert!(!blacklist.is_blocked("UK | News"));
    }

    #[test]
    fn test_substring_match() {
        // matches inside words as well
        let blacklist = GroupBlacklist::new(["es"]);
        assert!(blacklist.is_blocked("SERIES"));
        assert!(!blacklist.is_blocked("Sport"));
    }

    #[test]
    fn test_empty_patterns() {
        let blacklist = GroupBlacklist::new(["", "xx"]);
        assert_eq!(blacklist.patterns(), ["xx"]);
        assert!(!blacklist.is_blocked("anything"));
        assert!(!GroupBlacklist::new(Vec::<&str>::new()).is_blocked("FR"));
    }
}
