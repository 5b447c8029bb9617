use std::{
    cmp::Reverse,
    fs, io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use log::{debug, warn};
use regex::Regex;

/// File-name glob supporting `*` and `?`
#[derive(Debug, Clone)]
pub struct FilePattern {
    regex: Regex,
}

impl FilePattern {
    pub fn new(pattern: impl AsRef<str>) -> Result<Self, regex::Error> {
        let mut expr = String::from("^");
        for c in pattern.as_ref().chars() {
            match c {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                c => expr.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            }
        }
        expr.push('$');

        Ok(Self {
            regex: Regex::new(&expr)?,
        })
    }

    pub fn is_match(&self, file_name: impl AsRef<str>) -> bool {
        self.regex.is_match(file_name.as_ref())
    }
}

/// Keeps the `keep` most recently modified files matching a pattern
#[derive(Debug, Clone)]
pub struct Retention {
    directory: PathBuf,
    pattern: FilePattern,
    keep: usize,
}

impl Retention {
    pub fn new(
        directory: impl Into<PathBuf>,
        pattern: impl AsRef<str>,
        keep: usize,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            directory: directory.into(),
            pattern: FilePattern::new(pattern)?,
            keep,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Matching files, most recently modified first. A missing directory has no matches.
    pub fn newest_first(&self) -> io::Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.directory) {
            Ok(v) => v,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let matched = entry
                .file_name()
                .to_str()
                .is_some_and(|x| self.pattern.is_match(x));
            if !matched {
                continue;
            }

            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            files.push((modified, entry.path()));
        }

        files.sort_by_key(|x| Reverse(x.0));
        Ok(files.into_iter().map(|x| x.1).collect())
    }

    /// Delete older matches, best-effort. Returns how many files were removed.
    pub fn prune(&self) -> usize {
        let files = match self.newest_first() {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to list {}: {}", self.directory.display(), e);
                return 0;
            }
        };

        let mut removed = 0;
        for path in files.into_iter().skip(self.keep) {
            match fs::remove_file(&path) {
                Ok(_) => {
                    debug!("Removed old file {}", path.display());
                    removed += 1;
                }
                Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
            }
        }

        removed
    }
}
