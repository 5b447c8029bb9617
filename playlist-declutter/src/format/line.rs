use crate::format::directives;

/// Line ending found on a raw playlist line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    CrLf,
    Lf,
    None,
}

impl Terminator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
            Self::None => "",
        }
    }
}

/// A raw line borrowed from the source document, terminator included.
///
/// `raw()` always reproduces the source bytes, so lines that are copied
/// through never need to be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    raw: &'a str,
    terminator: Terminator,
}

impl<'a> Line<'a> {
    pub fn new(raw: &'a str) -> Self {
        let terminator = if raw.ends_with("\r\n") {
            Terminator::CrLf
        } else if raw.ends_with('\n') {
            Terminator::Lf
        } else {
            Terminator::None
        };

        Self { raw, terminator }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Text without the terminator
    pub fn content(&self) -> &'a str {
        &self.raw[..self.raw.len() - self.terminator.as_str().len()]
    }

    pub fn terminator(&self) -> Terminator {
        self.terminator
    }

    pub fn trimmed(&self) -> &'a str {
        self.raw.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    pub fn is_header(&self) -> bool {
        self.trimmed().to_uppercase() == directives::EXTM3U
    }

    pub fn is_directive(&self) -> bool {
        self.raw.trim_start().starts_with(directives::EXTINF)
    }
}

/// Split a document into lines on `\n`, keeping every terminator.
pub fn split_lines(input: &str) -> Vec<Line<'_>> {
    input.split_inclusive('\n').map(Line::new).collect()
}
