mod entry;
mod line;
pub use entry::*;
pub use line::*;

pub mod directives {
    pub const EXTM3U: &str = "#EXTM3U";
    /// Header emitted when the source document does not carry one
    pub const EXTM3U_LINE: &str = "#EXTM3U\n";
    pub const EXTINF: &str = "#EXTINF:";
}
