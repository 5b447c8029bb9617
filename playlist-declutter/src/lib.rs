//! # playlist-declutter
//! A library for filtering and rewriting IPTV m3u playlists
//!
//! # Example
//! ```rust
//! use playlist_declutter::{Declutter, GroupBlacklist, PathRewrite};
//!
//! let declutter = Declutter::new(GroupBlacklist::default())
//!     .with_rewrite(Some(PathRewrite::new("user", "pass")));
//!
//! let result = declutter.process(
//!     "#EXTM3U
//! #EXTINF:-1 group-title=\"Sports FR\",A
//! http://example.com/live/a/b/1.ts
//! #EXTINF:-1 group-title=\"UK\",B
//! http://example.com/live/a/b/2.ts
//! ",
//! );
//!
//! assert_eq!(result.stats.kept, 1);
//! assert_eq!(
//!     result.to_string(),
//!     "#EXTM3U\n#EXTINF:-1 group-title=\"UK\",B\nhttp://example.com/live/user/pass/2.ts\n"
//! );
//! ```

mod blacklist;
mod builder;
mod cursor;
mod declutter;
mod errors;
pub mod format;
mod persist;
mod rewrite;
pub use blacklist::*;
pub use cursor::*;
pub use declutter::*;
pub use errors::*;
pub use rewrite::*;
