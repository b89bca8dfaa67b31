//! Live and rotated log sources.
mod reader;
mod task;


pub use reader::{
    DEFAULT_ARCHIVE_EXT, LogLines, archive_path, read_archive_lines, read_live_lines,
};
pub use task::{LogSource, SourceKind, scan_lines, scan_source};
