use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::error::SourceError;

/// Extension of the rotated archive when none is configured.
pub const DEFAULT_ARCHIVE_EXT: &str = "gz";
/// Read buffer for log files; rotated access logs are large and sequential.
const READ_BUFFER_BYTES: usize = 64 * 1024;

/// Lazily read lines of one log source.
///
/// Lines are split on `\n`, a trailing `\r` is dropped and invalid UTF-8 is
/// replaced. The first read error ends the sequence.
pub struct LogLines {
    path: PathBuf,
    reader: Option<Box<dyn BufRead + Send>>,
    compressed: bool,
    buffer: Vec<u8>,
}

impl LogLines {
    fn new(path: PathBuf, reader: Box<dyn BufRead + Send>, compressed: bool) -> Self {
        Self {
            path,
            reader: Some(reader),
            compressed,
            buffer: Vec::new(),
        }
    }

    /// A source that exists in name only, e.g. an archive not rotated yet.
    #[must_use]
    pub const fn empty(path: PathBuf) -> Self {
        Self {
            path,
            reader: None,
            compressed: false,
            buffer: Vec::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for LogLines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogLines")
            .field("path", &self.path)
            .field("open", &self.reader.is_some())
            .field("compressed", &self.compressed)
            .finish()
    }
}

impl Iterator for LogLines {
    type Item = Result<String, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        self.buffer.clear();
        match reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => {
                self.reader = None;
                None
            }
            Ok(_) => {
                let line = self.buffer.strip_suffix(b"\n").unwrap_or(&self.buffer);
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                Some(Ok(String::from_utf8_lossy(line).into_owned()))
            }
            Err(err) => {
                self.reader = None;
                let path = self.path.clone();
                Some(Err(if self.compressed {
                    SourceError::Decompress { path, source: err }
                } else {
                    SourceError::Read { path, source: err }
                }))
            }
        }
    }
}

/// Opens the live log file.
///
/// # Errors
///
/// Returns an error when the file cannot be opened.
pub fn read_live_lines(path: &Path) -> Result<LogLines, SourceError> {
    let file = File::open(path).map_err(|err| SourceError::Open {
        path: path.to_path_buf(),
        source: err,
    })?;
    Ok(LogLines::new(
        path.to_path_buf(),
        Box::new(BufReader::with_capacity(READ_BUFFER_BYTES, file)),
        false,
    ))
}

/// Opens the same-day rotated archive `{path}-{day_stamp}.{ext}`.
///
/// A missing archive is not an error and yields no lines. Gzip archives are
/// decompressed on the fly; any other extension is read as plain text.
///
/// # Errors
///
/// Returns an error when the archive exists but cannot be opened.
pub fn read_archive_lines(
    path: &Path,
    day_stamp: &str,
    ext: &str,
) -> Result<LogLines, SourceError> {
    let archive = archive_path(path, day_stamp, ext);
    let file = match File::open(&archive) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!("No rotated archive at {}", archive.display());
            return Ok(LogLines::empty(archive));
        }
        Err(err) => {
            return Err(SourceError::Open {
                path: archive,
                source: err,
            });
        }
    };
    let buffered = BufReader::with_capacity(READ_BUFFER_BYTES, file);
    if is_gzip_ext(ext) {
        Ok(LogLines::new(
            archive,
            Box::new(BufReader::new(MultiGzDecoder::new(buffered))),
            true,
        ))
    } else {
        Ok(LogLines::new(archive, Box::new(buffered), false))
    }
}

/// Path of the archive rotated out of `path` on `day_stamp`.
#[must_use]
pub fn archive_path(path: &Path, day_stamp: &str, ext: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(format!("-{}.{}", day_stamp, ext.trim_start_matches('.')));
    PathBuf::from(raw)
}

/// Gzip when the last dot-separated segment is `gz`, e.g. `gz` or `log.gz`.
fn is_gzip_ext(ext: &str) -> bool {
    ext.rsplit('.')
        .next()
        .is_some_and(|last| last.eq_ignore_ascii_case(DEFAULT_ARCHIVE_EXT))
}
