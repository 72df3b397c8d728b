//! Encrypt request target resolution.
//!
//! Upload tools append the filename to the request path, so a path suffix may
//! be `""`, `"<duration>"`, `"<filename>"` or `"<duration>/<filename>"`. This
//! splits it into an explicit duration and filename before the vault sees it.

use crate::duration::{resolve_duration, DEFAULT_DURATION};

/// Filename used when the request names none.
pub const DEFAULT_FILENAME: &str = "file";

/// The duration and filename an encrypt request asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptTarget {
    /// Lowercased duration token.
    pub duration: String,
    pub filename: String,
}

impl EncryptTarget {
    /// Resolve a path suffix plus an optional filename header.
    ///
    /// - empty suffix: default duration, header filename or [`DEFAULT_FILENAME`]
    /// - first segment is a known duration: that duration, then the rest of
    ///   the path, the header, or the default as filename
    /// - otherwise: default duration, header filename or the first segment
    pub fn resolve(path: &str, header_filename: Option<&str>) -> Self {
        let header = header_filename.filter(|name| !name.is_empty());
        let trimmed = path.trim_matches('/');

        if trimmed.is_empty() {
            return Self::new(DEFAULT_DURATION, header.unwrap_or(DEFAULT_FILENAME));
        }

        let (first, rest) = match trimmed.split_once('/') {
            Some((first, rest)) => (first, Some(rest)),
            None => (trimmed, None),
        };

        let lowered = first.to_ascii_lowercase();
        if resolve_duration(&lowered).is_some() {
            let filename = rest.or(header).unwrap_or(DEFAULT_FILENAME);
            Self::new(&lowered, filename)
        } else {
            Self::new(DEFAULT_DURATION, header.unwrap_or(first))
        }
    }

    fn new(duration: &str, filename: &str) -> Self {
        let filename = if filename.is_empty() {
            DEFAULT_FILENAME
        } else {
            filename
        };
        Self {
            duration: duration.to_string(),
            filename: filename.to_string(),
        }
    }
}
