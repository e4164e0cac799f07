//! HTTP Range request parsing module
//!
//! Single `bytes=start-end` ranges only. Parsing is split from resolution so
//! header syntax can be checked without knowing the file size.

/// Syntactic result of a `Range` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    /// First byte requested
    pub start: u64,
    /// Last byte requested, None means until end of file
    pub end: Option<u64>,
}

/// Validated inclusive byte window inside a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

/// Why a `Range` header was not turned into a [`ByteRange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// Not a single numeric `bytes=` range; callers ignore the header
    Malformed,
    /// `bytes=-N` form; the start offset is required
    MissingStart,
    /// Window outside `[0, file_size)` or reversed
    Unsatisfiable,
}

impl RangeError {
    /// Whether the error should produce a 416 rather than a full response
    pub const fn is_unsatisfiable(self) -> bool {
        matches!(self, Self::MissingStart | Self::Unsatisfiable)
    }
}

impl RangeSpec {
    /// Resolve against the file size, defaulting an open end to the last byte
    pub const fn resolve(self, file_size: u64) -> Result<ByteRange, RangeError> {
        if file_size == 0 {
            return Err(RangeError::Unsatisfiable);
        }
        let end = match self.end {
            Some(end) => end,
            None => file_size - 1,
        };
        if self.start > end || end >= file_size {
            return Err(RangeError::Unsatisfiable);
        }
        Ok(ByteRange {
            start: self.start,
            end,
        })
    }
}

impl ByteRange {
    /// Number of bytes in the window, never zero
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` header value
    pub fn content_range(&self, file_size: u64) -> String {
        format!("bytes {}-{}/{file_size}", self.start, self.end)
    }
}

/// Parse HTTP Range header (single range only, bytes unit)
///
/// Supported formats:
/// - `bytes=start-end` - Specific range
/// - `bytes=start-` - From start to end of file
///
/// # Examples
/// ```
/// use media_range_server::http::range::{parse_range_header, RangeError, RangeSpec};
///
/// assert_eq!(
///     parse_range_header("bytes=200-499"),
///     Ok(RangeSpec { start: 200, end: Some(499) })
/// );
/// assert_eq!(parse_range_header("bytes=-500"), Err(RangeError::MissingStart));
/// assert_eq!(parse_range_header("items=0-1"), Err(RangeError::Malformed));
/// ```
pub fn parse_range_header(header: &str) -> Result<RangeSpec, RangeError> {
    let Some(spec) = header.trim().strip_prefix("bytes=") else {
        return Err(RangeError::Malformed);
    };

    // Only support single range (not multi-range)
    if spec.contains(',') {
        return Err(RangeError::Malformed);
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return Err(RangeError::Malformed);
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        return if end_str.is_empty() || parse_offset(end_str).is_some() {
            Err(RangeError::MissingStart)
        } else {
            Err(RangeError::Malformed)
        };
    }

    let start = parse_offset(start_str).ok_or(RangeError::Malformed)?;
    let end = if end_str.is_empty() {
        None
    } else {
        Some(parse_offset(end_str).ok_or(RangeError::Malformed)?)
    };

    Ok(RangeSpec { start, end })
}

/// Digits only: `u64::from_str` would also take a leading `+`
fn parse_offset(s: &str) -> Option<u64> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}
