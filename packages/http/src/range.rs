//! `Range: bytes=...` header parsing.

/// An inclusive byte range within a file of known size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Value for the `Content-Range` header.
    pub fn content_range(&self, size: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, size)
    }
}

/// Why a `Range` header could not be honoured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeError {
    /// The header is syntactically invalid.
    Invalid,
    /// Every requested range lies outside the file.
    Unsatisfiable,
}

/// Parse a `Range` header against a file of `size` bytes.
///
/// Ranges that start past the end of the file are dropped; if that leaves
/// nothing, the result is [`RangeError::Unsatisfiable`]. An end past the
/// file is clamped. An empty list means the header named no ranges at all
/// and the whole file should be served.
pub fn parse_range(header: &str, size: u64) -> Result<Vec<ByteRange>, RangeError> {
    let spec = header
        .trim()
        .strip_prefix("bytes=")
        .ok_or(RangeError::Invalid)?;

    let mut ranges = Vec::new();
    let mut dropped = false;

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (start, end) = part.split_once('-').ok_or(RangeError::Invalid)?;
        let (start, end) = (start.trim(), end.trim());

        let range = if start.is_empty() {
            // Suffix form: the last `end` bytes.
            let suffix: u64 = parse_number(end)?;
            if suffix == 0 || size == 0 {
                dropped = true;
                continue;
            }
            let suffix = suffix.min(size);
            ByteRange {
                start: size - suffix,
                end: size - 1,
            }
        } else {
            let first = parse_number(start)?;
            if first >= size {
                dropped = true;
                continue;
            }
            let last = if end.is_empty() {
                size - 1
            } else {
                let last = parse_number(end)?;
                if first > last {
                    return Err(RangeError::Invalid);
                }
                last.min(size - 1)
            };
            ByteRange {
                start: first,
                end: last,
            }
        };
        ranges.push(range);
    }

    if ranges.is_empty() && dropped {
        return Err(RangeError::Unsatisfiable);
    }
    Ok(ranges)
}

fn parse_number(s: &str) -> Result<u64, RangeError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RangeError::Invalid);
    }
    s.parse().map_err(|_| RangeError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(start: u64, end: u64) -> Vec<ByteRange> {
        vec![ByteRange { start, end }]
    }

    #[test]
    fn closed_range() {
        assert_eq!(parse_range("bytes=0-4", 10), Ok(single(0, 4)));
        assert_eq!(parse_range("bytes= 2 - 3 ", 10), Ok(single(2, 3)));
    }

    #[test]
    fn open_ended_range() {
        assert_eq!(parse_range("bytes=7-", 10), Ok(single(7, 9)));
    }

    #[test]
    fn suffix_range() {
        assert_eq!(parse_range("bytes=-3", 10), Ok(single(7, 9)));
        assert_eq!(parse_range("bytes=-30", 10), Ok(single(0, 9)));
    }

    #[test]
    fn end_is_clamped() {
        assert_eq!(parse_range("bytes=5-100", 10), Ok(single(5, 9)));
    }

    #[test]
    fn multiple_ranges() {
        let ranges = parse_range("bytes=0-1, 4-5", 10).unwrap();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[1], ByteRange { start: 4, end: 5 });
    }

    #[test]
    fn start_past_end_is_unsatisfiable() {
        assert_eq!(parse_range("bytes=10-", 10), Err(RangeError::Unsatisfiable));
        assert_eq!(parse_range("bytes=0-", 0), Err(RangeError::Unsatisfiable));
        assert_eq!(parse_range("bytes=-0", 10), Err(RangeError::Unsatisfiable));
    }

    #[test]
    fn partially_satisfiable_keeps_valid_ranges() {
        assert_eq!(parse_range("bytes=20-30,0-1", 10), Ok(single(0, 1)));
    }

    #[test]
    fn invalid_headers() {
        assert_eq!(parse_range("items=0-1", 10), Err(RangeError::Invalid));
        assert_eq!(parse_range("bytes=5-1", 10), Err(RangeError::Invalid));
        assert_eq!(parse_range("bytes=abc", 10), Err(RangeError::Invalid));
        assert_eq!(parse_range("bytes=--1", 10), Err(RangeError::Invalid));
        assert_eq!(parse_range("bytes=+1-2", 10), Err(RangeError::Invalid));
    }

    #[test]
    fn empty_range_list_means_whole_file() {
        assert_eq!(parse_range("bytes=", 10), Ok(vec![]));
    }

    #[test]
    fn content_range_header() {
        let r = ByteRange { start: 0, end: 4 };
        assert_eq!(r.len(), 5);
        assert_eq!(r.content_range(10), "bytes 0-4/10");
    }
}
