use log::debug;
use thiserror::Error;

/// The one validation failure an analysis can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invalid or empty input: enter at least one positive frame number")]
    Empty,
}

/// Largest frame number accepted unless configured otherwise.
pub const DEFAULT_MAX_FRAME: u64 = 1_000_000;

/// Parse a comma separated list of frame numbers.
///
/// Tokens are trimmed and read by their leading integer, so `"12abc"` gives 12
/// and `"3.7"` gives 3. Tokens without a leading integer, zero, negative
/// numbers and values above [`DEFAULT_MAX_FRAME`] are dropped without being
/// reported. Input order and duplicates are kept.
///
/// # Example
///
/// ```
/// use framegap::parse_frame_list;
///
/// let frames = parse_frame_list(" 1, 2,x, 5 ,-3,0").unwrap();
/// assert_eq!(frames, vec![1, 2, 5]);
/// assert!(parse_frame_list("a, b, 0").is_err());
/// ```
pub fn parse_frame_list(text: &str) -> Result<Vec<u64>, InputError> {
    parse_frame_list_within(text, DEFAULT_MAX_FRAME)
}

/// Like [`parse_frame_list`], dropping frames above `max_frame`.
///
/// Scans cost O(max frame), so the ceiling bounds the work one input can
/// cause.
pub fn parse_frame_list_within(text: &str, max_frame: u64) -> Result<Vec<u64>, InputError> {
    let mut dropped = 0usize;
    let frames: Vec<u64> = text
        .split(',')
        .filter_map(|token| {
            let frame = parse_token(token).filter(|&n| n <= max_frame);
            if frame.is_none() {
                dropped += 1;
            }
            frame
        })
        .collect();

    if dropped > 0 {
        debug!("dropped {} unusable token(s) from frame input", dropped);
    }
    if frames.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(frames)
}

/// Read one token as a positive frame number.
pub fn parse_token(token: &str) -> Option<u64> {
    let token = token.trim();
    let (negative, rest) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() || negative {
        return None;
    }
    digits.parse::<u64>().ok().filter(|&n| n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_list() {
        assert_eq!(parse_frame_list("1,2,3,5,6").unwrap(), vec![1, 2, 3, 5, 6]);
    }

    #[test]
    fn keeps_order_and_duplicates() {
        assert_eq!(parse_frame_list("9, 3, 3, 1").unwrap(), vec![9, 3, 3, 1]);
    }

    #[test]
    fn reads_leading_integer() {
        assert_eq!(parse_token("12abc"), Some(12));
        assert_eq!(parse_token("3.7"), Some(3));
        assert_eq!(parse_token(" +8 "), Some(8));
        assert_eq!(parse_token("4 5"), Some(4));
    }

    #[test]
    fn rejects_non_positive_and_garbage() {
        assert_eq!(parse_token("0"), None);
        assert_eq!(parse_token("-4"), None);
        assert_eq!(parse_token("abc"), None);
        assert_eq!(parse_token(""), None);
        assert_eq!(parse_token("+"), None);
        assert_eq!(parse_token("99999999999999999999999"), None);
    }

    #[test]
    fn drops_frames_above_ceiling() {
        assert_eq!(parse_frame_list_within("1, 10, 11, 50", 10).unwrap(), vec![1, 10]);
        assert_eq!(
            parse_frame_list("1, 18446744073709551615").unwrap(),
            vec![1]
        );
        assert_eq!(
            parse_frame_list_within("11, 12", 10),
            Err(InputError::Empty)
        );
    }

    #[test]
    fn empty_after_filtering_is_an_error() {
        assert_eq!(parse_frame_list(""), Err(InputError::Empty));
        assert_eq!(parse_frame_list(" , ,"), Err(InputError::Empty));
        assert_eq!(parse_frame_list("zero,-1,0"), Err(InputError::Empty));
    }
}
