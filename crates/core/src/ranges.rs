//! Unicode range specifications such as `U+0020-007F,U+00A0-00FF`.

use std::{
    collections::BTreeSet,
    fmt,
    result,
    str::FromStr,
};

/// Largest Unicode code point.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// Error raised for a malformed range token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("empty token at position {0}")]
    EmptyToken(usize),

    #[error("invalid hexadecimal code point in {token:?}")]
    InvalidHex { token: String },

    #[error("code point U+{value:X} in {token:?} is above U+10FFFF")]
    OutOfRange { token: String, value: u32 },

    #[error("reversed range {token:?}: start is greater than end")]
    Reversed { token: String },
}

pub type Result<T> = result::Result<T, RangeError>;

/// One comma-separated token of a range specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeToken {
    Single(u32),
    Interval { start: u32, end: u32 },
}

impl RangeToken {
    /// Inclusive bounds covered by the token.
    pub fn bounds(&self) -> (u32, u32) {
        match *self {
            RangeToken::Single(cp) => (cp, cp),
            RangeToken::Interval { start, end } => (start, end),
        }
    }

    fn parse(token: &str) -> Result<Self> {
        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_codepoint(start, token)?;
                let end = parse_codepoint(end, token)?;
                if start > end {
                    return Err(RangeError::Reversed { token: token.to_string() });
                }
                Ok(RangeToken::Interval { start, end })
            }
            None => parse_codepoint(token, token).map(RangeToken::Single),
        }
    }
}

impl fmt::Display for RangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeToken::Single(cp) => write!(f, "U+{cp:04X}"),
            RangeToken::Interval { start, end } => write!(f, "U+{start:04X}-{end:04X}"),
        }
    }
}

fn parse_codepoint(text: &str, token: &str) -> Result<u32> {
    let text = text.trim();
    let digits = match text.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("U+") => &text[2..],
        _ => text,
    };
    // from_str_radix accepts a leading '+', which is not valid here
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(RangeError::InvalidHex { token: token.to_string() });
    }
    let value = u32::from_str_radix(digits, 16)
        .map_err(|_| RangeError::InvalidHex { token: token.to_string() })?;
    if value > MAX_CODEPOINT {
        return Err(RangeError::OutOfRange { token: token.to_string(), value });
    }
    Ok(value)
}

/// An ordered list of range tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSpec {
    tokens: Vec<RangeToken>,
}

impl RangeSpec {
    /// Expands every token into the union of their code points.
    pub fn codepoints(&self) -> CodePointSet {
        self.tokens
            .iter()
            .flat_map(|token| {
                let (start, end) = token.bounds();
                start..=end
            })
            .collect()
    }
}

impl FromStr for RangeSpec {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self> {
        let tokens = s
            .split(',')
            .map(str::trim)
            .enumerate()
            .map(|(i, token)| {
                if token.is_empty() {
                    Err(RangeError::EmptyToken(i))
                } else {
                    RangeToken::parse(token)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tokens })
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// A set of Unicode code points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodePointSet(BTreeSet<u32>);

impl CodePointSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.0.contains(&codepoint)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u32> for CodePointSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parses a range specification and expands it into a code point set.
pub fn parse_ranges(spec: &str) -> Result<CodePointSet> {
    Ok(spec.parse::<RangeSpec>()?.codepoints())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLAYFAIR_RANGES;

    #[test]
    fn test_single_codepoint() {
        let set = parse_ranges("U+0041").unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0x41]);
    }

    #[test]
    fn test_interval() {
        let set = parse_ranges("U+0041-0043").unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0x41, 0x42, 0x43]);
    }

    #[test]
    fn test_two_disjoint_intervals() {
        let set = parse_ranges("U+0020-007F,U+00A0-00FF").unwrap();
        assert_eq!(set.len(), 192);
        assert!(set.contains(0x20));
        assert!(set.contains(0x7F));
        assert!(!set.contains(0x80));
        assert!(!set.contains(0x9F));
        assert!(set.contains(0xA0));
        assert!(set.contains(0xFF));
    }

    #[test]
    fn test_overlapping_tokens_are_unioned() {
        let set = parse_ranges("U+0041-0045,U+0043,U+0044-0046").unwrap();
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_playfair_ranges() {
        let set = parse_ranges(PLAYFAIR_RANGES).unwrap();
        assert_eq!(set.len(), 0x60 + 0x60 + 0x80 + 0xD0 + 0x100);
        assert!(set.contains(u32::from('é')));
        assert!(set.contains(u32::from('ẞ')));
        assert!(!set.contains(u32::from('€')));
    }

    #[test]
    fn test_prefix_variants() {
        assert_eq!(parse_ranges("u+41").unwrap(), parse_ranges("U+0041").unwrap());
        assert_eq!(parse_ranges("41-43").unwrap(), parse_ranges("U+0041-U+0043").unwrap());
        assert_eq!(parse_ranges(" U+0041 , U+0042 ").unwrap().len(), 2);
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(parse_ranges("U+0041,,U+0042"), Err(RangeError::EmptyToken(1)));
        assert_eq!(parse_ranges(""), Err(RangeError::EmptyToken(0)));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(parse_ranges("U+00G1"), Err(RangeError::InvalidHex { .. })));
        assert!(matches!(parse_ranges("U+"), Err(RangeError::InvalidHex { .. })));
        assert!(matches!(parse_ranges("U+0041-"), Err(RangeError::InvalidHex { .. })));
        assert!(matches!(parse_ranges("U++41"), Err(RangeError::InvalidHex { .. })));
    }

    #[test]
    fn test_reversed_interval() {
        assert_eq!(
            parse_ranges("U+0043-0041"),
            Err(RangeError::Reversed { token: "U+0043-0041".to_string() })
        );
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            parse_ranges("U+110000"),
            Err(RangeError::OutOfRange { value: 0x110000, .. })
        ));
    }

    #[test]
    fn test_surrogates_are_accepted() {
        let set = parse_ranges("U+D7FF-E000").unwrap();
        assert_eq!(set.len(), 0x802);
    }

    #[test]
    fn test_display_round_trip() {
        let spec: RangeSpec = "u+41,U+a0-ff".parse().unwrap();
        assert_eq!(spec.to_string(), "U+0041,U+00A0-00FF");
        assert_eq!(spec.to_string().parse::<RangeSpec>().unwrap(), spec);
    }
}
