use mofdock::core::models::site::BondingSite;
use thiserror::Error;

/// Longest range a single `a-b` token may expand to.
pub const MAX_RANGE_LEN: usize = 100_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Bonding site '{0}' contains no atom indices.")]
    EmptySite(String),

    #[error("Invalid atom index '{token}' in bonding site '{site}'.")]
    InvalidIndex { token: String, site: String },

    #[error("Range '{token}' in bonding site '{site}' runs backwards.")]
    ReversedRange { token: String, site: String },

    #[error("Range '{token}' in bonding site '{site}' spans more than {MAX_RANGE_LEN} atoms.")]
    RangeTooLarge { token: String, site: String },
}

/// Parses a bonding site such as `0,2-4` into `[0, 2, 3, 4]`.
///
/// Tokens are comma separated; whitespace around them is ignored. A token
/// `a-b` expands to every index from `a` to `b` inclusive, up to
/// [`MAX_RANGE_LEN`] of them. Order and repeats are kept as written.
pub fn parse_site(s: &str) -> Result<BondingSite, ParseError> {
    let mut indices = Vec::new();
    for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let index = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| ParseError::InvalidIndex {
                    token: token.to_string(),
                    site: s.to_string(),
                })
        };
        match token.split_once('-') {
            Some((start, end)) => {
                let (start, end) = (index(start)?, index(end)?);
                if start > end {
                    return Err(ParseError::ReversedRange {
                        token: token.to_string(),
                        site: s.to_string(),
                    });
                }
                if end - start >= MAX_RANGE_LEN {
                    return Err(ParseError::RangeTooLarge {
                        token: token.to_string(),
                        site: s.to_string(),
                    });
                }
                indices.extend(start..=end);
            }
            None => indices.push(index(token)?),
        }
    }

    if indices.is_empty() {
        return Err(ParseError::EmptySite(s.to_string()));
    }
    Ok(BondingSite::new(indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_index() {
        assert_eq!(parse_site("7").unwrap().indices(), &[7]);
    }

    #[test]
    fn parses_lists_and_ranges_in_order() {
        let site = parse_site("5, 0,2-4").unwrap();
        assert_eq!(site.indices(), &[5, 0, 2, 3, 4]);
    }

    #[test]
    fn single_element_range_is_allowed() {
        assert_eq!(parse_site("3-3").unwrap().indices(), &[3]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(parse_site(" , "), Err(ParseError::EmptySite(" , ".to_string())));
    }

    #[test]
    fn negative_or_garbage_tokens_are_rejected() {
        for bad in ["a", "1,x", "-1", "1-", "1.5"] {
            assert!(
                matches!(parse_site(bad), Err(ParseError::InvalidIndex { .. })),
                "'{bad}' should not parse"
            );
        }
    }

    #[test]
    fn backwards_range_is_rejected() {
        assert_eq!(
            parse_site("0,4-1"),
            Err(ParseError::ReversedRange {
                token: "4-1".to_string(),
                site: "0,4-1".to_string()
            })
        );
    }

    #[test]
    fn oversized_range_is_rejected() {
        assert_eq!(
            parse_site("0-18446744073709551614"),
            Err(ParseError::RangeTooLarge {
                token: "0-18446744073709551614".to_string(),
                site: "0-18446744073709551614".to_string()
            })
        );
        assert!(matches!(
            parse_site(&format!("5-{}", 5 + MAX_RANGE_LEN)),
            Err(ParseError::RangeTooLarge { .. })
        ));
    }

    #[test]
    fn range_at_the_limit_is_allowed() {
        let site = parse_site(&format!("0-{}", MAX_RANGE_LEN - 1)).unwrap();
        assert_eq!(site.indices().len(), MAX_RANGE_LEN);
    }
}
