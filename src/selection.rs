//! Parsing of textual selections like `1 3 5`, `1-3,7` or `all` into indices.

use std::collections::BTreeSet;
use thiserror::Error;

/// Reasons a selection is rejected. Any of them rejects the whole input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Nothing selected")]
    Empty,

    #[error("Not a number or range: '{0}'")]
    Malformed(String),

    #[error("{value} is outside 1-{max}")]
    OutOfRange { value: usize, max: usize },

    #[error("Range {start}-{end} is reversed")]
    InvertedRange { start: usize, end: usize },
}

/// Parse `input` into ascending, de-duplicated 1-based indices, each at most `max_index`.
///
/// Tokens are separated by whitespace or commas. `all` (any case) selects
/// `1..=max_index`, `A-B` selects an inclusive range and `N` a single index.
pub fn parse_selection(input: &str, max_index: usize) -> Result<Vec<usize>, SelectionError> {
    let mut indices = BTreeSet::new();

    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if token.eq_ignore_ascii_case("all") {
            indices.extend(1..=max_index);
            continue;
        }

        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_index(token, start, max_index)?;
                let end = parse_index(token, end, max_index)?;
                if start > end {
                    return Err(SelectionError::InvertedRange { start, end });
                }
                indices.extend(start..=end);
            }
            None => {
                indices.insert(parse_index(token, token, max_index)?);
            }
        }
    }

    if indices.is_empty() {
        return Err(SelectionError::Empty);
    }

    Ok(indices.into_iter().collect())
}

fn parse_index(token: &str, digits: &str, max_index: usize) -> Result<usize, SelectionError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SelectionError::Malformed(token.to_string()));
    }
    match digits.parse::<usize>() {
        Ok(value) if (1..=max_index).contains(&value) => Ok(value),
        Ok(value) => Err(SelectionError::OutOfRange {
            value,
            max: max_index,
        }),
        // Too many digits for usize is out of range for any list.
        Err(_) => Err(SelectionError::OutOfRange {
            value: usize::MAX,
            max: max_index,
        }),
    }
}
