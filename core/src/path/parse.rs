//! Parsing the host path encoding
//!
//! The encoding is dotted field names with a two-token collection marker: a
//! literal `Array` token followed by `data[N]`. Anything else is a field
//! name. `items.Array.data[1].target` therefore parses to three segments,
//! not five.

use super::{PropertyPath, Segment};
use crate::error::{Error, Result};

/// Token introducing a collection element step
const COLLECTION_MARKER: &str = "Array";

/// Prefix of the marker's second token
const ELEMENT_PREFIX: &str = "data[";

impl PropertyPath {
    /// Parse a path from the host encoding
    ///
    /// Malformed input is [`Error::InvalidPath`] with the offending token in
    /// the reason; an empty path has no meaning and is rejected too.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::invalid_path(path, "empty path").into());
        }

        let mut segments = Vec::new();
        let mut tokens = path.split('.');
        while let Some(token) = tokens.next() {
            if token == COLLECTION_MARKER {
                let Some(element) = tokens.next() else {
                    return Err(Error::invalid_path(
                        path,
                        "collection marker at end of path, expected a data[N] token",
                    )
                    .into());
                };
                segments.push(Segment::Element(parse_element_index(path, element)?));
            } else {
                validate_field_token(path, token)?;
                segments.push(Segment::Field(token.to_string()));
            }
        }

        Ok(Self { segments })
    }
}

fn parse_element_index(path: &str, token: &str) -> Result<usize> {
    let digits = token
        .strip_prefix(ELEMENT_PREFIX)
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| Error::invalid_path(path, format!("malformed element token '{token}'")))?;
    digits
        .parse()
        .map_err(|_| Error::invalid_path(path, format!("non-numeric element index '{digits}'")))
        .map_err(Into::into)
}

fn validate_field_token(path: &str, token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(Error::invalid_path(path, "empty segment").into());
    }
    if token.contains('[') || token.contains(']') {
        return Err(Error::invalid_path(
            path,
            format!("unexpected index syntax in field name '{token}'"),
        )
        .into());
    }
    Ok(())
}
