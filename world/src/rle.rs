//! Run-length encoded level definitions.
//!
//! A definition is a list of row segments joined by `|` and terminated by
//! `.`. Inside a segment a run of decimal digits followed by one character
//! repeats that character, while any other character stands for itself.

use thiserror::Error;

use crate::grid::TileGrid;

const ROW_SEPARATOR: char = '|';
const LEVEL_TERMINATOR: char = '.';

/// Longest run a single `<digits><glyph>` pair may expand to.
pub const MAX_RUN_LENGTH: usize = 65_536;

/// Errors raised while decoding a single level definition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A digit run described more repetitions than [`MAX_RUN_LENGTH`].
    #[error("run length at byte {offset} of segment {segment:?} exceeds {MAX_RUN_LENGTH}")]
    RunLengthOverflow {
        /// Segment containing the oversized run.
        segment: String,
        /// Byte offset of the first digit of the run.
        offset: usize,
    },
    /// A decoded character does not belong to the cell alphabet.
    #[error("unknown glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Zero-based row of the character in the decoded grid.
        row: usize,
        /// Zero-based column of the character in the decoded grid.
        column: usize,
    },
}

/// Splits a definition into its raw row segments.
///
/// Splitting stops at the first terminator. A definition missing its
/// terminator keeps the trailing segment.
#[must_use]
pub fn split_rows(definition: &str) -> Vec<&str> {
    let mut rows = Vec::new();
    let mut start = 0;

    for (offset, character) in definition.char_indices() {
        match character {
            ROW_SEPARATOR => {
                rows.push(&definition[start..offset]);
                start = offset + ROW_SEPARATOR.len_utf8();
            }
            LEVEL_TERMINATOR => {
                if offset > start {
                    rows.push(&definition[start..offset]);
                }
                return rows;
            }
            _ => {}
        }
    }

    if start < definition.len() {
        rows.push(&definition[start..]);
    }
    rows
}

/// Expands the runs of a single row segment.
///
/// A digit run at the very end of the segment has no character to repeat and
/// is dropped.
pub fn decode_segment(segment: &str) -> Result<String, DecodeError> {
    let mut decoded = String::with_capacity(segment.len());
    let mut characters = segment.char_indices().peekable();

    while let Some((offset, character)) = characters.next() {
        let Some(first_digit) = character.to_digit(10) else {
            decoded.push(character);
            continue;
        };

        let overflow = || DecodeError::RunLengthOverflow {
            segment: segment.to_owned(),
            offset,
        };

        let mut count = first_digit as usize;
        while let Some(digit) = characters.peek().and_then(|(_, next)| next.to_digit(10)) {
            count = count
                .checked_mul(10)
                .and_then(|scaled| scaled.checked_add(digit as usize))
                .filter(|count| *count <= MAX_RUN_LENGTH)
                .ok_or_else(overflow)?;
            let _ = characters.next();
        }

        if let Some((_, repeated)) = characters.next() {
            decoded.extend(std::iter::repeat(repeated).take(count));
        }
    }

    Ok(decoded)
}

/// Decodes a complete definition into a rectangular tile grid.
///
/// Rows shorter than the widest decoded row are padded with air.
pub fn decode_level(definition: &str) -> Result<TileGrid, DecodeError> {
    let rows = split_rows(definition)
        .into_iter()
        .map(decode_segment)
        .collect::<Result<Vec<_>, _>>()?;
    TileGrid::from_rows(&rows)
}
