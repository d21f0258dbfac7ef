//! Text puzzle parser
//!
//! Accepts the usual 81-cell formats: digits are clues; `.`, `0` and `_`
//! are empty cells; whitespace and `|`, `-`, `+` grid decoration are ignored.
//!
//! ```text
//! 53..7....
//! 6..195...
//! ```

use nom::branch::alt;
use nom::character::complete::one_of;
use nom::combinator::{map, value};
use nom::multi::many0;
use nom::sequence::{preceded, terminated};
use nom::{IResult, Parser};

use crate::clues::layout::ClueLayout;
use crate::core::error::{Result, SwarmError};
use crate::core::types::Position;

const CELL_COUNT: usize = 81;

fn decoration(input: &str) -> IResult<&str, char> {
    one_of(" \t\r\n|-+").parse(input)
}

fn cell(input: &str) -> IResult<&str, Option<u8>> {
    alt((
        map(one_of("123456789"), |c: char| c.to_digit(10).map(|d| d as u8)),
        value(None, one_of("._0")),
    ))
    .parse(input)
}

fn cells(input: &str) -> IResult<&str, Vec<Option<u8>>> {
    terminated(many0(preceded(many0(decoration), cell)), many0(decoration)).parse(input)
}

/// Parse a puzzle into a clue layout
pub fn parse_clues(input: &str) -> Result<ClueLayout> {
    let (rest, parsed) = cells(input).map_err(|e| SwarmError::ParseError(e.to_string()))?;

    if let Some(c) = rest.chars().next() {
        return Err(SwarmError::ParseError(format!(
            "unexpected character '{}' at offset {}",
            c,
            input.len() - rest.len()
        )));
    }
    if parsed.len() != CELL_COUNT {
        return Err(SwarmError::ParseError(format!(
            "expected {} cells, found {}",
            CELL_COUNT,
            parsed.len()
        )));
    }

    let mut layout = ClueLayout::new();
    for (pos, clue) in Position::all().zip(parsed) {
        if let Some(value) = clue {
            layout.place(pos, value)?;
        }
    }
    Ok(layout)
}
