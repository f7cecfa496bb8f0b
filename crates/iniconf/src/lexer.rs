//! Line classification for the INI text format.

use crate::error::IniError;

/// A classified input line, borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Blank,
    Comment,
    /// A `[name]` header; holds the trimmed name.
    Header(&'a str),
    /// Anything else, trimmed. Only parsed as `key=value` inside a known section.
    Body(&'a str),
}

/// Classify one raw line. `number` is 1-based and only used for errors.
pub(crate) fn classify(raw: &str, number: usize) -> Result<Line<'_>, IniError> {
    let line = raw.trim();
    if line.is_empty() {
        return Ok(Line::Blank);
    }
    if line.starts_with(['#', ';']) {
        return Ok(Line::Comment);
    }
    if line.starts_with('[') {
        return parse_header(line, number).map(Line::Header);
    }
    Ok(Line::Body(line))
}

fn parse_header(line: &str, number: usize) -> Result<&str, IniError> {
    let malformed = |reason| IniError::MalformedSection {
        line: number,
        text: line.to_string(),
        reason,
    };
    if line.len() < 3 {
        return Err(malformed("header too short"));
    }
    if !line.ends_with(']') {
        return Err(malformed("missing closing `]`"));
    }
    let name = line[1..line.len() - 1].trim();
    if name.is_empty() {
        return Err(malformed("section name is empty"));
    }
    Ok(name)
}

/// Split a trimmed body line into its trimmed key and value at the first `=`.
pub(crate) fn split_item(line: &str, number: usize) -> Result<(&str, &str), IniError> {
    let Some(index) = line.find('=') else {
        return Err(IniError::MissingAssignment {
            line: number,
            text: line.to_string(),
        });
    };
    let key = line[..index].trim();
    if key.is_empty() {
        return Err(IniError::EmptyKey {
            line: number,
            text: line.to_string(),
        });
    }
    Ok((key, line[index + 1..].trim()))
}
