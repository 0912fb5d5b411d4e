//! Two-line scan payload parser.
//!
//! Payload shape is `name\nemail`. Email syntax is not validated.

use std::error::Error;
use std::fmt::{Display, Formatter};

const PAYLOAD_SEPARATOR: char = '\n';
const EXPECTED_SEGMENTS: usize = 2;

/// Contact fields extracted from one scan payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedContact {
    pub name: String,
    pub email: String,
}

/// Scan payload parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Payload did not split into exactly two non-empty lines.
    MalformedPayload { segments: usize },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedPayload { segments } => write!(
                f,
                "malformed scan payload: expected {EXPECTED_SEGMENTS} non-empty lines, got {segments} segment(s)"
            ),
        }
    }
}

impl Error for ParseError {}

/// Parses a raw scan payload into name and email.
///
/// Segments are kept verbatim; whitespace-only segments count as non-empty.
///
/// # Errors
/// - `MalformedPayload` when the text has no separator, more than one
///   separator, or an empty name/email segment.
pub fn parse_scan_payload(raw: &str) -> Result<ScannedContact, ParseError> {
    let segments: Vec<&str> = raw.split(PAYLOAD_SEPARATOR).collect();
    match segments.as_slice() {
        [name, email] if !name.is_empty() && !email.is_empty() => Ok(ScannedContact {
            name: (*name).to_string(),
            email: (*email).to_string(),
        }),
        _ => Err(ParseError::MalformedPayload {
            segments: segments.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_scan_payload, ParseError};

    #[test]
    fn parses_name_and_email_lines() {
        let contact = parse_scan_payload("Vegas\nDarling@domin.com").unwrap();
        assert_eq!(contact.name, "Vegas");
        assert_eq!(contact.email, "Darling@domin.com");
    }

    #[test]
    fn any_two_non_empty_lines_roundtrip_exactly() {
        let cases = [
            ("Amy", "amy@example.com"),
            ("Zoë Ångström", "zoë@exämple.de"),
            ("李小龙", "lee@例え.jp"),
            ("  padded  ", " spaced@example.com "),
            (" ", "\t"),
            ("O'Brien, Jr.", "no-at-sign"),
            ("Tab\tName", "a\rb"),
        ];

        for (name, email) in cases {
            let raw = format!("{name}\n{email}");
            let contact = parse_scan_payload(&raw)
                .unwrap_or_else(|err| panic!("`{raw:?}` should parse: {err}"));
            assert_eq!(contact.name, name, "name for {raw:?}");
            assert_eq!(contact.email, email, "email for {raw:?}");
        }
    }

    #[test]
    fn wrong_shape_reports_segment_count() {
        let cases = [
            ("", 1),
            ("Amy", 1),
            ("\n", 2),
            ("Amy\n", 2),
            ("\namy@example.com", 2),
            ("a\nb\nc", 3),
            ("Amy\namy@example.com\n", 3),
            ("\n\n\n", 4),
        ];

        for (raw, segments) in cases {
            assert_eq!(
                parse_scan_payload(raw),
                Err(ParseError::MalformedPayload { segments }),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn rejects_single_line() {
        assert_eq!(
            parse_scan_payload("only a name").unwrap_err(),
            ParseError::MalformedPayload { segments: 1 }
        );
    }

    #[test]
    fn rejects_extra_lines_including_trailing_newline() {
        assert_eq!(
            parse_scan_payload("a\nb\nc").unwrap_err(),
            ParseError::MalformedPayload { segments: 3 }
        );
        assert!(parse_scan_payload("a\nb\n").is_err());
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(parse_scan_payload("\nmail@example.com").is_err());
        assert!(parse_scan_payload("Name\n").is_err());
        assert!(parse_scan_payload("").is_err());
    }

    #[test]
    fn accepts_email_without_validation() {
        let contact = parse_scan_payload("Amy\nnot an email").unwrap();
        assert_eq!(contact.email, "not an email");
    }
}
