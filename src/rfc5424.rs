//! The RFC 5424 grammar.
//!
//! ```text
//! message      = header SP structured-data [SP message-body]
//! header       = "<" 1*3DIGIT ">" version SP timestamp SP hostname
//!                SP app-name SP procid SP msgid
//! ```
//!
//! [`parse`] walks the raw text once, left to right, and hands back a
//! [`ParsedMessage`] that still holds slices of the input. No semantic work
//! happens here: PRI stays a number and structured data stays the ordered
//! list of elements seen on the wire. Turning that into a
//! [`Message`](crate::Message) is [`Message::from_parsed`](crate::Message::from_parsed).
//!
//! General convention is that the parse state is a byte offset into the input
//! named `offset`; every helper advances it past what it consumed. When a
//! helper fails, `offset` is where the grammar gave up.

use std::borrow::Cow;

use crate::error::{Error, SyntaxErrorKind};
use crate::structured_data::unescape_param_value;

/// The absence marker.
pub const NILVALUE: &str = "-";

const PRI_DIGITS: usize = 3;
const VERSION_DIGITS: usize = 3;
const HOSTNAME_MAX: usize = 255;
const APPNAME_MAX: usize = 48;
const PROCID_MAX: usize = 128;
const MSGID_MAX: usize = 32;
const SD_NAME_MAX: usize = 32;

// `#` stands for a digit, everything else must match literally
const DATE_TIME: &[u8] = b"####-##-##T##:##:##";
const NUM_OFFSET: &[u8] = b"##:##";
const SECFRAC_MAX: usize = 6;

type Result<T> = std::result::Result<T, SyntaxErrorKind>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header<'a> {
    /// Raw PRI value, not yet split into facility and severity.
    pub pri: u16,
    pub version: u16,
    pub timestamp: Option<&'a str>,
    pub hostname: Option<&'a str>,
    pub appname: Option<&'a str>,
    pub procid: Option<&'a str>,
    pub msgid: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuredElement<'a> {
    pub id: &'a str,
    /// Values are unescaped, so they only borrow when no escapes were present.
    pub params: Vec<(&'a str, Cow<'a, str>)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedMessage<'a> {
    pub header: Header<'a>,
    pub structured_data: Vec<StructuredElement<'a>>,
    pub msg: Option<&'a str>,
}

/// Run the grammar over one complete message.
///
/// Either the whole input matches and a tree comes back, or the result is
/// [`Error::Syntax`] carrying the input verbatim.
pub fn parse(raw: &str) -> std::result::Result<ParsedMessage<'_>, Error> {
    let mut offset = 0;
    parse_message(raw, &mut offset).map_err(|kind| Error::syntax(kind, offset, raw))
}

fn parse_message<'a>(raw: &'a str, offset: &mut usize) -> Result<ParsedMessage<'a>> {
    let buf = raw.as_bytes();

    let header = parse_header(raw, offset)?;
    expect_char(buf, offset, b' ')?;
    let structured_data = parse_structured_data(raw, offset)?;

    // only the first space is a separator, anything after it (more spaces,
    // newlines) belongs to the body
    let msg = match buf.get(*offset) {
        None => None,
        Some(b' ') => Some(&raw[*offset + 1..]),
        Some(_) => return Err(SyntaxErrorKind::TrailingData),
    };

    Ok(ParsedMessage {
        header,
        structured_data,
        msg,
    })
}

fn parse_header<'a>(raw: &'a str, offset: &mut usize) -> Result<Header<'a>> {
    let buf = raw.as_bytes();

    // https://datatracker.ietf.org/doc/html/rfc5424#section-6.2.1
    expect_char(buf, offset, b'<')?;
    let pri = parse_number(buf, offset, PRI_DIGITS)?;
    expect_char(buf, offset, b'>')?;

    // https://datatracker.ietf.org/doc/html/rfc5424#section-6.2.2
    if buf.get(*offset) == Some(&b'0') {
        return Err(SyntaxErrorKind::InvalidVersion);
    }
    let version = parse_number(buf, offset, VERSION_DIGITS)?;
    expect_char(buf, offset, b' ')?;

    let timestamp = parse_timestamp(raw, offset)?;
    expect_char(buf, offset, b' ')?;
    let hostname = parse_term(raw, offset, "hostname", HOSTNAME_MAX)?;
    expect_char(buf, offset, b' ')?;
    let appname = parse_term(raw, offset, "app-name", APPNAME_MAX)?;
    expect_char(buf, offset, b' ')?;
    let procid = parse_term(raw, offset, "procid", PROCID_MAX)?;
    expect_char(buf, offset, b' ')?;
    let msgid = parse_term(raw, offset, "msgid", MSGID_MAX)?;

    Ok(Header {
        pri,
        version,
        timestamp,
        hostname,
        appname,
        procid,
        msgid,
    })
}

#[inline]
fn expect_char(buf: &[u8], offset: &mut usize, want: u8) -> Result<()> {
    match buf.get(*offset) {
        Some(&ch) if ch == want => {
            *offset += 1;
            Ok(())
        }
        Some(_) => Err(SyntaxErrorKind::ExpectedChar(want as char)),
        None => Err(SyntaxErrorKind::UnexpectedEndOfInput),
    }
}

/// A lone `-`, i.e. one not followed by anything but a separator.
#[inline]
fn is_nil(buf: &[u8], offset: usize) -> bool {
    buf.get(offset) == Some(&b'-') && matches!(buf.get(offset + 1), None | Some(b' '))
}

fn parse_number(buf: &[u8], offset: &mut usize, max_digits: usize) -> Result<u16> {
    let start = *offset;
    let mut value = 0u16;

    while let Some(&ch) = buf.get(*offset) {
        if !ch.is_ascii_digit() {
            break;
        }
        if *offset - start == max_digits {
            return Err(SyntaxErrorKind::TooManyDigits);
        }

        value = value * 10 + u16::from(ch - b'0');
        *offset += 1;
    }

    if *offset == start {
        return Err(if start == buf.len() {
            SyntaxErrorKind::UnexpectedEndOfInput
        } else {
            SyntaxErrorKind::TooFewDigits
        });
    }

    Ok(value)
}

fn match_pattern(buf: &[u8], offset: &mut usize, pattern: &[u8]) -> Result<()> {
    for &want in pattern {
        let ok = match buf.get(*offset) {
            Some(ch) if want == b'#' => ch.is_ascii_digit(),
            Some(&ch) => ch == want,
            None => return Err(SyntaxErrorKind::UnexpectedEndOfInput),
        };
        if !ok {
            return Err(SyntaxErrorKind::InvalidTimestamp);
        }
        *offset += 1;
    }

    Ok(())
}

// Only the shape is checked, e.g. `2003-08-24T05:14:15.000003-07:00`.
// The text is kept as is; calendar validation is `Timestamp::to_datetime`.
//
// https://datatracker.ietf.org/doc/html/rfc5424#section-6.2.3
fn parse_timestamp<'a>(raw: &'a str, offset: &mut usize) -> Result<Option<&'a str>> {
    let buf = raw.as_bytes();
    if is_nil(buf, *offset) {
        *offset += 1;
        return Ok(None);
    }

    let start = *offset;
    match_pattern(buf, offset, DATE_TIME)?;

    if buf.get(*offset) == Some(&b'.') {
        *offset += 1;
        let frac_start = *offset;
        while *offset - frac_start < SECFRAC_MAX && buf.get(*offset).is_some_and(u8::is_ascii_digit)
        {
            *offset += 1;
        }

        if *offset == frac_start {
            return Err(SyntaxErrorKind::InvalidTimestamp);
        }
    }

    match buf.get(*offset) {
        Some(b'Z') => *offset += 1,
        Some(b'+' | b'-') => {
            *offset += 1;
            match_pattern(buf, offset, NUM_OFFSET)?;
        }
        Some(_) => return Err(SyntaxErrorKind::InvalidTimestamp),
        None => return Err(SyntaxErrorKind::UnexpectedEndOfInput),
    }

    Ok(Some(&raw[start..*offset]))
}

/// NILVALUE or 1 to `max_len` PRINTUSASCII characters.
fn parse_term<'a>(
    raw: &'a str,
    offset: &mut usize,
    field: &'static str,
    max_len: usize,
) -> Result<Option<&'a str>> {
    let buf = raw.as_bytes();
    if is_nil(buf, *offset) {
        *offset += 1;
        return Ok(None);
    }

    let start = *offset;
    while let Some(&ch) = buf.get(*offset) {
        if ch == b' ' {
            break;
        }
        if !ch.is_ascii_graphic() {
            return Err(SyntaxErrorKind::DisallowedCharacter(field));
        }
        if *offset - start == max_len {
            return Err(SyntaxErrorKind::FieldTooLong {
                field,
                max: max_len,
            });
        }
        *offset += 1;
    }

    if *offset == start {
        return Err(if start == buf.len() {
            SyntaxErrorKind::UnexpectedEndOfInput
        } else {
            SyntaxErrorKind::EmptyField(field)
        });
    }

    Ok(Some(&raw[start..*offset]))
}

// https://datatracker.ietf.org/doc/html/rfc5424#section-6.3
fn parse_structured_data<'a>(
    raw: &'a str,
    offset: &mut usize,
) -> Result<Vec<StructuredElement<'a>>> {
    let buf = raw.as_bytes();
    if is_nil(buf, *offset) {
        *offset += 1;
        return Ok(Vec::new());
    }

    let mut elements = Vec::with_capacity(4);
    loop {
        elements.push(parse_structured_element(raw, offset)?);

        if buf.get(*offset) != Some(&b'[') {
            break;
        }
    }

    Ok(elements)
}

// example: [exampleSDID@32473 iut="3" eventSource="Application" eventID="1011"]
fn parse_structured_element<'a>(
    raw: &'a str,
    offset: &mut usize,
) -> Result<StructuredElement<'a>> {
    let buf = raw.as_bytes();
    expect_char(buf, offset, b'[')?;

    let id = parse_sd_name(raw, offset, "SD-ID")?;
    let mut params = Vec::new();

    loop {
        match buf.get(*offset) {
            Some(b']') => {
                *offset += 1;
                break;
            }
            Some(b' ') => {
                *offset += 1;
                let name = parse_sd_name(raw, offset, "PARAM-NAME")?;
                expect_char(buf, offset, b'=')?;
                let value = parse_param_value(raw, offset)?;
                params.push((name, value));
            }
            Some(_) => return Err(SyntaxErrorKind::ExpectedChar(']')),
            None => return Err(SyntaxErrorKind::UnterminatedStructuredData),
        }
    }

    Ok(StructuredElement { id, params })
}

/// SD-NAME: 1 to 32 characters other than `=`, SP, `]` and `"`.
fn parse_sd_name<'a>(raw: &'a str, offset: &mut usize, field: &'static str) -> Result<&'a str> {
    let buf = raw.as_bytes();
    let start = *offset;

    while let Some(&ch) = buf.get(*offset) {
        if matches!(ch, b'=' | b' ' | b']' | b'"') {
            break;
        }
        *offset += 1;
    }

    if *offset == buf.len() {
        return Err(SyntaxErrorKind::UnterminatedStructuredData);
    }

    let name = &raw[start..*offset];
    if name.is_empty() {
        return Err(SyntaxErrorKind::EmptyField(field));
    }
    if name.chars().count() > SD_NAME_MAX {
        return Err(SyntaxErrorKind::FieldTooLong {
            field,
            max: SD_NAME_MAX,
        });
    }

    Ok(name)
}

/// Parse a quoted PARAM-VALUE, `\` escapes the next character.
fn parse_param_value<'a>(raw: &'a str, offset: &mut usize) -> Result<Cow<'a, str>> {
    let buf = raw.as_bytes();
    expect_char(buf, offset, b'"')?;

    let start = *offset;
    let mut escaped = false;
    while let Some(&ch) = buf.get(*offset) {
        *offset += 1;

        if escaped {
            escaped = false;
            continue;
        }

        match ch {
            b'\\' => escaped = true,
            b'"' => return Ok(unescape_param_value(&raw[start..*offset - 1])),
            _ => {}
        }
    }

    Err(SyntaxErrorKind::UnterminatedStructuredData)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(input: &str) -> SyntaxErrorKind {
        match parse(input) {
            Err(Error::Syntax { kind, message, .. }) => {
                assert_eq!(message, input);
                kind
            }
            other => panic!("expected syntax error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn minimal() {
        let parsed = parse("<1>1 - - - - - -").unwrap();
        assert_eq!(
            parsed.header,
            Header {
                pri: 1,
                version: 1,
                timestamp: None,
                hostname: None,
                appname: None,
                procid: None,
                msgid: None,
            }
        );
        assert!(parsed.structured_data.is_empty());
        assert_eq!(parsed.msg, None);
    }

    #[test]
    fn rfc5424_examples() {
        // https://datatracker.ietf.org/doc/html/rfc5424#section-6.5
        for (input, pri, procid, sd_len, msg) in [
            (
                r##"<34>1 2003-10-11T22:14:15.003Z mymachine.example.com su - ID47 - BOM'su root' failed for lonvick on /dev/pts/8"##,
                34,
                None,
                0,
                Some("BOM'su root' failed for lonvick on /dev/pts/8"),
            ),
            (
                r##"<165>1 2003-08-24T05:14:15.000003-07:00 192.0.2.1 myproc 8710 - - %% It's time to make the do-nuts."##,
                165,
                Some("8710"),
                0,
                Some("%% It's time to make the do-nuts."),
            ),
            (
                r##"<165>1 2003-10-11T22:14:15.003Z mymachine.example.com evntslog - ID47 [exampleSDID@32473 iut="3" eventSource="Application" eventID="1011"] BOMAn application event log entry..."##,
                165,
                None,
                1,
                Some("BOMAn application event log entry..."),
            ),
            (
                r##"<165>1 2003-10-11T22:14:15.003Z mymachine.example.com evntslog - ID47 [exampleSDID@32473 iut="3" eventSource="Application" eventID="1011"][examplePriority@32473 class="high"]"##,
                165,
                None,
                2,
                None,
            ),
        ] {
            let parsed = parse(input).unwrap();
            assert_eq!(parsed.header.pri, pri, "{input}");
            assert_eq!(parsed.header.version, 1, "{input}");
            assert_eq!(parsed.header.procid, procid, "{input}");
            assert_eq!(parsed.structured_data.len(), sd_len, "{input}");
            assert_eq!(parsed.msg, msg, "{input}");
        }
    }

    #[test]
    fn timestamp_is_literal() {
        for ts in [
            "1985-04-12T23:20:50.52Z",
            "1996-12-19T16:39:57-08:00",
            "1990-12-31T23:59:59Z",
            "2003-08-24T05:14:15.000003-07:00",
            "1937-01-01T12:00:27.87+00:20",
            // shape only, not a calendar check
            "2016-13-45T99:99:99Z",
        ] {
            let input = format!("<1>1 {ts} - - - - -");
            let parsed = parse(&input).unwrap();
            assert_eq!(parsed.header.timestamp, Some(ts));
        }
    }

    #[test]
    fn malformed_timestamps() {
        for ts in [
            "2016-01-15",
            "2016-01-15 00:04:01Z",
            "2016-01-15T00:04:01",
            "2016-01-15T00:04:01.Z",
            "2016-01-15T00:04:01.1234567Z",
            "2016-01-15T00:04:01+0000",
            "16-01-15T00:04:01Z",
        ] {
            let input = format!("<1>1 {ts} - - - - -");
            assert!(parse(&input).is_err(), "{ts} should not parse");
        }
    }

    #[test]
    fn pri_and_version() {
        assert_eq!(parse("<409>1 - - - - - -").unwrap().header.pri, 409);
        assert_eq!(parse("<1>123 - - - - - -").unwrap().header.version, 123);

        assert_eq!(kind_of("<1234>1 - - - - - -"), SyntaxErrorKind::TooManyDigits);
        assert_eq!(kind_of("<>1 - - - - - -"), SyntaxErrorKind::TooFewDigits);
        assert_eq!(kind_of("<1>0 - - - - - -"), SyntaxErrorKind::InvalidVersion);
        assert_eq!(kind_of("<1>1234 - - - - - -"), SyntaxErrorKind::TooManyDigits);
        assert_eq!(kind_of("<1> - - - - - -"), SyntaxErrorKind::TooFewDigits);
    }

    #[test]
    fn garbage() {
        assert_eq!(kind_of("garbage"), SyntaxErrorKind::ExpectedChar('<'));
        assert_eq!(kind_of(""), SyntaxErrorKind::UnexpectedEndOfInput);
        assert_eq!(kind_of("<1>1 - - - - -"), SyntaxErrorKind::UnexpectedEndOfInput);
        assert_eq!(kind_of("<1>1 - - - - - -x"), SyntaxErrorKind::ExpectedChar('['));
        assert_eq!(kind_of("<1>1 - - - - - [a]x"), SyntaxErrorKind::TrailingData);
    }

    #[test]
    fn error_position() {
        match parse("<1>1 - host  - - - -") {
            Err(Error::Syntax { kind, position, .. }) => {
                assert_eq!(kind, SyntaxErrorKind::EmptyField("app-name"));
                assert_eq!(position, 12);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn term_fields() {
        let parsed = parse("<1>1 - -host ::FFFF:129.144.52.38 - ID47 -").unwrap();
        assert_eq!(parsed.header.hostname, Some("-host"));
        assert_eq!(parsed.header.appname, Some("::FFFF:129.144.52.38"));
        assert_eq!(parsed.header.msgid, Some("ID47"));

        let long_host = "h".repeat(256);
        assert_eq!(
            kind_of(&format!("<1>1 - {long_host} - - - -")),
            SyntaxErrorKind::FieldTooLong {
                field: "hostname",
                max: 255
            }
        );
        let host = "h".repeat(255);
        assert!(parse(&format!("<1>1 - {host} - - - -")).is_ok());

        let long_msgid = "m".repeat(33);
        assert!(parse(&format!("<1>1 - - - - {long_msgid} -")).is_err());

        assert_eq!(
            kind_of("<1>1 - h\tost - - - -"),
            SyntaxErrorKind::DisallowedCharacter("hostname")
        );
        assert_eq!(
            kind_of("<1>1 - hÖst - - - -"),
            SyntaxErrorKind::DisallowedCharacter("hostname")
        );
    }

    #[test]
    fn multiple_structured_data() {
        let input = r#"<1>1 - - - - - [exampleSDID@32473 iut="3" eventSource="Application"][examplePriority@32473 class="high"] BOMAn application event log entry..."#;

        let parsed = parse(input).unwrap();
        assert_eq!(parsed.structured_data.len(), 2);
        assert_eq!(parsed.structured_data[0].id, "exampleSDID@32473");
        assert_eq!(
            parsed.structured_data[0].params,
            vec![
                ("iut", Cow::Borrowed("3")),
                ("eventSource", Cow::Borrowed("Application"))
            ]
        );
        assert_eq!(parsed.structured_data[1].id, "examplePriority@32473");
        assert_eq!(parsed.msg, Some("BOMAn application event log entry..."));
    }

    #[test]
    fn structured_data_without_params() {
        let parsed = parse("<1>1 - - - - - [sdid]").unwrap();
        assert_eq!(
            parsed.structured_data,
            vec![StructuredElement {
                id: "sdid",
                params: vec![]
            }]
        );
    }

    #[test]
    fn escaped_param_values() {
        let parsed = parse(r#"<1>1 - - - - - [id a="say \"hi\"" b="x\]y" c="C:\temp" d="]"]"#).unwrap();
        let params = &parsed.structured_data[0].params;
        assert_eq!(params[0].1, r#"say "hi""#);
        assert_eq!(params[1].1, "x]y");
        assert_eq!(params[2].1, r"C:\temp");
        assert_eq!(params[3].1, "]");
    }

    #[test]
    fn malformed_structured_data() {
        assert_eq!(
            kind_of(r#"<1>1 - - - - - [meta a="b""#),
            SyntaxErrorKind::UnterminatedStructuredData
        );
        assert_eq!(
            kind_of(r#"<1>1 - - - - - [meta a="b"#),
            SyntaxErrorKind::UnterminatedStructuredData
        );
        assert_eq!(
            kind_of("<1>1 - - - - - []"),
            SyntaxErrorKind::EmptyField("SD-ID")
        );
        assert_eq!(
            kind_of("<1>1 - - - - - [meta a]"),
            SyntaxErrorKind::ExpectedChar('=')
        );
        assert_eq!(
            kind_of("<1>1 - - - - - [meta a=b]"),
            SyntaxErrorKind::ExpectedChar('"')
        );
        assert_eq!(
            kind_of(r#"<1>1 - - - - - [meta  a="b"]"#),
            SyntaxErrorKind::EmptyField("PARAM-NAME")
        );
        assert_eq!(
            kind_of(r#"<1>1 - - - - - [meta a="b"c]"#),
            SyntaxErrorKind::ExpectedChar(']')
        );

        let long_id = "x".repeat(33);
        assert!(parse(&format!("<1>1 - - - - - [{long_id}]")).is_err());
    }

    #[test]
    fn body_separator() {
        assert_eq!(parse("<1>1 - - - - - -").unwrap().msg, None);
        assert_eq!(parse("<1>1 - - - - - - ").unwrap().msg, Some(""));
        assert_eq!(parse("<1>1 - - - - - -  ").unwrap().msg, Some(" "));
        assert_eq!(parse("<1>1 - - - - - -  msg").unwrap().msg, Some(" msg"));
        assert_eq!(
            parse("<1>1 - - - - - - line one\nline two\n").unwrap().msg,
            Some("line one\nline two\n")
        );
    }
}
