use std::str::{self, FromStr};

use pest::Parser;
use pest_derive::Parser;

use crate::{
    error::{ParseError, Result},
    search::search,
    types::{Headers, RequestHead},
};

const CRLF: &[u8] = b"\r\n";
const CONTENT_LENGTH: &str = "Content-Length";

#[derive(Parser)]
#[grammar = "./grammar/request.pest"]
pub struct RequestParser;

impl RequestParser {
    /// Parses a header block: the request line and header lines, without the
    /// blank line that terminates them.
    pub fn parse_head(block: &[u8]) -> Result<RequestHead> {
        let mut lines = Lines { rest: Some(block) };

        let request_line = lines.next().unwrap_or_default();
        let (method, target, version) = Self::parse_request_line(request_line)?;

        let mut headers = Headers::new();
        let mut last_name: Option<String> = None;

        for line in lines {
            // field values may carry any octet; invalid UTF-8 is replaced, never rejected
            let text = String::from_utf8_lossy(line);

            if text.starts_with([' ', '\t']) {
                let folded = last_name
                    .as_deref()
                    .is_some_and(|name| headers.append_continuation(name, &text));
                if !folded {
                    return Err(ParseError::MalformedHeaderLine(text.into_owned()));
                }
                continue;
            }

            let (name, value) = Self::parse_header_line(&text)?;
            headers.insert(name.clone(), value);
            last_name = Some(name);
        }

        let content_length = match headers.get(CONTENT_LENGTH) {
            Some(value) => parse_content_length(value)?,
            None => 0,
        };

        Ok(RequestHead {
            method,
            target,
            version,
            headers,
            content_length,
        })
    }

    fn parse_request_line(line: &[u8]) -> Result<(String, String, String)> {
        let malformed =
            || ParseError::MalformedRequestLine(String::from_utf8_lossy(line).into_owned());

        let text = str::from_utf8(line).map_err(|_| malformed())?;
        let request_line = Self::parse(Rule::request_line, text)
            .map_err(|_| malformed())?
            .next()
            .ok_or_else(malformed)?;

        let mut inner = request_line.into_inner();
        let method = inner.next().ok_or_else(malformed)?;
        let target = inner.next().ok_or_else(malformed)?;
        let version = inner.next().ok_or_else(malformed)?;

        Ok((
            method.as_str().to_string(),
            target.as_str().to_string(),
            version.as_str().to_string(),
        ))
    }

    fn parse_header_line(line: &str) -> Result<(String, String)> {
        let malformed = || ParseError::MalformedHeaderLine(line.to_string());

        let header_line = Self::parse(Rule::header_line, line)
            .map_err(|_| malformed())?
            .next()
            .ok_or_else(malformed)?;

        let mut inner = header_line.into_inner();
        let name = inner.next().ok_or_else(malformed)?.as_str().trim_matches([' ', '\t']);
        let value = inner.next().ok_or_else(malformed)?;

        if name.is_empty() {
            return Err(malformed());
        }

        Ok((
            name.to_string(),
            value.as_str().trim_end_matches([' ', '\t']).to_string(),
        ))
    }
}

fn parse_content_length(value: &str) -> Result<usize> {
    let invalid = || ParseError::InvalidContentLength(value.to_string());

    let digits = value.trim_matches([' ', '\t']);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    digits.parse().map_err(|_| invalid())
}

/// CRLF-separated lines of a header block.
struct Lines<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match search(rest, CRLF) {
            Some(end) => {
                self.rest = Some(&rest[end..]);
                Some(&rest[..end - CRLF.len()])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

impl FromStr for RequestHead {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        RequestParser::parse_head(s.as_bytes())
    }
}
