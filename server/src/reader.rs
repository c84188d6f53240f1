use std::io::Read;

use parser::{RequestParser, SeamSearch, TERMINATOR};
use tracing::{debug, trace};

use crate::{
    buffer::RequestBuffer,
    config::ReadLimits,
    connection::{Connection, Refill},
    error::RecvError,
    request::Request,
};

/// Reads one request from `conn`: the header block up to the blank line,
/// then exactly `Content-Length` body bytes.
///
/// Bytes the client sends past the declared body stay unconsumed in the
/// connection.
pub fn read_request<S: Read>(
    conn: &mut Connection<S>,
    limits: &ReadLimits,
) -> Result<Request, RecvError> {
    let mut raw = RequestBuffer::with_capacity(limits.initial_request_capacity)?;

    let head_len = read_head(conn, &mut raw, limits.max_request_size)?;
    let head = RequestParser::parse_head(&raw[..head_len - TERMINATOR.len()])?;
    debug!(
        method = %head.method,
        target = %head.target,
        headers = head.headers.len(),
        content_length = head.content_length,
        "parsed request head"
    );

    let total = head_len
        .checked_add(head.content_length)
        .filter(|&total| total <= limits.max_request_size)
        .ok_or(RecvError::RequestTooLarge {
            limit: limits.max_request_size,
        })?;

    read_body(conn, &mut raw, total)?;
    debug!(body_len = head.content_length, "request body complete");

    Ok(Request::new(raw, head, head_len))
}

/// Accumulates bytes until the header terminator and returns the length of
/// the header block including the terminator.
fn read_head<S: Read>(
    conn: &mut Connection<S>,
    raw: &mut RequestBuffer,
    max_request_size: usize,
) -> Result<usize, RecvError> {
    let mut seam = SeamSearch::new(TERMINATOR);

    loop {
        let window = conn.remainder();
        if !window.is_empty() {
            if let Some(end) = seam.feed(window) {
                let head_len = raw.len() + end;
                if head_len > max_request_size {
                    return Err(RecvError::RequestTooLarge {
                        limit: max_request_size,
                    });
                }

                raw.append(&window[..end])?;
                conn.consume(end);
                debug!(head_len, "found header terminator");
                return Ok(head_len);
            }

            // without a terminator the head can only get longer
            if raw.len() + window.len() >= max_request_size {
                return Err(RecvError::RequestTooLarge {
                    limit: max_request_size,
                });
            }

            let n = window.len();
            raw.append(window)?;
            conn.consume(n);
        }

        match conn.refill()? {
            Refill::Filled(n) => trace!(n, "refilled while awaiting terminator"),
            Refill::Closed => return Err(RecvError::ConnectionClosedEarly),
        }
    }
}

/// Appends body bytes until `raw` holds `total` bytes, starting with whatever
/// the header read left in the window.
fn read_body<S: Read>(
    conn: &mut Connection<S>,
    raw: &mut RequestBuffer,
    total: usize,
) -> Result<(), RecvError> {
    while raw.len() < total {
        let window = conn.remainder();
        if window.is_empty() {
            match conn.refill()? {
                Refill::Filled(n) => trace!(n, "refilled while reading body"),
                Refill::Closed => return Err(RecvError::ConnectionClosedEarly),
            }
            continue;
        }

        let n = window.len().min(total - raw.len());
        raw.append(&window[..n])?;
        conn.consume(n);
    }

    Ok(())
}

impl<S: Read> Connection<S> {
    pub fn read_request(&mut self, limits: &ReadLimits) -> Result<Request, RecvError> {
        read_request(self, limits)
    }
}
