use std::ops::Range;

use parser::{Headers, RequestHead};

use crate::buffer::RequestBuffer;

/// A fully read request: the raw bytes as received plus the parsed head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    raw: RequestBuffer,
    head: RequestHead,
    head_len: usize,
    body: Range<usize>,
}

impl Request {
    pub(crate) fn new(raw: RequestBuffer, head: RequestHead, head_len: usize) -> Self {
        let body = head_len..raw.len();
        Self {
            raw,
            head,
            head_len,
            body,
        }
    }

    pub fn method(&self) -> &str {
        &self.head.method
    }

    pub fn target(&self) -> &str {
        &self.head.target
    }

    pub fn version(&self) -> &str {
        &self.head.version
    }

    pub fn headers(&self) -> &Headers {
        &self.head.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.headers.get(name)
    }

    pub fn content_length(&self) -> usize {
        self.head.content_length
    }

    pub fn head(&self) -> &RequestHead {
        &self.head
    }

    /// Header block and terminator, as received.
    pub fn head_bytes(&self) -> &[u8] {
        &self.raw[..self.head_len]
    }

    pub fn body(&self) -> &[u8] {
        &self.raw[self.body.clone()]
    }

    pub fn body_range(&self) -> Range<usize> {
        self.body.clone()
    }

    pub fn raw(&self) -> &RequestBuffer {
        &self.raw
    }

    pub fn into_raw(self) -> RequestBuffer {
        self.raw
    }
}
