//! HTTP/1.0 Request Head Parser
//!
//! This crate holds the I/O-free half of reading an HTTP/1.0 request:
//!
//! - [`search`] and [`SeamSearch`] locate the header terminator
//!   (`\r\n\r\n`) with a Rabin-Karp rolling hash, including occurrences that
//!   straddle two reads from a socket.
//! - [`RequestParser`] turns a header block into a [`RequestHead`]: the
//!   request line, the header fields (with HTTP/1.0 line folding) and the
//!   declared `Content-Length`.
//!
//! # Examples
//!
//! ```
//! use parser::{RequestParser, SeamSearch, TERMINATOR};
//!
//! // The terminator arrives split across two reads
//! let first = b"POST /submit HTTP/1.0\r\nContent-Length: 4\r\n\r";
//! let second = b"\nbody";
//!
//! let mut seam = SeamSearch::new(TERMINATOR);
//! assert_eq!(seam.feed(first), None);
//! let end = seam.feed(second).unwrap();
//! assert_eq!(&second[end..], b"body");
//!
//! // Everything before the terminator is the header block
//! let block = &first[..first.len() - 3];
//! let head = RequestParser::parse_head(block).unwrap();
//!
//! assert_eq!(head.method, "POST");
//! assert_eq!(head.target, "/submit");
//! assert_eq!(head.version, "HTTP/1.0");
//! assert_eq!(head.headers.get("content-length"), Some("4"));
//! assert_eq!(head.content_length, 4);
//! ```

mod error;
mod grammar;
mod search;
mod types;

// Re-export public API
pub use error::{ParseError, Result};
pub use grammar::RequestParser;
pub use search::{SeamSearch, TERMINATOR, search};
pub use types::{HeaderIter, Headers, RequestHead};
