//! Incremental HTTP/1.0 request reading over a blocking byte stream.
//!
//! A [`Connection`] wraps a connected stream and a fixed-size scratch buffer.
//! [`read_request`] pulls bytes through it until the header terminator shows
//! up, parses the head with [`parser::RequestParser`], then reads exactly
//! `Content-Length` more bytes. Everything consumed lands in one
//! [`RequestBuffer`] owned by the resulting [`Request`].
//!
//! [`Server`] is a thin single-threaded listener on top: accept, read one
//! request, close, repeat.

pub mod buffer;
pub mod config;
pub mod connection;
pub mod error;
pub mod listener;
pub mod reader;
pub mod request;

pub use buffer::RequestBuffer;
pub use config::ReadLimits;
pub use connection::{Connection, Refill};
pub use error::{ErrorKind, RecvError};
pub use listener::Server;
pub use reader::read_request;
pub use request::Request;
