use std::io::{self, Read};

use crate::{config::DEFAULT_BUFFER_CAPACITY, error::RecvError};

/// Outcome of pulling more bytes from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refill {
    Filled(usize),
    Closed,
}

/// One accepted client stream plus its fixed-size scratch buffer.
///
/// `cursor` marks how much of the last read has been handed on; the bytes in
/// `cursor..filled` are the current window. `0 <= cursor <= filled <= capacity`
/// holds at all times.
#[derive(Debug)]
pub struct Connection<S> {
    stream: S,
    buf: Box<[u8]>,
    filled: usize,
    cursor: usize,
}

impl<S> Connection<S> {
    pub fn new(stream: S) -> Self {
        Self::with_capacity(stream, DEFAULT_BUFFER_CAPACITY)
    }

    pub fn with_capacity(stream: S, capacity: usize) -> Self {
        Self {
            stream,
            buf: vec![0; capacity.max(1)].into_boxed_slice(),
            filled: 0,
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Unconsumed bytes of the current window.
    pub fn remainder(&self) -> &[u8] {
        &self.buf[self.cursor..self.filled]
    }

    /// Marks `n` bytes of the window as handed on.
    pub fn consume(&mut self, n: usize) {
        self.cursor = (self.cursor + n).min(self.filled);
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read> Connection<S> {
    /// Blocks until the client sends more bytes, replacing the window.
    pub fn refill(&mut self) -> Result<Refill, RecvError> {
        let n = loop {
            match self.stream.read(&mut self.buf) {
                Ok(n) => break n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        };

        self.filled = n;
        self.cursor = 0;

        if n == 0 {
            Ok(Refill::Closed)
        } else {
            Ok(Refill::Filled(n))
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::ScriptedStream;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_refill_and_consume() {
        let mut conn = Connection::with_capacity(ScriptedStream::new(["hello", "world"]), 8);
        assert!(conn.remainder().is_empty());

        assert_eq!(conn.refill().unwrap(), Refill::Filled(5));
        assert_eq!(conn.remainder(), b"hello");

        conn.consume(2);
        assert_eq!(conn.remainder(), b"llo");

        conn.consume(100);
        assert!(conn.remainder().is_empty());

        assert_eq!(conn.refill().unwrap(), Refill::Filled(5));
        assert_eq!(conn.remainder(), b"world");

        assert_eq!(conn.refill().unwrap(), Refill::Closed);
        assert!(conn.remainder().is_empty());
    }

    #[test]
    fn test_refill_respects_capacity() {
        let mut conn = Connection::with_capacity(ScriptedStream::whole("abcdefghij"), 4);

        assert_eq!(conn.refill().unwrap(), Refill::Filled(4));
        assert_eq!(conn.remainder(), b"abcd");
        assert_eq!(conn.capacity(), 4);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let conn = Connection::with_capacity(ScriptedStream::default(), 0);
        assert_eq!(conn.capacity(), 1);
    }

    #[test]
    fn test_refill_transport_error() {
        let stream = ScriptedStream::new(Vec::<&[u8]>::new())
            .then_fail(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer"));
        let mut conn = Connection::new(stream);

        let err = conn.refill().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportReceiveFailed);
    }

    #[test]
    fn test_refill_retries_interrupted() {
        struct Flaky {
            interrupted: bool,
        }

        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::ErrorKind::Interrupted.into());
                }
                buf[0] = b'x';
                Ok(1)
            }
        }

        let mut conn = Connection::new(Flaky { interrupted: false });
        assert_eq!(conn.refill().unwrap(), Refill::Filled(1));
        assert_eq!(conn.remainder(), b"x");
    }
}
