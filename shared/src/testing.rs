use std::{
    collections::VecDeque,
    io::{self, Read},
};

/// An in-memory stream that hands out a fixed sequence of chunks.
///
/// Every `read` returns bytes from a single chunk only, so the chunk
/// boundaries seen by the reader are exactly the scripted ones. A chunk larger
/// than the caller's buffer is split across reads. Once the chunks run out the
/// stream reports the scripted error, if any, and then end-of-file.
#[derive(Debug, Default)]
pub struct ScriptedStream {
    chunks: VecDeque<Vec<u8>>,
    error: Option<io::Error>,
    reads: usize,
}

impl ScriptedStream {
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        Self {
            chunks: chunks
                .into_iter()
                .map(|chunk| chunk.as_ref().to_vec())
                .filter(|chunk| !chunk.is_empty())
                .collect(),
            error: None,
            reads: 0,
        }
    }

    /// Delivers `bytes` in one chunk.
    pub fn whole(bytes: impl AsRef<[u8]>) -> Self {
        Self::new([bytes])
    }

    /// Delivers `bytes` one byte per read.
    pub fn byte_by_byte(bytes: impl AsRef<[u8]>) -> Self {
        Self::new(bytes.as_ref().chunks(1))
    }

    /// Delivers `bytes` split in two at `at`.
    pub fn split_at(bytes: impl AsRef<[u8]>, at: usize) -> Self {
        let (first, second) = bytes.as_ref().split_at(at);
        Self::new([first, second])
    }

    /// Fails with `error` after the scripted chunks instead of closing.
    pub fn then_fail(mut self, error: io::Error) -> Self {
        self.error = Some(error);
        self
    }

    /// Number of `read` calls made so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;

        let Some(chunk) = self.chunks.front_mut() else {
            return match self.error.take() {
                Some(error) => Err(error),
                None => Ok(0),
            };
        };

        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n == chunk.len() {
            self.chunks.pop_front();
        } else {
            chunk.drain(..n);
        }
        Ok(n)
    }
}
