use std::{
    io,
    net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs},
    thread,
    time::Duration,
};

use tracing::{error, info, warn};

use crate::{config::ReadLimits, connection::Connection, error::RecvError, request::Request};

/// Consecutive accept failures tolerated before the loop gives up.
pub const MAX_ACCEPT_FAILURES: u32 = 8;
const ACCEPT_BACKOFF_START: Duration = Duration::from_millis(10);
const ACCEPT_BACKOFF_MAX: Duration = Duration::from_secs(1);

/// A blocking listener that reads exactly one request per accepted
/// connection, one connection at a time.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    limits: ReadLimits,
}

impl Server {
    /// Binds the first address `addr` resolves to that accepts a bind.
    pub fn bind(addr: impl ToSocketAddrs, limits: ReadLimits) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        info!("Listening on {}", listener.local_addr()?);
        Ok(Self { listener, limits })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn limits(&self) -> &ReadLimits {
        &self.limits
    }

    pub fn accept(&self) -> io::Result<(Connection<TcpStream>, SocketAddr)> {
        let (stream, peer) = self.listener.accept()?;
        stream.set_read_timeout(self.limits.read_timeout)?;
        Ok((
            Connection::with_capacity(stream, self.limits.buffer_capacity),
            peer,
        ))
    }

    /// Accepts connections forever, handing each read result to `handler`.
    ///
    /// Returns only when accepting fails [`MAX_ACCEPT_FAILURES`] times in a
    /// row.
    pub fn serve<F>(&self, handler: F) -> io::Result<()>
    where
        F: FnMut(SocketAddr, Result<Request, RecvError>),
    {
        self.serve_inner(None, handler)
    }

    /// Like [`Server::serve`], but returns after `connections` accepted
    /// connections.
    pub fn serve_n<F>(&self, connections: usize, handler: F) -> io::Result<()>
    where
        F: FnMut(SocketAddr, Result<Request, RecvError>),
    {
        self.serve_inner(Some(connections), handler)
    }

    fn serve_inner<F>(&self, mut remaining: Option<usize>, mut handler: F) -> io::Result<()>
    where
        F: FnMut(SocketAddr, Result<Request, RecvError>),
    {
        let mut backoff = AcceptBackoff::new();

        while remaining != Some(0) {
            let (mut conn, peer) = match self.accept() {
                Ok(accepted) => accepted,
                Err(e) => {
                    let delay = backoff.failed(e)?;
                    thread::sleep(delay);
                    continue;
                }
            };
            backoff.reset();
            info!("Accepted connection from {}", peer);

            let result = conn.read_request(&self.limits);
            if let Err(e) = &result {
                warn!(kind = ?e.kind(), "Failed to read request from {}: {}", peer, e);
            }
            handler(peer, result);

            // closes the stream before the next accept
            drop(conn);

            if let Some(n) = remaining.as_mut() {
                *n -= 1;
            }
        }

        Ok(())
    }
}

/// Exponential delay between failed accepts, bounded in count.
#[derive(Debug)]
struct AcceptBackoff {
    failures: u32,
    delay: Duration,
}

impl AcceptBackoff {
    fn new() -> Self {
        Self {
            failures: 0,
            delay: ACCEPT_BACKOFF_START,
        }
    }

    /// Records a failure and returns how long to wait, or the error itself
    /// once the limit is reached.
    fn failed(&mut self, err: io::Error) -> io::Result<Duration> {
        self.failures += 1;
        if self.failures >= MAX_ACCEPT_FAILURES {
            error!(failures = self.failures, "Giving up on accept: {}", err);
            return Err(err);
        }

        let delay = self.delay;
        warn!(failures = self.failures, ?delay, "Failed to accept connection: {}", err);
        self.delay = (self.delay * 2).min(ACCEPT_BACKOFF_MAX);
        Ok(delay)
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
