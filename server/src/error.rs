use std::{collections::TryReserveError, io};

use parser::ParseError;
use thiserror::Error;

/// Why reading a request from a connection failed. Every variant is terminal
/// for the request being read.
#[derive(Error, Debug)]
pub enum RecvError {
    #[error("Failed to receive from the client: {0}")]
    TransportReceiveFailed(#[source] io::Error),

    #[error("Connection closed before the request was complete")]
    ConnectionClosedEarly,

    #[error("Request exceeds the {limit} byte limit")]
    RequestTooLarge { limit: usize },

    #[error("Request buffer could not grow: {0}")]
    AllocationFailed(#[from] TryReserveError),

    #[error("Timed out waiting for the client")]
    TimedOut,

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl RecvError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecvError::TransportReceiveFailed(_) => ErrorKind::TransportReceiveFailed,
            RecvError::ConnectionClosedEarly => ErrorKind::ConnectionClosedEarly,
            RecvError::RequestTooLarge { .. } => ErrorKind::RequestTooLarge,
            RecvError::AllocationFailed(_) => ErrorKind::AllocationFailed,
            RecvError::TimedOut => ErrorKind::TimedOut,
            RecvError::Parse(ParseError::MalformedRequestLine(_)) => {
                ErrorKind::MalformedRequestLine
            }
            RecvError::Parse(ParseError::MalformedHeaderLine(_)) => ErrorKind::MalformedHeaderLine,
            RecvError::Parse(ParseError::InvalidContentLength(_)) => {
                ErrorKind::InvalidContentLength
            }
        }
    }
}

impl From<io::Error> for RecvError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => RecvError::TimedOut,
            _ => RecvError::TransportReceiveFailed(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TransportReceiveFailed,
    ConnectionClosedEarly,
    RequestTooLarge,
    AllocationFailed,
    TimedOut,
    MalformedRequestLine,
    MalformedHeaderLine,
    InvalidContentLength,
}

impl ErrorKind {
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::TransportReceiveFailed => "receiving from the client failed",
            ErrorKind::ConnectionClosedEarly => "the client closed the connection mid-request",
            ErrorKind::RequestTooLarge => "the request is larger than allowed",
            ErrorKind::AllocationFailed => "memory for the request could not be allocated",
            ErrorKind::TimedOut => "the client took too long to send the request",
            ErrorKind::MalformedRequestLine => "the request line is malformed",
            ErrorKind::MalformedHeaderLine => "a header line is malformed",
            ErrorKind::InvalidContentLength => "the Content-Length header is not a valid length",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mapping() {
        let timed_out: RecvError = io::Error::from(io::ErrorKind::WouldBlock).into();
        assert_eq!(timed_out.kind(), ErrorKind::TimedOut);

        let reset: RecvError = io::Error::from(io::ErrorKind::ConnectionReset).into();
        assert_eq!(reset.kind(), ErrorKind::TransportReceiveFailed);
        assert!(std::error::Error::source(&reset).is_some());
    }

    #[test]
    fn test_parse_error_kinds() {
        let err = RecvError::from(ParseError::MalformedHeaderLine("x".to_string()));
        assert_eq!(err.kind(), ErrorKind::MalformedHeaderLine);
        assert_eq!(err.to_string(), "Malformed header line: \"x\"");
    }

    #[test]
    fn test_reserve_failure_kind() {
        let reserve = crate::RequestBuffer::with_capacity(usize::MAX).unwrap_err();
        let err = RecvError::from(reserve);

        assert_eq!(err.kind(), ErrorKind::AllocationFailed);
        assert!(matches!(err, RecvError::AllocationFailed(_)));
    }

    #[test]
    fn test_every_kind_has_a_description() {
        let kinds = [
            ErrorKind::TransportReceiveFailed,
            ErrorKind::ConnectionClosedEarly,
            ErrorKind::RequestTooLarge,
            ErrorKind::AllocationFailed,
            ErrorKind::TimedOut,
            ErrorKind::MalformedRequestLine,
            ErrorKind::MalformedHeaderLine,
            ErrorKind::InvalidContentLength,
        ];

        for kind in kinds {
            assert!(!kind.description().is_empty());
        }
    }
}
