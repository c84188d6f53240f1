use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("Malformed header line: {0:?}")]
    MalformedHeaderLine(String),

    #[error("Invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;
