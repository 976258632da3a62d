use thiserror::Error;

/// Errors surfaced by the codec.
///
/// Capacity overrun on encode and truncated streams on decode are *not*
/// errors: the former is handled by discarding the partial layer and
/// terminating the stream, the latter by leaving the missing coefficients
/// zero.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid PPM: {0}")]
    InvalidPpm(String),

    #[error("unsupported image geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),

    #[error("corrupt stream: {0}")]
    CorruptStream(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
