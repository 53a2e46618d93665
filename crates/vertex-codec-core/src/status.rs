use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// Error kinds, stable for callers that want to branch on the failure
/// without matching on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Encode input is unusable (non-finite coordinate, bad scale).
    InvalidInput,
    /// Payload text is not valid base64.
    MalformedText,
    /// Compressed stream is damaged or truncated.
    CorruptStream,
    /// Decompressed bytes do not describe a well-formed record.
    MalformedRecord,
    /// An allocation sized by the input could not be satisfied.
    OutOfMemory,
}

impl ErrorCode {
    /// Returns the name of this error code as a string
    pub const fn name(self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::MalformedText => "MALFORMED_TEXT",
            ErrorCode::CorruptStream => "CORRUPT_STREAM",
            ErrorCode::MalformedRecord => "MALFORMED_RECORD",
            ErrorCode::OutOfMemory => "OUT_OF_MEMORY",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Malformed text: {0}")]
    MalformedText(String),
    #[error("Corrupt stream: {0}")]
    CorruptStream(String),
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("Out of memory: {0}")]
    OutOfMemory(String),
}

impl CodecError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CodecError::InvalidInput(_) => ErrorCode::InvalidInput,
            CodecError::MalformedText(_) => ErrorCode::MalformedText,
            CodecError::CorruptStream(_) => ErrorCode::CorruptStream,
            CodecError::MalformedRecord(_) => ErrorCode::MalformedRecord,
            CodecError::OutOfMemory(_) => ErrorCode::OutOfMemory,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CodecError::InvalidInput(msg)
            | CodecError::MalformedText(msg)
            | CodecError::CorruptStream(msg)
            | CodecError::MalformedRecord(msg)
            | CodecError::OutOfMemory(msg) => msg,
        }
    }
}

pub type Status = Result<(), CodecError>;

pub type StatusResult<T> = Result<T, CodecError>;

impl From<TryReserveError> for CodecError {
    fn from(err: TryReserveError) -> Self {
        CodecError::OutOfMemory(err.to_string())
    }
}

impl From<base64::DecodeError> for CodecError {
    fn from(err: base64::DecodeError) -> Self {
        CodecError::MalformedText(err.to_string())
    }
}

impl From<flate2::DecompressError> for CodecError {
    fn from(err: flate2::DecompressError) -> Self {
        CodecError::CorruptStream(err.to_string())
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::MalformedRecord(err.to_string())
    }
}

pub fn ok_status() -> Status {
    Ok(())
}

pub fn malformed_record(msg: impl Into<String>) -> CodecError {
    CodecError::MalformedRecord(msg.into())
}
