// error.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
use std::fmt;
use std::io;

/// Errors encountered while de-animating
#[derive(Debug)]
pub enum Error {
    /// A wrapped I/O error from the chunk source.
    Io(io::Error),
    /// Block code (signature) is neither an extension introducer nor an
    /// image separator.
    InvalidBlockCode(u8),
}

/// Stillgif result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(fmt),
            Error::InvalidBlockCode(code) => {
                write!(fmt, "InvalidBlockCode(0x{:02X})", code)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
