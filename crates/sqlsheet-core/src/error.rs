//! Error types
//!
//! The engine has a deliberately small failure surface: an unreadable input
//! file is a fault; everything else (malformed literals, unterminated quotes,
//! unparseable statements) is tolerated and yields a best-effort result. A
//! dump with no recognizable tables is signaled through an empty
//! [`Conversion`](crate::Conversion), not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read dump file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
