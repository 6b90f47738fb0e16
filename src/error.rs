use std::fmt;
use std::io;

/// Why [`Scanner::open`](crate::Scanner::open) failed.
#[derive(Debug)]
pub enum OpenErrorKind {
    /// The arena allocation (`mmap`) could not be obtained.
    Alloc(io::Error),
    /// The sentinel page could not be made read-only (`mprotect`).
    Protect(io::Error),
}

/// Error returned by [`Scanner::open`](crate::Scanner::open).
///
/// Mirrors the teacher's `Error { kind: Box<ErrorKind> }` shape: a thin
/// wrapper so a failed open stays cheap to move around, with the real
/// detail behind `kind()`.
#[derive(Debug)]
pub struct OpenError {
    kind: Box<OpenErrorKind>,
}

impl OpenError {
    pub(crate) fn new(kind: OpenErrorKind) -> Self {
        OpenError {
            kind: Box::new(kind),
        }
    }

    /// Returns the kind of failure.
    pub fn kind(&self) -> &OpenErrorKind {
        &self.kind
    }

    /// Returns the kind of failure, consuming the error.
    pub fn into_kind(self) -> OpenErrorKind {
        *self.kind
    }
}

impl fmt::Display for OpenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &*self.kind {
            OpenErrorKind::Alloc(e) => write!(f, "failed to allocate scanner buffer: {}", e),
            OpenErrorKind::Protect(e) => {
                write!(f, "failed to protect scanner sentinel page: {}", e)
            }
        }
    }
}

impl std::error::Error for OpenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.kind {
            OpenErrorKind::Alloc(e) => Some(e),
            OpenErrorKind::Protect(e) => Some(e),
        }
    }
}

/// Error returned by [`Scanner::set_min_first_chunk`](crate::Scanner::set_min_first_chunk)
/// when `len` is outside `[1, bufsz]`. State is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigError {
    pub(crate) requested: usize,
    pub(crate) bufsz: usize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "invalid min_first_chunk {}: must be in 1..={}",
            self.requested, self.bufsz
        )
    }
}

impl std::error::Error for ConfigError {}

/// The cause captured by [`GetlineResult::Error`](crate::GetlineResult::Error).
///
/// `io::Error` itself isn't `Clone`, but a [`GetlineResult`](crate::GetlineResult)
/// is documented (spec.md §3) to be "a tagged value copied (not referenced)
/// to the caller", so the cause is captured as an owned, cloneable
/// snapshot of the originating error instead of the error itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadFailure {
    kind: io::ErrorKind,
    message: String,
}

impl From<&io::Error> for ReadFailure {
    fn from(e: &io::Error) -> Self {
        ReadFailure {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

impl ReadFailure {
    /// The `io::ErrorKind` of the underlying read failure.
    pub fn kind(&self) -> io::ErrorKind {
        self.kind
    }
}

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ReadFailure {}
