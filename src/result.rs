use crate::error::ReadFailure;

/// A byte range within the working buffer, inclusive of both endpoints.
///
/// Mirrors the layout of a returned record: `begin` is the first surrendered
/// byte, `end` the last. For `FullLine`, `end` is the delimiter itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSpan {
    pub begin: usize,
    pub end: usize,
}

impl ByteSpan {
    #[inline]
    pub(crate) fn new(begin: usize, end: usize) -> Self {
        ByteSpan { begin, end }
    }

    /// Number of bytes covered, `end − begin + 1`. A span is never empty.
    #[inline]
    pub fn len(&self) -> usize {
        self.end + 1 - self.begin
    }
}

/// The tagged value returned by [`Scanner::getline`](crate::Scanner::getline).
///
/// Every call to `getline` produces exactly one of these. The caller is
/// expected to `match` exhaustively; there is no separate error channel and
/// no out-of-band signaling.
#[derive(Debug, Clone, PartialEq)]
pub enum GetlineResult {
    /// A complete record terminated by the delimiter. `span.end` is the
    /// delimiter's position.
    FullLine(ByteSpan),
    /// A complete record at end of input with no trailing delimiter.
    FullLineWithoutDelimiter(ByteSpan),
    /// The first chunk of a record longer than the working buffer.
    LongLineStart(ByteSpan),
    /// An intermediate or final data-bearing chunk of an overlong record.
    LongLineChunk(ByteSpan),
    /// Marks that no further chunks of the current overlong record follow.
    /// Carries no data; always preceded by a `LongLineChunk`.
    LongLineEnd,
    /// The scanner would have had to invalidate previously returned bytes;
    /// the caller must release them and call `resume_from_pause`.
    Paused,
    /// No more data; the input is exhausted.
    EndOfFile,
    /// The underlying read failed. Once returned, every subsequent call
    /// behaves as `EndOfFile` (the scanner does not retry the read).
    Error(ReadFailure),
}

impl GetlineResult {
    /// The byte span carried by this result, if any. `LongLineEnd`,
    /// `Paused`, `EndOfFile` and `Error` carry no data and return `None`.
    pub fn span(&self) -> Option<ByteSpan> {
        match self {
            GetlineResult::FullLine(s)
            | GetlineResult::FullLineWithoutDelimiter(s)
            | GetlineResult::LongLineStart(s)
            | GetlineResult::LongLineChunk(s) => Some(*s),
            _ => None,
        }
    }
}
