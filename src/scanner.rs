use std::io::{self, Read};

use crate::arena::Arena;
use crate::error::{ConfigError, OpenError, ReadFailure};
use crate::result::{ByteSpan, GetlineResult};
use crate::util::resolve_bufsz;

/// A fixed-capacity, sentinel-guarded scanner over a readable byte source.
///
/// One `Scanner` is created per opened stream with [`Scanner::open`]. It owns
/// its buffer arena exclusively; the input handle is borrowed from the
/// caller (the caller opened it and remains responsible for closing it).
/// `getline` is the sole mutator of cursors, long-line state and the cached
/// search hint; `enable_pause`/`disable_pause`/`resume_from_pause` are the
/// sole mutators of the pause flags. Calling `getline` re-entrantly on the
/// same scanner (e.g. from two threads) is undefined behavior at the logic
/// level, though nothing here is `unsafe` to call — see the crate docs.
pub struct Scanner<R> {
    arena: Arena,
    reader: R,
    delimiter: u8,
    buftop: usize,

    /// First byte not yet surrendered to the caller.
    p: usize,
    /// First byte not yet filled by a read; `[p, q)` is buffered, unreturned.
    q: usize,

    eof_seen: bool,
    err_seen: Option<ReadFailure>,
    /// Set the first time `err_seen` is surfaced as `GetlineResult::Error`.
    /// Per spec.md §7, only the first post-drain call reports the error;
    /// every call after that behaves as `EndOfFile` without retrying the
    /// read. `err_seen` itself is never cleared, so `end_of_input` stays
    /// latched true.
    err_reported: bool,

    in_longline: bool,
    longline_ended: bool,

    pause_on_inval: bool,
    terminate_current_pause: bool,

    min1stchunk: usize,

    /// Cached result of searching from `p`, meaningful only when `Some(d)`
    /// with `d < q`; anything else means the fast path must fall through to
    /// the general phase and recompute. Only consulted outside a long line:
    /// while `in_longline` is set, a found delimiter ends the record with a
    /// `LongLineChunk` + latched `LongLineEnd`, not a `FullLine`, so the
    /// fast path defers to the general phase to take that branch.
    hint: Option<usize>,
}

impl<R: Read> Scanner<R> {
    /// Opens a scanner over `handle` with the given requested capacity and
    /// delimiter byte.
    ///
    /// `bufsz` may be superseded by the `LINESCAN_BUFSZ` environment
    /// variable if the process has opted in with
    /// [`enable_env_override`](crate::enable_env_override) — see that
    /// function's docs. The working-buffer capacity is exactly `bufsz` (or
    /// the override); only the trailing sentinel page, not the buffer
    /// itself, is rounded to the platform page size internally.
    /// `min1stchunk` defaults to `bufsz`.
    pub fn open(handle: R, bufsz: usize, delimiter: u8) -> Result<Self, OpenError> {
        let bufsz = resolve_bufsz(bufsz);
        let arena = Arena::new(bufsz, delimiter)?;
        let buftop = arena.buftop();
        Ok(Scanner {
            arena,
            reader: handle,
            delimiter,
            buftop,
            p: 0,
            q: 0,
            eof_seen: false,
            err_seen: None,
            err_reported: false,
            in_longline: false,
            longline_ended: false,
            pause_on_inval: false,
            terminate_current_pause: false,
            min1stchunk: buftop,
            hint: None,
        })
    }

    /// Current minimum guaranteed first-chunk length.
    pub fn get_min_first_chunk(&self) -> usize {
        self.min1stchunk
    }

    /// Sets the minimum guaranteed length of any returned full line or
    /// long-line start chunk for records at least that long. Must lie in
    /// `[1, bufsz]`; on failure, state is left unchanged.
    pub fn set_min_first_chunk(&mut self, len: usize) -> Result<(), ConfigError> {
        if len == 0 || len > self.buftop {
            return Err(ConfigError {
                requested: len,
                bufsz: self.buftop,
            });
        }
        self.min1stchunk = len;
        Ok(())
    }

    /// Opts into pause mode: operations that would otherwise invalidate
    /// previously returned byte ranges return [`GetlineResult::Paused`]
    /// instead.
    pub fn enable_pause(&mut self) {
        self.pause_on_inval = true;
    }

    /// Clears pause mode unconditionally, including any pending one-shot
    /// resume latch.
    pub fn disable_pause(&mut self) {
        self.pause_on_inval = false;
        self.terminate_current_pause = false;
    }

    /// Permits exactly one invalidating action (a buffer shift or a full
    /// reset) on the next call to `getline`, after which pause mode resumes
    /// enforcing as usual.
    pub fn resume_from_pause(&mut self) {
        self.terminate_current_pause = true;
    }

    /// Borrows the bytes of a span previously returned by `getline`.
    ///
    /// The caller must not retain this borrow across another call to
    /// `getline` that does not return `Paused` (see the pause/resume
    /// protocol); nothing in the type system prevents this, matching the
    /// source design's data-copy-not-reference result contract.
    pub fn bytes(&self, span: ByteSpan) -> &[u8] {
        &self.arena.buf()[span.begin..=span.end]
    }

    /// Mutable access to the bytes of a previously returned span, e.g. to
    /// overwrite the delimiter with a different terminator in place.
    pub fn bytes_mut(&mut self, span: ByteSpan) -> &mut [u8] {
        &mut self.arena.buf_mut()[span.begin..=span.end]
    }

    #[inline]
    fn raw_search(&self, start: usize) -> usize {
        let region = self.arena.scan_region();
        let rel = memchr::memchr(self.delimiter, &region[start..])
            .expect("sentinel byte guarantees a match at or before buftop");
        start + rel
    }

    fn update_hint(&mut self) {
        self.hint = if self.p < self.q {
            let d = self.raw_search(self.p);
            if d < self.q {
                Some(d)
            } else {
                None
            }
        } else {
            None
        };
    }

    fn do_read(&mut self) {
        loop {
            let (q, buftop) = (self.q, self.buftop);
            let result = {
                let buf = self.arena.buf_mut();
                self.reader.read(&mut buf[q..buftop])
            };
            match result {
                Ok(0) => {
                    self.eof_seen = true;
                    return;
                }
                Ok(n) => {
                    self.q += n;
                    self.update_hint();
                    return;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.err_seen = Some(ReadFailure::from(&e));
                    return;
                }
            }
        }
    }

    /// Moves `[p, q)` down towards `0`, reserving `min1stchunk` bytes of
    /// headroom above the new `p` whenever that much shift distance is
    /// available; otherwise shifts all the way to `0` (still makes
    /// progress whenever `p > 0`, which is the caller's invariant).
    fn shift(&mut self) {
        let headroom_limit = self.buftop.saturating_sub(self.min1stchunk);
        let shift_amt = if self.p > headroom_limit {
            self.p - headroom_limit
        } else {
            self.p
        };
        if shift_amt == 0 {
            return;
        }
        let dest = self.p - shift_amt;
        self.arena.buf_mut().copy_within(self.p..self.q, dest);
        self.p = dest;
        self.q -= shift_amt;
        self.terminate_current_pause = false;
        self.update_hint();
    }

    fn reset(&mut self) {
        self.p = 0;
        self.q = 0;
        self.terminate_current_pause = false;
        self.hint = None;
    }

    /// Produces the next tagged result. See the crate docs for the full
    /// state machine; in short: drains any buffered, delimiter-terminated
    /// records first, refills when there is read space and none is
    /// buffered, shifts or chunks when the buffer is saturated, and
    /// surfaces end-of-input or a latched read failure once truly drained.
    pub fn getline(&mut self) -> GetlineResult {
        loop {
            if self.longline_ended {
                self.longline_ended = false;
                self.in_longline = false;
                return GetlineResult::LongLineEnd;
            }

            if !self.in_longline && self.p < self.q {
                if let Some(d) = self.hint {
                    if d < self.q {
                        let span = ByteSpan::new(self.p, d);
                        self.p = d + 1;
                        self.update_hint();
                        return GetlineResult::FullLine(span);
                    }
                }
            }

            let have_bytes = self.p < self.q;
            let d = if have_bytes {
                self.raw_search(self.p)
            } else {
                self.buftop
            };
            let have_delim = have_bytes && d < self.q;
            let end_of_input = self.eof_seen || self.err_seen.is_some();
            let have_read_space = self.q < self.buftop;
            let have_shift_room = self.p > 0;

            if have_delim {
                let span = ByteSpan::new(self.p, d);
                self.p = d + 1;
                if self.in_longline {
                    self.longline_ended = true;
                    self.update_hint();
                    return GetlineResult::LongLineChunk(span);
                }
                self.update_hint();
                return GetlineResult::FullLine(span);
            }

            // Deferred until `have_read_space` so the final byte of a
            // no-delimiter tail never lands exactly at `buftop`, which
            // would leave no writable byte for the caller to append a
            // terminator at (the corner case spec.md calls out in §4.3).
            if end_of_input && have_bytes && have_read_space {
                let span = ByteSpan::new(self.p, self.q - 1);
                self.p = self.q;
                if self.in_longline {
                    self.longline_ended = true;
                    self.update_hint();
                    return GetlineResult::LongLineChunk(span);
                }
                self.update_hint();
                return GetlineResult::FullLineWithoutDelimiter(span);
            }

            if end_of_input && !have_bytes && self.in_longline {
                self.longline_ended = true;
                continue;
            }

            if end_of_input && !have_bytes {
                return match &self.err_seen {
                    Some(_) if self.err_reported => GetlineResult::EndOfFile,
                    Some(cause) => {
                        let cause = cause.clone();
                        self.err_reported = true;
                        GetlineResult::Error(cause)
                    }
                    None => GetlineResult::EndOfFile,
                };
            }

            if !end_of_input && have_read_space {
                self.do_read();
                continue;
            }

            if have_bytes && !have_read_space && (self.q - self.p) >= self.min1stchunk && !self.in_longline {
                let span = ByteSpan::new(self.p, self.q - 1);
                self.in_longline = true;
                self.p = self.q;
                self.update_hint();
                return GetlineResult::LongLineStart(span);
            }

            if have_bytes && !have_read_space && have_shift_room {
                if self.pause_on_inval && !self.terminate_current_pause {
                    return GetlineResult::Paused;
                }
                self.shift();
                continue;
            }

            if have_bytes && !have_read_space {
                // have_shift_room is false here: the buffer holds one
                // chunk of an overlong record with no room left to move it.
                let span = ByteSpan::new(self.p, self.q - 1);
                let was_in_longline = self.in_longline;
                self.in_longline = true;
                self.p = self.q;
                self.update_hint();
                return if was_in_longline {
                    GetlineResult::LongLineChunk(span)
                } else {
                    GetlineResult::LongLineStart(span)
                };
            }

            // !have_bytes && !have_read_space: only reachable when
            // p == q == buftop.
            if self.pause_on_inval && !self.terminate_current_pause {
                return GetlineResult::Paused;
            }
            self.reset();
        }
    }
}
