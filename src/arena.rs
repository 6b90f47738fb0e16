use std::io;
use std::ptr;

use crate::error::{OpenError, OpenErrorKind};
use crate::util::{page_size, round_up};

/// The buffer arena: one `mmap`-backed region holding the working buffer
/// plus a trailing, page-aligned, read-only sentinel page.
///
/// The working buffer is `[0, cap)`, exactly the capacity the caller
/// requested (or the environment-overridden value) — it is *not* rounded up.
/// Real memory protection only works at the OS's page granularity, so the
/// sentinel byte instead lives at `sentinel_pos`, the first page boundary at
/// or above `cap`; `[cap, sentinel_pos)` is unused padding that happens to
/// share a page with the sentinel but is never read or written by the
/// scanner. This keeps `getline`'s chunking/long-line thresholds operating
/// at the caller's actual requested capacity (needed to exercise §8's
/// small-`bufsz` sweep and the worked long-line examples) while still
/// backing the unbounded delimiter scan with a real, OS-enforced read-only
/// page rather than a bounds check.
pub(crate) struct Arena {
    base: *mut u8,
    len: usize,
    cap: usize,
    sentinel_pos: usize,
    pgsz: usize,
}

// The arena owns its mapping exclusively; it is never aliased outside the
// scanner that holds it, and all access goes through `&`/`&mut self`.
unsafe impl Send for Arena {}

impl Arena {
    /// Allocates a new arena with a working buffer of exactly `requested`
    /// bytes (minimum 1), and stamps `delimiter` into the sentinel page.
    pub(crate) fn new(requested: usize, delimiter: u8) -> Result<Self, OpenError> {
        let pgsz = page_size();
        let cap = requested.max(1);
        let sentinel_pos = round_up(cap, pgsz);
        let len = sentinel_pos + pgsz;

        let base = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        if base == libc::MAP_FAILED {
            return Err(OpenError::new(OpenErrorKind::Alloc(io::Error::last_os_error())));
        }
        let base = base as *mut u8;

        // Stamp the sentinel byte while its page is still writable.
        unsafe {
            ptr::write(base.add(sentinel_pos), delimiter);
        }

        let rc = unsafe { libc::mprotect(base.add(sentinel_pos) as *mut _, pgsz, libc::PROT_READ) };
        if rc != 0 {
            let err = io::Error::last_os_error();
            unsafe {
                libc::munmap(base as *mut _, len);
            }
            return Err(OpenError::new(OpenErrorKind::Protect(err)));
        }

        Ok(Arena {
            base,
            len,
            cap,
            sentinel_pos,
            pgsz,
        })
    }

    /// Size of the writable working buffer, `[0, cap)` — exactly the
    /// requested capacity, never rounded.
    #[inline]
    pub(crate) fn buftop(&self) -> usize {
        self.cap
    }

    /// The region `[0, sentinel_pos]` inclusive of the sentinel byte, for
    /// passing to the delimiter-search primitive. This may extend past
    /// `buftop()` into unused padding; that padding is never surrendered to
    /// callers and any match found there is discarded by `getline`'s
    /// `d < q` check same as a true sentinel match.
    #[inline]
    pub(crate) fn scan_region(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.base, self.sentinel_pos + 1) }
    }

    /// The writable working buffer, `[0, cap)`.
    #[inline]
    pub(crate) fn buf(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.base, self.cap) }
    }

    /// Mutable access to the writable working buffer, `[0, cap)`.
    #[inline]
    pub(crate) fn buf_mut(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.base, self.cap) }
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        unsafe {
            // Restore writability before unmapping; not strictly required by
            // munmap, but keeps the mapping in a conventional state if any
            // future code inspects it mid-teardown (e.g. under a debugger).
            let page = self.base.add(self.sentinel_pos) as *mut _;
            libc::mprotect(page, self.pgsz, libc::PROT_READ | libc::PROT_WRITE);
            libc::munmap(self.base as *mut _, self.len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_byte_matches_delimiter() {
        let arena = Arena::new(64, b'\n').unwrap();
        let region = arena.scan_region();
        assert_eq!(*region.last().unwrap(), b'\n');
    }

    #[test]
    fn working_buffer_is_exactly_requested_capacity() {
        for requested in [1usize, 2, 3, 4, 8, 16, 4095, 4096, 4097, 70_000] {
            let arena = Arena::new(requested, b'\n').unwrap();
            assert_eq!(arena.buftop(), requested);
        }
    }

    #[test]
    fn sentinel_page_is_page_aligned() {
        let arena = Arena::new(4, b'\n').unwrap();
        let pgsz = page_size();
        assert_eq!(arena.sentinel_pos % pgsz, 0);
        assert!(arena.sentinel_pos >= arena.cap);
    }

    #[test]
    fn working_buffer_is_writable() {
        let mut arena = Arena::new(64, b'\n').unwrap();
        arena.buf_mut()[0] = b'x';
        assert_eq!(arena.buf()[0], b'x');
    }

    #[test]
    fn small_capacity_scan_region_reaches_real_sentinel_past_padding() {
        // With a 4-byte working buffer the sentinel byte lives far beyond
        // `buftop()`, inside padding that shares a page with it; the scan
        // region must still expose it so an unbounded search terminates.
        let arena = Arena::new(4, b'\n').unwrap();
        let region = arena.scan_region();
        assert!(region.len() > arena.buftop() + 1);
        assert_eq!(*region.last().unwrap(), b'\n');
    }
}
