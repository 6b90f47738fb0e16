//! A fixed-capacity, sentinel-guarded scanner for delimiter-terminated byte
//! streams.
//!
//! A [`Scanner`] reads from an already-open handle and yields records
//! separated by a single configurable delimiter byte. The working buffer
//! never grows: its capacity is fixed at [`Scanner::open`] time, and records
//! longer than that capacity are surfaced as a sequence of chunks
//! ([`GetlineResult::LongLineStart`], zero or more
//! [`GetlineResult::LongLineChunk`], then [`GetlineResult::LongLineEnd`])
//! rather than buffered whole. Every returned byte range is backed by a
//! read-only sentinel page that makes the delimiter search safe to run
//! without an explicit bound — see [`arena`] internals for how that's
//! arranged.
//!
//! This crate does not edit or reassemble records, does not grow its buffer,
//! and does not coordinate concurrent access to one scanner: a caller must
//! not invoke [`Scanner::getline`] concurrently with itself on the same
//! scanner.
//!
//! ```no_run
//! use linescan::{GetlineResult, Scanner};
//! use std::fs::File;
//!
//! # fn run() -> std::io::Result<()> {
//! let f = File::open("input.txt")?;
//! let mut scanner = Scanner::open(f, 64 * 1024, b'\n').expect("open scanner");
//! loop {
//!     match scanner.getline() {
//!         GetlineResult::FullLine(span) => {
//!             let _line = scanner.bytes(span);
//!         }
//!         GetlineResult::EndOfFile => break,
//!         GetlineResult::Error(cause) => {
//!             eprintln!("read failed: {}", cause);
//!             break;
//!         }
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod arena;
mod error;
mod result;
mod scanner;
mod util;

pub use error::{ConfigError, OpenError, OpenErrorKind, ReadFailure};
pub use result::{ByteSpan, GetlineResult};
pub use scanner::Scanner;
pub use util::{enable_env_override, BUFSZ_ENV_VAR};
