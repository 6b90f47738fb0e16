//! Copies stdin to stdout a record at a time, using `Scanner` throughout.
//!
//! Usage: `copy_lines [bufsz] [delimiter_byte]`
//! Exit status zero on success, non-zero on I/O failure, matching the
//! stress-harness contract this demo stands in for.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use linescan::{GetlineResult, Scanner};

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let bufsz: usize = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(64 * 1024);
    let delimiter: u8 = args
        .next()
        .and_then(|s| s.bytes().next())
        .unwrap_or(b'\n');

    let mut scanner = match Scanner::open(io::stdin(), bufsz, delimiter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("copy_lines: failed to open scanner: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        match scanner.getline() {
            GetlineResult::FullLine(span)
            | GetlineResult::FullLineWithoutDelimiter(span)
            | GetlineResult::LongLineStart(span)
            | GetlineResult::LongLineChunk(span) => {
                if let Err(e) = out.write_all(scanner.bytes(span)) {
                    eprintln!("copy_lines: write failed: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            GetlineResult::LongLineEnd => {}
            GetlineResult::Paused => unreachable!("pause not enabled"),
            GetlineResult::EndOfFile => return ExitCode::SUCCESS,
            GetlineResult::Error(cause) => {
                eprintln!("copy_lines: read failed: {}", cause);
                return ExitCode::FAILURE;
            }
        }
    }
}
