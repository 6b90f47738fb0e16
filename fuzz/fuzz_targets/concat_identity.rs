#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use linescan::{GetlineResult, Scanner};

// Checks the concatenation identity invariant (every returned span,
// concatenated in call order and re-joined with the delimiter where a
// LongLineEnd or FullLine implies one, reproduces the fuzzer's input
// exactly) at a small, fuzzer-chosen capacity so shifts and long-line
// chunking are exercised on every run.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let bufsz = 1 + (data[0] as usize % 8);
    let input = data[1..].to_vec();

    let mut scanner = match Scanner::open(Cursor::new(input.clone()), bufsz, b'\n') {
        Ok(s) => s,
        Err(_) => return,
    };

    let mut rebuilt = Vec::with_capacity(input.len());
    for _ in 0..(input.len() * 4 + 16) {
        match scanner.getline() {
            GetlineResult::FullLine(span)
            | GetlineResult::FullLineWithoutDelimiter(span)
            | GetlineResult::LongLineStart(span)
            | GetlineResult::LongLineChunk(span) => {
                rebuilt.extend_from_slice(scanner.bytes(span));
            }
            GetlineResult::LongLineEnd => {}
            GetlineResult::Paused => unreachable!("pause not enabled"),
            GetlineResult::EndOfFile => {
                assert_eq!(rebuilt, input);
                return;
            }
            GetlineResult::Error(_) => return,
        }
    }
    panic!("getline did not reach EndOfFile within the expected number of calls");
});
