//! Emits N delimited records of length in `[minlen, maxlen]` over the
//! base64 (RFC 4648) alphabet, for feeding to `copy_lines` or any other
//! scanner-backed tool under stress.
//!
//! Usage: `gen_records <count> [minlen] [maxlen] [--no-final-delimiter]`
//! Exit status zero on success, non-zero on I/O failure.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

const ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn main() -> ExitCode {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let suppress_final = if let Some(pos) = args.iter().position(|a| a == "--no-final-delimiter") {
        args.remove(pos);
        true
    } else {
        false
    };

    let mut positional = args.into_iter();
    let count: usize = match positional.next().and_then(|s| s.parse().ok()) {
        Some(n) => n,
        None => {
            eprintln!("gen_records: missing required <count> argument");
            return ExitCode::FAILURE;
        }
    };
    let minlen: usize = positional
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    let maxlen: usize = positional
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(80);

    if minlen > maxlen {
        eprintln!("gen_records: minlen must be <= maxlen");
        return ExitCode::FAILURE;
    }

    let mut rng = rand::thread_rng();
    let len_dist = Uniform::from(minlen..=maxlen);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for i in 0..count {
        let len = len_dist.sample(&mut rng);
        let mut record = Vec::with_capacity(len + 1);
        for _ in 0..len {
            record.push(ALPHABET[rng.gen_range(0..ALPHABET.len())]);
        }
        if !(suppress_final && i == count - 1) {
            record.push(b'\n');
        }
        if let Err(e) = out.write_all(&record) {
            eprintln!("gen_records: write failed: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
